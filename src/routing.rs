//! ABA routing numbers.

use crate::error::{NachaError, Result};
use std::fmt;
use std::str::FromStr;

/// A nine-digit ABA routing number.
///
/// The NACHA entry layout splits a routing number into its first eight
/// digits (also the entry-hash input) and the trailing check digit, so the
/// type validates the nine-digit shape up front. Whether the number
/// identifies a real institution is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingNumber(String);

impl RoutingNumber {
    /// Creates a routing number, validating exactly nine ASCII digits.
    pub fn new(value: &str) -> Result<Self> {
        if value.len() != 9 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NachaError::InvalidRoutingNumber {
                value: value.to_string(),
            });
        }
        Ok(RoutingNumber(value.to_string()))
    }

    /// The first eight digits, as rendered in routing and ODFI fields.
    pub fn prefix(&self) -> &str {
        &self.0[..8]
    }

    /// The ninth digit.
    pub fn check_digit(&self) -> &str {
        &self.0[8..]
    }

    /// The full nine digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoutingNumber {
    type Err = NachaError;

    fn from_str(s: &str) -> Result<Self> {
        RoutingNumber::new(s.trim())
    }
}

impl fmt::Display for RoutingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
