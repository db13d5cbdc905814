//! Exact-decimal currency amounts.
//!
//! Uses `rust_decimal` internally with scale enforcement. Encoding multiplies
//! by 100 and truncates to whole cents, so a binary floating-point amount
//! would corrupt the control totals; the type makes that unrepresentable.

use crate::error::{NachaError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A non-negative currency amount held to exactly 2 decimal places.
///
/// Construction rounds to the cent (banker's rounding) and rejects values
/// the ten-digit NACHA amount field cannot hold: negatives (the field is
/// unsigned) and anything of $100,000,000.00 or more.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use nacha::Amount;
///
/// let amount = Amount::from_str("11.99").unwrap();
/// assert_eq!(amount.to_cents(), 1199);
/// assert_eq!(amount.to_string(), "11.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount` from a `Decimal`, normalizing to whole cents.
    ///
    /// Rounds sub-cent precision half-to-even, then rejects negative values
    /// and values whose cents do not fit ten digits.
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(NachaError::NegativeAmount {
                value: value.to_string(),
            });
        }

        let mut normalized = value.round_dp(Self::SCALE);
        normalized.rescale(Self::SCALE);

        if normalized >= Decimal::from(100_000_000u64) {
            return Err(NachaError::AmountTooLarge {
                value: normalized.to_string(),
            });
        }

        Ok(Amount(normalized))
    }

    /// Returns the amount as a whole number of cents.
    pub fn to_cents(&self) -> u64 {
        let cents = self.0 * Decimal::ONE_HUNDRED;
        // Safety: construction normalizes to two decimal places and bounds
        // entry amounts; totals sum at most a six-digit entry count of
        // bounded amounts, far below u64::MAX cents.
        cents.to_u64().expect("cents fit in u64")
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = NachaError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).map_err(|_| NachaError::InvalidAmount {
            value: s.to_string(),
        })?;
        Amount::new(decimal)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}
