//! Entry detail records: one payment instruction per record.

use crate::amount::Amount;
use crate::error::{NachaError, Result};
use crate::field::{blank, fit, fit_exact, sealed, RECORD_LENGTH};
use crate::routing::RoutingNumber;
use std::fmt;
use std::str::FromStr;

/// Record type for entry detail records.
const RECORD_TYPE: &str = "6";

/// No addenda records follow an entry.
const ADDENDA_INDICATOR: &str = "0";

/// Transaction codes: account type crossed with direction.
///
/// Every code is either a credit or a debit (prenotes carry the direction of
/// the entries they announce), so control totals classify every entry into
/// exactly one bucket. Codes outside this enumeration are rejected at parse
/// time rather than silently dropped from the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCode {
    /// Credit to a checking account ("22")
    CheckingCredit,

    /// Prenotification of a checking credit ("23")
    CheckingPrenoteCredit,

    /// Debit from a checking account ("27")
    CheckingDebit,

    /// Prenotification of a checking debit ("28")
    CheckingPrenoteDebit,

    /// Credit to a savings account ("32")
    SavingsCredit,

    /// Prenotification of a savings credit ("33")
    SavingsPrenoteCredit,

    /// Debit from a savings account ("37")
    SavingsDebit,

    /// Prenotification of a savings debit ("38")
    SavingsPrenoteDebit,
}

impl TransactionCode {
    /// The two-digit wire code.
    pub fn code(&self) -> &'static str {
        match self {
            TransactionCode::CheckingCredit => "22",
            TransactionCode::CheckingPrenoteCredit => "23",
            TransactionCode::CheckingDebit => "27",
            TransactionCode::CheckingPrenoteDebit => "28",
            TransactionCode::SavingsCredit => "32",
            TransactionCode::SavingsPrenoteCredit => "33",
            TransactionCode::SavingsDebit => "37",
            TransactionCode::SavingsPrenoteDebit => "38",
        }
    }

    /// Returns `true` for credit and prenote-credit codes.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionCode::CheckingCredit
                | TransactionCode::CheckingPrenoteCredit
                | TransactionCode::SavingsCredit
                | TransactionCode::SavingsPrenoteCredit
        )
    }

    /// Returns `true` for debit and prenote-debit codes.
    pub fn is_debit(&self) -> bool {
        !self.is_credit()
    }
}

impl FromStr for TransactionCode {
    type Err = NachaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "22" => Ok(TransactionCode::CheckingCredit),
            "23" => Ok(TransactionCode::CheckingPrenoteCredit),
            "27" => Ok(TransactionCode::CheckingDebit),
            "28" => Ok(TransactionCode::CheckingPrenoteDebit),
            "32" => Ok(TransactionCode::SavingsCredit),
            "33" => Ok(TransactionCode::SavingsPrenoteCredit),
            "37" => Ok(TransactionCode::SavingsDebit),
            "38" => Ok(TransactionCode::SavingsPrenoteDebit),
            other => Err(NachaError::UnknownTransactionCode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One payment instruction: a debit or credit to a single account.
///
/// Business data is fixed at construction. The sequence number and the
/// originating bank's routing number are assigned exactly once when the
/// entry's batch is attached (`Batch::add_entry` assigns the sequence,
/// `NachaFile::add_batch` propagates the routing number); rendering a
/// detached entry is an error.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Account type and direction
    pub transaction_code: TransactionCode,

    /// Routing number of the receiving account's bank
    pub routing_number: RoutingNumber,

    /// Receiving account number (at most 17 characters)
    pub account_number: String,

    /// Payment amount
    pub amount: Amount,

    /// Payee display name (rendered uppercased, truncated to 21 characters)
    pub individual_name: String,

    /// 1-based position within the owning batch, assigned on attach
    sequence: Option<u32>,

    /// Originating bank routing number, propagated from the file
    odfi: Option<RoutingNumber>,
}

impl Entry {
    /// Creates a detached entry.
    pub fn new(
        transaction_code: TransactionCode,
        routing_number: RoutingNumber,
        account_number: &str,
        amount: Amount,
        individual_name: &str,
    ) -> Self {
        Entry {
            transaction_code,
            routing_number,
            account_number: account_number.to_string(),
            amount,
            individual_name: individual_name.to_string(),
            sequence: None,
            odfi: None,
        }
    }

    pub(crate) fn set_sequence(&mut self, sequence: u32) {
        self.sequence = Some(sequence);
    }

    pub(crate) fn set_odfi(&mut self, odfi: RoutingNumber) {
        self.odfi = Some(odfi);
    }

    /// Renders the 94-character entry detail record.
    pub fn render(&self) -> Result<String> {
        let sequence = self
            .sequence
            .ok_or(NachaError::Unattached { record: "entry" })?;
        let odfi = self
            .odfi
            .as_ref()
            .ok_or(NachaError::Unattached { record: "entry" })?;

        let mut line = String::with_capacity(RECORD_LENGTH);
        line.push_str(RECORD_TYPE);
        line.push_str(self.transaction_code.code());
        line.push_str(&fit(self.routing_number.prefix(), 8, '0'));
        line.push_str(self.routing_number.check_digit());
        line.push_str(&fit_exact(&self.account_number, 17, ' ', "account number")?);
        line.push_str(&fit_exact(
            &self.amount.to_cents().to_string(),
            10,
            '0',
            "amount",
        )?);
        line.push_str(&blank(16));
        line.push_str(&fit(&self.individual_name.to_uppercase(), 21, ' '));
        line.push_str(&blank(2));
        line.push_str(ADDENDA_INDICATOR);
        line.push_str(&fit(odfi.prefix(), 8, '0'));
        line.push_str(&fit_exact(&sequence.to_string(), 7, '0', "entry sequence")?);
        Ok(sealed(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_entry() -> Entry {
        Entry::new(
            TransactionCode::CheckingCredit,
            RoutingNumber::new("071923213").unwrap(),
            "0558769606",
            Amount::from_str("11.99").unwrap(),
            "Matthew Pegler",
        )
    }

    fn attached(mut entry: Entry) -> Entry {
        entry.set_sequence(1);
        entry.set_odfi(RoutingNumber::new("091000019").unwrap());
        entry
    }

    #[test]
    fn test_code_directions() {
        assert!(TransactionCode::CheckingCredit.is_credit());
        assert!(TransactionCode::SavingsPrenoteCredit.is_credit());
        assert!(TransactionCode::CheckingDebit.is_debit());
        assert!(TransactionCode::SavingsPrenoteDebit.is_debit());
    }

    #[test]
    fn test_code_parse_round_trips() {
        for raw in ["22", "23", "27", "28", "32", "33", "37", "38"] {
            let code = TransactionCode::from_str(raw).unwrap();
            assert_eq!(code.code(), raw);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        let err = TransactionCode::from_str("99").unwrap_err();
        assert!(matches!(err, NachaError::UnknownTransactionCode { .. }));
    }

    #[test]
    fn test_render_exact_layout() {
        let line = attached(sample_entry()).render().unwrap();
        let expected = concat!(
            "6",
            "22",
            "07192321",
            "3",
            "0558769606       ",
            "0000001199",
            "                ",
            "MATTHEW PEGLER       ",
            "  ",
            "0",
            "09100001",
            "0000001",
        );
        assert_eq!(line, expected);
        assert_eq!(line.len(), 94);
    }

    #[test]
    fn test_render_uppercases_and_truncates_name() {
        let mut entry = sample_entry();
        entry.individual_name = "a payee with an extremely long name".to_string();
        let line = attached(entry).render().unwrap();
        assert_eq!(&line[55..76], "A PAYEE WITH AN EXTRE");
    }

    #[test]
    fn test_detached_entry_does_not_render() {
        let err = sample_entry().render().unwrap_err();
        assert!(matches!(err, NachaError::Unattached { record: "entry" }));
    }

    #[test]
    fn test_overlong_account_number_rejected() {
        let mut entry = sample_entry();
        entry.account_number = "123456789012345678".to_string();
        let err = attached(entry).render().unwrap_err();
        assert!(matches!(
            err,
            NachaError::FieldOverflow {
                field: "account number",
                ..
            }
        ));
    }
}
