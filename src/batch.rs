//! Batches: ordered entries sharing a company and purpose, rendered as a
//! header record, the entry records, and a control record summarizing them.

use crate::amount::Amount;
use crate::entry::{Entry, TransactionCode};
use crate::error::{NachaError, Result};
use crate::field::{blank, fit, fit_exact, sealed, RECORD_LENGTH};
use crate::routing::RoutingNumber;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Record type for batch header records.
const HEADER_RECORD_TYPE: &str = "5";

/// Record type for batch control records.
const CONTROL_RECORD_TYPE: &str = "8";

/// Originator status code: an ODFI-originated batch.
const ORIGINATOR_STATUS: &str = "1";

/// Control records keep the low-order ten digits of an entry hash.
pub(crate) const HASH_MODULUS: u64 = 10_000_000_000;

/// Service class code: which entry directions a batch may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceClass {
    /// Mixed debits and credits ("200")
    Mixed,

    /// Credits only ("220")
    CreditsOnly,

    /// Debits only ("225")
    DebitsOnly,
}

impl ServiceClass {
    /// The three-digit wire code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceClass::Mixed => "200",
            ServiceClass::CreditsOnly => "220",
            ServiceClass::DebitsOnly => "225",
        }
    }

    /// Returns `true` if the declared class permits entries with this code.
    pub fn permits(&self, code: TransactionCode) -> bool {
        match self {
            ServiceClass::Mixed => true,
            ServiceClass::CreditsOnly => code.is_credit(),
            ServiceClass::DebitsOnly => code.is_debit(),
        }
    }
}

impl FromStr for ServiceClass {
    type Err = NachaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "200" => Ok(ServiceClass::Mixed),
            "220" => Ok(ServiceClass::CreditsOnly),
            "225" => Ok(ServiceClass::DebitsOnly),
            other => Err(NachaError::UnknownServiceClass {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Standard entry class: the origination category of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardEntryClass {
    /// Prearranged payment and deposit entries
    Ppd,

    /// Corporate credit or debit
    Ccd,

    /// Corporate trade exchange
    Ctx,

    /// Internet-initiated entries
    Web,

    /// Telephone-initiated entries
    Tel,
}

impl StandardEntryClass {
    /// The three-letter wire code.
    pub fn code(&self) -> &'static str {
        match self {
            StandardEntryClass::Ppd => "PPD",
            StandardEntryClass::Ccd => "CCD",
            StandardEntryClass::Ctx => "CTX",
            StandardEntryClass::Web => "WEB",
            StandardEntryClass::Tel => "TEL",
        }
    }
}

impl FromStr for StandardEntryClass {
    type Err = NachaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PPD" => Ok(StandardEntryClass::Ppd),
            "CCD" => Ok(StandardEntryClass::Ccd),
            "CTX" => Ok(StandardEntryClass::Ctx),
            "WEB" => Ok(StandardEntryClass::Web),
            "TEL" => Ok(StandardEntryClass::Tel),
            other => Err(NachaError::UnknownStandardEntryClass {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StandardEntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A rendered batch plus the aggregates its control record was built from.
///
/// The aggregates are passed upward unmodified for file-level accumulation;
/// `entry_hash` is the full untruncated sum, reduced modulo [`HASH_MODULUS`]
/// only when a control record is rendered.
#[derive(Debug)]
pub struct BatchOutput {
    /// Header record, one record per entry, control record
    pub lines: Vec<String>,

    /// Number of entry records
    pub entry_count: u32,

    /// Sum of the eight-digit routing prefixes of all entries
    pub entry_hash: u64,

    /// Sum of debit entry amounts
    pub total_debit: Amount,

    /// Sum of credit entry amounts
    pub total_credit: Amount,
}

/// An ordered collection of entries under one company and purpose.
///
/// Entries are attached by value and numbered in insertion order. The batch
/// number and originating routing number are assigned when the batch is
/// attached to a file; a batch cannot be attached twice because
/// `NachaFile::add_batch` consumes it.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Declared direction mix for the batch
    pub service_class: ServiceClass,

    /// Originating company name (rendered uppercased, truncated to 16)
    pub company_name: String,

    /// Company identifier assigned by the ODFI (at most 10 characters)
    pub company_id: String,

    /// Origination category
    pub sec_code: StandardEntryClass,

    /// Free-text purpose shown to receivers (truncated to 10)
    pub description: String,

    /// Effective entry date
    pub entry_date: NaiveDate,

    /// Company discretionary data (truncated to 20)
    pub discretionary_data: String,

    entries: Vec<Entry>,
    number: Option<u32>,
    odfi: Option<RoutingNumber>,
}

impl Batch {
    /// Creates a detached batch with no entries.
    pub fn new(
        service_class: ServiceClass,
        company_name: &str,
        company_id: &str,
        sec_code: StandardEntryClass,
        description: &str,
        entry_date: NaiveDate,
        discretionary_data: &str,
    ) -> Self {
        Batch {
            service_class,
            company_name: company_name.to_string(),
            company_id: company_id.to_string(),
            sec_code,
            description: description.to_string(),
            entry_date,
            discretionary_data: discretionary_data.to_string(),
            entries: Vec::new(),
            number: None,
            odfi: None,
        }
    }

    /// Attaches an entry, assigning its 1-based sequence number.
    ///
    /// The entry's direction must be consistent with the batch's declared
    /// service class; a mismatch would produce a file the receiving bank
    /// rejects, so it is refused here.
    pub fn add_entry(&mut self, mut entry: Entry) -> Result<()> {
        if !self.service_class.permits(entry.transaction_code) {
            return Err(NachaError::ServiceClassViolation {
                service_class: self.service_class.code(),
                transaction_code: entry.transaction_code.code(),
            });
        }

        entry.set_sequence(self.entries.len() as u32 + 1);
        self.entries.push(entry);
        Ok(())
    }

    /// The attached entries, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Assigns the batch number and propagates the originating routing
    /// number to the batch and all its entries. Called once, on attach.
    pub(crate) fn attach(&mut self, number: u32, odfi: RoutingNumber) {
        self.number = Some(number);
        for entry in &mut self.entries {
            entry.set_odfi(odfi.clone());
        }
        self.odfi = Some(odfi);
    }

    /// Renders the header, entry, and control records, accumulating the
    /// entry hash and debit/credit totals over entries in insertion order.
    pub fn render(&self) -> Result<BatchOutput> {
        let number = self
            .number
            .ok_or(NachaError::Unattached { record: "batch" })?;
        let odfi = self
            .odfi
            .as_ref()
            .ok_or(NachaError::Unattached { record: "batch" })?;

        let mut lines = Vec::with_capacity(self.entries.len() + 2);

        let mut line = String::with_capacity(RECORD_LENGTH);
        line.push_str(HEADER_RECORD_TYPE);
        line.push_str(&fit(self.service_class.code(), 3, '0'));
        line.push_str(&fit(&self.company_name.to_uppercase(), 16, ' '));
        line.push_str(&fit(&self.discretionary_data, 20, ' '));
        line.push_str(&fit_exact(&self.company_id, 10, '0', "company identifier")?);
        line.push_str(&fit(self.sec_code.code(), 3, '0'));
        line.push_str(&fit(&self.description.to_uppercase(), 10, ' '));
        line.push_str(&blank(6));
        line.push_str(&self.entry_date.format("%y%m%d").to_string());
        line.push_str(&blank(3));
        line.push_str(ORIGINATOR_STATUS);
        line.push_str(&fit(odfi.prefix(), 8, ' '));
        line.push_str(&fit_exact(&number.to_string(), 7, '0', "batch number")?);
        lines.push(sealed(line));

        let mut entry_hash: u64 = 0;
        let mut total_debit = Amount::ZERO;
        let mut total_credit = Amount::ZERO;

        for entry in &self.entries {
            let line = entry.render()?;

            if entry.transaction_code.is_credit() {
                total_credit += entry.amount;
            } else {
                total_debit += entry.amount;
            }

            // Safety: the routing-prefix field at 3..11 holds eight digits
            // validated at RoutingNumber construction
            let prefix: u64 = line[3..11].parse().expect("routing prefix is digits");
            entry_hash += prefix;

            lines.push(line);
        }

        let mut line = String::with_capacity(RECORD_LENGTH);
        line.push_str(CONTROL_RECORD_TYPE);
        line.push_str(&fit(self.service_class.code(), 3, '0'));
        line.push_str(&fit_exact(
            &self.entries.len().to_string(),
            6,
            '0',
            "entry count",
        )?);
        line.push_str(&fit(&(entry_hash % HASH_MODULUS).to_string(), 10, '0'));
        line.push_str(&fit_exact(
            &total_debit.to_cents().to_string(),
            12,
            '0',
            "total debit",
        )?);
        line.push_str(&fit_exact(
            &total_credit.to_cents().to_string(),
            12,
            '0',
            "total credit",
        )?);
        line.push_str(&fit_exact(&self.company_id, 10, '0', "company identifier")?);
        line.push_str(&blank(19));
        line.push_str(&blank(6));
        line.push_str(&fit(odfi.prefix(), 8, '0'));
        line.push_str(&fit_exact(&number.to_string(), 7, '0', "batch number")?);
        lines.push(sealed(line));

        Ok(BatchOutput {
            lines,
            entry_count: self.entries.len() as u32,
            entry_hash,
            total_debit,
            total_credit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn routing(s: &str) -> RoutingNumber {
        RoutingNumber::new(s).unwrap()
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn sample_batch() -> Batch {
        Batch::new(
            ServiceClass::CreditsOnly,
            "teamup sports, inc",
            "2123456789",
            StandardEntryClass::Ccd,
            "Weekly deposit",
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            "",
        )
    }

    fn sample_entry() -> Entry {
        Entry::new(
            TransactionCode::CheckingCredit,
            routing("071923213"),
            "0558769606",
            amount("11.99"),
            "Matthew Pegler",
        )
    }

    #[test]
    fn test_header_exact_layout() {
        let mut batch = sample_batch();
        batch.add_entry(sample_entry()).unwrap();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        let expected = concat!(
            "5",
            "220",
            "TEAMUP SPORTS, I",
            "                    ",
            "2123456789",
            "CCD",
            "WEEKLY DEP",
            "      ",
            "260805",
            "   ",
            "1",
            "09100001",
            "0000001",
        );
        assert_eq!(output.lines[0], expected);
    }

    #[test]
    fn test_control_exact_layout() {
        let mut batch = sample_batch();
        batch.add_entry(sample_entry()).unwrap();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        let expected = concat!(
            "8",
            "220",
            "000001",
            "0007192321",
            "000000000000",
            "000000001199",
            "2123456789",
            "                   ",
            "      ",
            "09100001",
            "0000001",
        );
        assert_eq!(output.lines[2], expected);
    }

    #[test]
    fn test_aggregates_over_multiple_entries() {
        let mut batch = Batch::new(
            ServiceClass::Mixed,
            "Acme",
            "0000000001",
            StandardEntryClass::Ppd,
            "Payroll",
            NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            "",
        );
        batch
            .add_entry(Entry::new(
                TransactionCode::CheckingCredit,
                routing("071923213"),
                "1",
                amount("10.00"),
                "One",
            ))
            .unwrap();
        batch
            .add_entry(Entry::new(
                TransactionCode::SavingsDebit,
                routing("091000019"),
                "2",
                amount("2.50"),
                "Two",
            ))
            .unwrap();
        batch
            .add_entry(Entry::new(
                TransactionCode::SavingsCredit,
                routing("071923213"),
                "3",
                amount("0.50"),
                "Three",
            ))
            .unwrap();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        assert_eq!(output.entry_count, 3);
        assert_eq!(output.entry_hash, 7192321 + 9100001 + 7192321);
        assert_eq!(output.total_credit.to_cents(), 1050);
        assert_eq!(output.total_debit.to_cents(), 250);
        assert_eq!(output.lines.len(), 5);
        for line in &output.lines {
            assert_eq!(line.len(), 94);
        }
    }

    #[test]
    fn test_entries_numbered_in_insertion_order() {
        let mut batch = sample_batch();
        batch.add_entry(sample_entry()).unwrap();
        batch.add_entry(sample_entry()).unwrap();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        assert!(output.lines[1].ends_with("0000001"));
        assert!(output.lines[2].ends_with("0000002"));
    }

    #[test]
    fn test_service_class_rejects_wrong_direction() {
        let mut batch = sample_batch();
        let debit = Entry::new(
            TransactionCode::CheckingDebit,
            routing("071923213"),
            "1",
            amount("1.00"),
            "Debit",
        );
        let err = batch.add_entry(debit).unwrap_err();
        assert!(matches!(
            err,
            NachaError::ServiceClassViolation {
                service_class: "220",
                transaction_code: "27",
            }
        ));
    }

    #[test]
    fn test_prenotes_classify_with_their_direction() {
        let mut batch = sample_batch();
        batch
            .add_entry(Entry::new(
                TransactionCode::CheckingPrenoteCredit,
                routing("071923213"),
                "1",
                amount("0.00"),
                "Prenote",
            ))
            .unwrap();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        assert_eq!(output.total_credit.to_cents(), 0);
        assert_eq!(output.total_debit.to_cents(), 0);
        assert_eq!(output.entry_count, 1);
    }

    #[test]
    fn test_empty_batch_renders_zero_totals() {
        let mut batch = sample_batch();
        batch.attach(1, routing("091000019"));

        let output = batch.render().unwrap();
        assert_eq!(output.lines.len(), 2);
        assert_eq!(&output.lines[1][4..10], "000000");
        assert_eq!(output.entry_hash, 0);
        assert_eq!(output.total_debit, Amount::ZERO);
        assert_eq!(output.total_credit, Amount::ZERO);
    }

    #[test]
    fn test_detached_batch_does_not_render() {
        let err = sample_batch().render().unwrap_err();
        assert!(matches!(err, NachaError::Unattached { record: "batch" }));
    }

    #[test]
    fn test_service_class_parse() {
        assert_eq!(ServiceClass::from_str("220").unwrap(), ServiceClass::CreditsOnly);
        assert!(ServiceClass::from_str("999").is_err());
    }

    #[test]
    fn test_sec_code_parse_is_case_insensitive() {
        assert_eq!(
            StandardEntryClass::from_str("ppd").unwrap(),
            StandardEntryClass::Ppd
        );
        assert!(StandardEntryClass::from_str("XYZ").is_err());
    }
}
