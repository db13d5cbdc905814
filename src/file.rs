//! The file record: header, batches in order, and the file control record.

use crate::amount::Amount;
use crate::batch::{Batch, HASH_MODULUS};
use crate::error::Result;
use crate::field::{blank, fit, fit_exact, sealed, RECORD_LENGTH};
use crate::routing::RoutingNumber;
use chrono::NaiveDateTime;
use log::debug;

/// Record type for the file header record.
const HEADER_RECORD_TYPE: &str = "1";

/// Record type for the file control record.
const CONTROL_RECORD_TYPE: &str = "9";

/// Priority code; only "01" is defined.
const PRIORITY_CODE: &str = "01";

/// Every record is 94 characters.
const RECORD_SIZE: &str = "094";

/// Records per physical block.
const BLOCKING_FACTOR: &str = "10";

/// File format code; only "1" is defined.
const FORMAT_CODE: &str = "1";

/// A complete NACHA file: an ordered collection of batches plus the
/// file-level identification fields.
///
/// Batches are attached by value and numbered in insertion order;
/// attachment propagates the destination bank's routing number down to
/// every entry as the originating-bank identification. Rendering is a pure
/// read of the fully attached tree.
#[derive(Debug, Clone)]
pub struct NachaFile {
    /// Routing number of the receiving institution
    pub bank_routing_number: RoutingNumber,

    /// Immediate-origin identifier (at most 10 characters)
    pub file_id: String,

    /// Distinguishes files submitted the same day ('A'..'Z', '0'..'9')
    pub file_id_modifier: char,

    /// Receiving institution name (rendered uppercased, truncated to 23)
    pub origination_bank: String,

    /// Originating company name (rendered uppercased, truncated to 23)
    pub company_name: String,

    /// File creation stamp, rendered as YYMMDD and HHMM
    pub creation: NaiveDateTime,

    /// Optional reference code (truncated to 8)
    pub reference_code: String,

    batches: Vec<Batch>,
}

impl NachaFile {
    /// Creates a file with no batches.
    pub fn new(
        bank_routing_number: RoutingNumber,
        file_id: &str,
        file_id_modifier: char,
        origination_bank: &str,
        company_name: &str,
        creation: NaiveDateTime,
        reference_code: &str,
    ) -> Self {
        NachaFile {
            bank_routing_number,
            file_id: file_id.to_string(),
            file_id_modifier,
            origination_bank: origination_bank.to_string(),
            company_name: company_name.to_string(),
            creation,
            reference_code: reference_code.to_string(),
            batches: Vec::new(),
        }
    }

    /// Attaches a batch, assigning its 1-based batch number and propagating
    /// the routing number to the batch and its entries.
    ///
    /// Takes the batch by value: once attached it cannot be attached to a
    /// second file or mutated behind this file's back.
    pub fn add_batch(&mut self, mut batch: Batch) {
        let number = self.batches.len() as u32 + 1;
        batch.attach(number, self.bank_routing_number.clone());
        self.batches.push(batch);
    }

    /// The attached batches, in insertion order.
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Renders the complete file: header, each batch's records in order,
    /// and the control record summing every batch's aggregates. Lines are
    /// newline-joined with no trailing newline.
    pub fn render(&self) -> Result<String> {
        let mut lines = Vec::new();

        let mut line = String::with_capacity(RECORD_LENGTH);
        line.push_str(HEADER_RECORD_TYPE);
        line.push_str(PRIORITY_CODE);
        line.push_str(&fit_exact(
            &format!(" {}", self.bank_routing_number),
            10,
            '0',
            "immediate destination",
        )?);
        line.push_str(&fit_exact(&self.file_id, 10, ' ', "file id")?);
        line.push_str(&self.creation.format("%y%m%d").to_string());
        line.push_str(&self.creation.format("%H%M").to_string());
        line.push(self.file_id_modifier);
        line.push_str(RECORD_SIZE);
        line.push_str(BLOCKING_FACTOR);
        line.push_str(FORMAT_CODE);
        line.push_str(&fit(&self.origination_bank.to_uppercase(), 23, ' '));
        line.push_str(&fit(&self.company_name.to_uppercase(), 23, ' '));
        line.push_str(&fit(&self.reference_code, 8, ' '));
        lines.push(sealed(line));

        let mut entry_count: u64 = 0;
        let mut entry_hash: u64 = 0;
        let mut total_debit = Amount::ZERO;
        let mut total_credit = Amount::ZERO;

        // Batch aggregates already subsume their entries, so the file level
        // sums them directly instead of re-deriving from raw entries.
        for batch in &self.batches {
            let output = batch.render()?;
            entry_count += u64::from(output.entry_count);
            entry_hash += output.entry_hash;
            total_debit += output.total_debit;
            total_credit += output.total_credit;
            lines.extend(output.lines);
        }

        debug!(
            "file control: {} batches, {} entries, debits {}, credits {}",
            self.batches.len(),
            entry_count,
            total_debit,
            total_credit
        );

        let mut line = String::with_capacity(RECORD_LENGTH);
        line.push_str(CONTROL_RECORD_TYPE);
        line.push_str(&fit_exact(
            &self.batches.len().to_string(),
            6,
            '0',
            "batch count",
        )?);
        line.push_str(&fit_exact(
            &(lines.len() + 1).to_string(),
            6,
            '0',
            "line count",
        )?);
        line.push_str(&fit_exact(&entry_count.to_string(), 8, '0', "entry count")?);
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
        line.push_str(&blank(39));
        lines.push(sealed(line));

        Ok(lines.join("\n"))
    }
}
