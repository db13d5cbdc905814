//! Assembles a NACHA file from CSV payment rows.
//!
//! Each row carries one entry plus the attributes of the batch it belongs
//! to; rows with identical batch attributes are grouped into one batch, in
//! first-seen order. Expected columns:
//!
//! ```text
//! service_class,company_name,company_id,sec_code,description,effective_date,
//! transaction_code,routing_number,account_number,amount,individual_name
//! ```
//!
//! Any invalid row aborts the import with its row number. A file that
//! silently dropped a payment instruction would still be structurally valid,
//! so skip-and-continue is not an option here.

use crate::amount::Amount;
use crate::batch::{Batch, ServiceClass, StandardEntryClass};
use crate::entry::{Entry, TransactionCode};
use crate::error::{NachaError, Result};
use crate::file::NachaFile;
use crate::routing::RoutingNumber;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// File-level fields supplied by the caller rather than the CSV rows.
#[derive(Debug, Clone)]
pub struct FileParams {
    /// Routing number of the receiving institution
    pub destination: RoutingNumber,

    /// Immediate-origin identifier
    pub file_id: String,

    /// Distinguishes files submitted the same day
    pub file_id_modifier: char,

    /// Receiving institution name
    pub origination_bank: String,

    /// Originating company name
    pub company_name: String,

    /// Optional reference code
    pub reference_code: String,

    /// File creation stamp
    pub creation: NaiveDateTime,
}

/// Raw entry row as read from CSV.
///
/// All columns are read as text and parsed into typed values by
/// [`EntryRow::parse`], so a malformed value reports which row it came from
/// rather than failing inside the CSV deserializer.
#[derive(Debug, Deserialize)]
pub struct EntryRow {
    /// Service class code of the owning batch ("200", "220", "225")
    pub service_class: String,

    /// Company name of the owning batch
    pub company_name: String,

    /// Company identifier of the owning batch
    pub company_id: String,

    /// Standard entry class of the owning batch ("PPD", "CCD", ...)
    pub sec_code: String,

    /// Batch description
    pub description: String,

    /// Effective entry date, YYYY-MM-DD
    pub effective_date: String,

    /// Two-digit transaction code ("22", "27", ...)
    pub transaction_code: String,

    /// Receiving bank routing number, nine digits
    pub routing_number: String,

    /// Receiving account number
    pub account_number: String,

    /// Decimal amount
    pub amount: String,

    /// Payee display name
    pub individual_name: String,
}

/// Batch-level attributes of a row; rows with equal attributes share a batch.
#[derive(Debug, PartialEq, Eq)]
struct BatchAttributes {
    service_class: ServiceClass,
    company_name: String,
    company_id: String,
    sec_code: StandardEntryClass,
    description: String,
    effective_date: NaiveDate,
}

impl BatchAttributes {
    fn matches(&self, batch: &Batch) -> bool {
        batch.service_class == self.service_class
            && batch.company_name == self.company_name
            && batch.company_id == self.company_id
            && batch.sec_code == self.sec_code
            && batch.description == self.description
            && batch.entry_date == self.effective_date
    }

    fn to_batch(&self) -> Batch {
        Batch::new(
            self.service_class,
            &self.company_name,
            &self.company_id,
            self.sec_code,
            &self.description,
            self.effective_date,
            "",
        )
    }
}

impl EntryRow {
    /// Parses the raw row into its batch attributes and a detached entry.
    fn parse(&self) -> Result<(BatchAttributes, Entry)> {
        let attributes = BatchAttributes {
            service_class: ServiceClass::from_str(&self.service_class)?,
            company_name: self.company_name.clone(),
            company_id: self.company_id.clone(),
            sec_code: StandardEntryClass::from_str(&self.sec_code)?,
            description: self.description.clone(),
            effective_date: NaiveDate::parse_from_str(&self.effective_date, "%Y-%m-%d")
                .map_err(|_| NachaError::InvalidDate {
                    value: self.effective_date.clone(),
                })?,
        };

        let entry = Entry::new(
            TransactionCode::from_str(&self.transaction_code)?,
            RoutingNumber::from_str(&self.routing_number)?,
            &self.account_number,
            Amount::from_str(&self.amount)?,
            &self.individual_name,
        );

        Ok((attributes, entry))
    }
}

/// Reads entry rows from a CSV reader and assembles them into a file.
///
/// Rows are processed in order; batches appear in the order their first row
/// was seen, and entries keep row order within their batch.
pub fn import_csv<R: Read>(params: FileParams, reader: R) -> Result<NachaFile> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut batches: Vec<Batch> = Vec::new();

    for (row_idx, result) in csv_reader.deserialize::<EntryRow>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let record = result?;
        let (attributes, entry) = record.parse().map_err(|e| NachaError::InvalidRecord {
            row: row_num,
            message: e.to_string(),
        })?;

        let position = match batches.iter().position(|b| attributes.matches(b)) {
            Some(position) => position,
            None => {
                debug!(
                    "row {}: starting batch {} for {} ({})",
                    row_num,
                    batches.len() + 1,
                    attributes.company_name,
                    attributes.sec_code
                );
                batches.push(attributes.to_batch());
                batches.len() - 1
            }
        };

        debug!(
            "row {}: entry for {} in batch {}",
            row_num,
            entry.individual_name,
            position + 1
        );
        batches[position]
            .add_entry(entry)
            .map_err(|e| NachaError::InvalidRecord {
                row: row_num,
                message: e.to_string(),
            })?;
    }

    let mut file = NachaFile::new(
        params.destination,
        &params.file_id,
        params.file_id_modifier,
        &params.origination_bank,
        &params.company_name,
        params.creation,
        &params.reference_code,
    );
    for batch in batches {
        file.add_batch(batch);
    }

    Ok(file)
}
