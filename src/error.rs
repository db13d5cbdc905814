//! Error types for NACHA encoding.

use thiserror::Error;

/// Result type alias for encoding operations
pub type Result<T> = std::result::Result<T, NachaError>;

/// Errors that can occur while building or encoding a NACHA file.
#[derive(Error, Debug)]
pub enum NachaError {
    /// Routing number is not exactly nine ASCII digits
    #[error("invalid routing number {value:?}: expected exactly 9 digits")]
    InvalidRoutingNumber { value: String },

    /// Amount text could not be parsed as a decimal value
    #[error("invalid amount {value:?}: not a decimal value")]
    InvalidAmount { value: String },

    /// The NACHA amount field carries no sign; negative amounts cannot be encoded
    #[error("negative amount {value}: the amount field is unsigned")]
    NegativeAmount { value: String },

    /// Amount does not fit the ten-digit cents field
    #[error("amount {value} exceeds the ten-digit cents field")]
    AmountTooLarge { value: String },

    /// Date text could not be parsed
    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A field value is wider than its fixed width and cannot be truncated safely
    #[error("value {value:?} does not fit the {width}-character {field} field")]
    FieldOverflow {
        field: &'static str,
        value: String,
        width: usize,
    },

    /// Transaction code outside the checking/savings credit/debit enumeration
    #[error("unknown transaction code {value:?}")]
    UnknownTransactionCode { value: String },

    /// Service class outside the mixed/credits-only/debits-only enumeration
    #[error("unknown service class {value:?}")]
    UnknownServiceClass { value: String },

    /// Standard entry class outside the supported enumeration
    #[error("unknown standard entry class {value:?}")]
    UnknownStandardEntryClass { value: String },

    /// Entry direction conflicts with the batch's declared service class
    #[error("transaction code {transaction_code} is not permitted in a {service_class} batch")]
    ServiceClassViolation {
        service_class: &'static str,
        transaction_code: &'static str,
    },

    /// A batch or entry was rendered before being attached to its parent
    #[error("{record} rendered before being attached to a parent")]
    Unattached { record: &'static str },

    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid entry row in the input CSV
    #[error("invalid entry at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing command-line arguments
    #[error(
        "missing arguments. Usage: nacha <entries.csv> <destination-routing> <file-id> <origination-bank> <company-name> [file-id-modifier]"
    )]
    MissingArgument,
}
