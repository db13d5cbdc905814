//! # NACHA Encoder
//!
//! Encodes ACH payment instructions into the NACHA fixed-width text format:
//! a file of 94-character records with running entry hashes and
//! debit/credit control totals that the receiving bank validates.
//!
//! ## Design Principles
//!
//! - **Exact decimal amounts**: `rust_decimal` via [`Amount`]; cents are
//!   derived by exact arithmetic, never floating point
//! - **Checked field widths**: identifier and numeric fields error on
//!   overflow instead of silently truncating
//! - **Single-use attachment**: batches and entries are attached by value,
//!   so a child cannot be numbered under two parents
//! - **Pure rendering**: building the tree assigns all numbering up front;
//!   `render` is a read-only traversal with no side effects
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use chrono::NaiveDate;
//! use nacha::{
//!     Amount, Batch, Entry, NachaFile, RoutingNumber, ServiceClass,
//!     StandardEntryClass, TransactionCode,
//! };
//!
//! let mut batch = Batch::new(
//!     ServiceClass::CreditsOnly,
//!     "teamup sports, inc",
//!     "2123456789",
//!     StandardEntryClass::Ccd,
//!     "Weekly deposit",
//!     NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
//!     "",
//! );
//! batch.add_entry(Entry::new(
//!     TransactionCode::CheckingCredit,
//!     RoutingNumber::new("071923213").unwrap(),
//!     "0558769606",
//!     Amount::from_str("11.99").unwrap(),
//!     "Matthew Pegler",
//! )).unwrap();
//!
//! let creation = NaiveDate::from_ymd_opt(2026, 8, 4)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//! let mut file = NachaFile::new(
//!     RoutingNumber::new("091000019").unwrap(),
//!     "2123456789",
//!     'A',
//!     "WELLS FARGO",
//!     "teamup sports, inc",
//!     creation,
//!     "",
//! );
//! file.add_batch(batch);
//!
//! let rendered = file.render().unwrap();
//! assert_eq!(rendered.lines().count(), 5);
//! assert!(rendered.lines().all(|line| line.len() == 94));
//! ```

pub mod amount;
pub mod batch;
pub mod entry;
pub mod error;
pub mod field;
pub mod file;
pub mod importer;
pub mod routing;

pub use amount::Amount;
pub use batch::{Batch, BatchOutput, ServiceClass, StandardEntryClass};
pub use entry::{Entry, TransactionCode};
pub use error::{NachaError, Result};
pub use file::NachaFile;
pub use importer::{import_csv, EntryRow, FileParams};
pub use routing::RoutingNumber;
