#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Tankwatch Core Library
//!
//! The encroachment record, its create input and validation, list filters,
//! and the error type shared by every Tankwatch crate.

pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{Error, FieldError, Result};
pub use types::{
    EncroachmentRecord, NewEncroachment, Period, RecordFilter, RecordId, ValidatedEncroachment,
    ValidationReport,
};
