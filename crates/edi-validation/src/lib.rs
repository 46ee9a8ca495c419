#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-validation
//!
//! Structural validation for tokenized EDIFACT documents.
//!
//! The validator walks the segment sequence once tokenization is done and
//! returns every anomaly as a [`StructuralError`] value. It never fails:
//! callers decide which codes are fatal for them.
//!
//! ## Example Usage
//!
//! ```rust
//! use edi_validation::{ErrorCode, StructuralValidator, ValidationConfig};
//!
//! let doc = edi_adapter_edifact::parse("UNH+1+INVOIC:D:96A:UN'BGM+380'UNT+3+1'").unwrap();
//! let config = ValidationConfig::default().expect_message_type("ORDERS");
//! let report = StructuralValidator::with_config(config).validate(&doc);
//!
//! assert_eq!(report.count(ErrorCode::FieldValueMismatch), 1);
//! ```

pub mod engine;
pub mod reporter;
pub mod rules;

pub use engine::{StructuralValidator, ValidationConfig};
pub use reporter::{ErrorCode, StructuralError, ValidationReport};

/// Validate `doc` with every check enabled, optionally against an expected
/// message type
#[must_use]
pub fn validate(doc: &edi_ir::Document, expected_message_type: Option<&str>) -> ValidationReport {
    let mut config = ValidationConfig::default();
    config.expected_message_type = expected_message_type.map(str::to_string);
    StructuralValidator::with_config(config).validate(doc)
}
