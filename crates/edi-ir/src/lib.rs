#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-ir
//!
//! Value types shared by the tokenizer, the structural validator and the
//! field annotator.
//!
//! Every value here is created fresh per parse call and never mutated once
//! built. Nothing in this crate holds process-wide state.

/// Delimiter scheme resolved for a single parse call.
pub mod delimiters;
/// Parsed document container.
pub mod document;
/// Tokenized segment with its elements and components.
pub mod segment;

pub use delimiters::DelimiterSet;
pub use document::Document;
pub use segment::RawSegment;

use thiserror::Error;

/// Errors that can occur when building IR values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Delimiters must be four distinct characters, got {component:?} {data:?} {release:?} {terminator:?}")]
    DuplicateDelimiter {
        component: char,
        data: char,
        release: char,
        terminator: char,
    },
}

/// Crate-local result type for IR operations.
pub type Result<T> = std::result::Result<T, Error>;
