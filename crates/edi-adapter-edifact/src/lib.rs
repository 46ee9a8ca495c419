//! # edi-adapter-edifact
//!
//! EDIFACT tokenizer.
//!
//! Turns raw interchange text into an [`edi_ir::Document`]: the delimiter
//! scheme is resolved from an optional UNA service string advice, the text
//! is cut into segments at unescaped terminators, and every segment body is
//! split into data elements and components. Release characters are honored
//! at every level.
//!
//! ```rust
//! let doc = edi_adapter_edifact::parse("UNH+1+ORDERS:D:96A:UN'BGM+220+PO?+1'").unwrap();
//! assert_eq!(doc.tags(), vec!["UNH", "BGM"]);
//! assert_eq!(doc.segments[1].component(1, 0), Some("PO+1"));
//! ```

pub mod parser;
pub mod syntax;
pub mod tokenizer;

pub use parser::{EdifactParser, parse, parse_segment};
pub use syntax::{Resolution, resolve};
pub use tokenizer::{SegmentScanner, split_top_level, tokenize_segments, unescape};

use thiserror::Error;

/// Errors that can occur when tokenizing EDIFACT
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input holds no text at all; no document can be produced
    #[error("Input is empty")]
    EmptyInput,
}

impl Error {
    /// Stable code for reporting alongside structural errors
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyInput => "EMPTY_INPUT",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
