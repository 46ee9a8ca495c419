//! # edi-mapping
//!
//! Mapping tables and the field annotator ("explain").
//!
//! A [`MappingTable`] is plain data: segment tag to a description and a list
//! of field entries keyed by `TAG/NN/NN` position paths. The annotator walks
//! a tokenized document and labels every component from the table, falling
//! back to generic labels for anything the table does not know. Tables are
//! passed per call and only ever read.

pub mod annotator;
pub mod defaults;
pub mod qualifiers;
pub mod table;

pub use annotator::{
    AnnotatedField, AnnotatedSegment, ExplainedDocument, Explanations, FieldAnnotator, annotate,
};
pub use defaults::builtin_table;
pub use table::{CodeMeaning, Datatype, FieldPath, MappingEntry, MappingTable, SegmentMapping};

use thiserror::Error;

/// Errors that can occur when loading mapping tables
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid field path '{path}' under segment {tag}: {reason}")]
    InvalidPath {
        tag: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported mapping table format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
