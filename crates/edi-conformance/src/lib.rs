#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-conformance
//!
//! Pluggable parse pipelines and the conformance tester.
//!
//! A pipeline turns interchange text into an explained document plus its
//! structural errors. The tester replays a corpus of valid samples through
//! a pipeline, then corrupts the first few and checks that the pipeline
//! notices. A pipeline that silently accepts a corrupted message header
//! fails conformance.
//!
//! ## Example Usage
//!
//! ```rust
//! use edi_conformance::{ReferencePipeline, Sample, run_conformance};
//!
//! let samples = vec![Sample::new(
//!     "aperak",
//!     "UNB+UNOC:3+S:R+R:S+250101:0101+REF'UNH+1+APERAK:D:07B:UN:2.1i'BGM+312+X'UNT+4+1'UNZ+1+REF'",
//! )];
//! let report = run_conformance(&ReferencePipeline::new(), &samples);
//!
//! assert!(report.success);
//! assert_eq!(report.results.len(), 2);
//! ```

pub mod mutation;
pub mod pipeline;
pub mod runner;

pub use mutation::{corrupt_message_headers, escape_empty_placeholders, mutate};
pub use pipeline::{ParsePipeline, PipelineOutput, ReferencePipeline};
pub use runner::{
    ConformanceConfig, ConformanceReport, ConformanceTester, Sample, SampleResult,
    run_conformance,
};

use thiserror::Error;

/// Errors a pipeline run can end in
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] edi_adapter_edifact::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Pipeline panicked: {0}")]
    Panicked(String),

    #[error("Invalid mutation pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
