//! Parse pipelines
//!
//! A pipeline is tokenize, validate and annotate behind one call. The
//! tester only sees the [`ParsePipeline`] trait, so a generated or
//! hand-written parser can be checked the same way as the reference one.

use crate::Result;
use edi_adapter_edifact::EdifactParser;
use edi_mapping::{ExplainedDocument, FieldAnnotator, MappingTable};
use edi_validation::{StructuralError, StructuralValidator, ValidationConfig};
use serde::Serialize;
use tracing::debug;

/// What a pipeline produces for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutput {
    pub document: ExplainedDocument,
    pub errors: Vec<StructuralError>,
}

impl PipelineOutput {
    /// Number of tokenized segments
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.document.document.len()
    }
}

/// Anything that can turn interchange text into a [`PipelineOutput`]
pub trait ParsePipeline {
    /// Tokenize, validate and annotate `text`
    ///
    /// # Errors
    ///
    /// Returns an error when the input cannot be processed at all.
    fn run(&self, text: &str) -> Result<PipelineOutput>;
}

impl<F> ParsePipeline for F
where
    F: Fn(&str) -> Result<PipelineOutput>,
{
    fn run(&self, text: &str) -> Result<PipelineOutput> {
        self(text)
    }
}

/// The workspace's own tokenizer, validator and annotator wired together
#[derive(Debug, Clone, Default)]
pub struct ReferencePipeline {
    parser: EdifactParser,
    validator: StructuralValidator,
    table: Option<MappingTable>,
}

impl ReferencePipeline {
    /// Detect delimiters per input, run every check and annotate with the
    /// built-in table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate with `table` instead of the built-in one
    #[must_use]
    pub fn with_table(mut self, table: MappingTable) -> Self {
        self.table = Some(table);
        self
    }

    #[must_use]
    pub fn with_validation(mut self, config: ValidationConfig) -> Self {
        self.validator = StructuralValidator::with_config(config);
        self
    }
}

impl ParsePipeline for ReferencePipeline {
    fn run(&self, text: &str) -> Result<PipelineOutput> {
        let document = self.parser.parse(text)?;
        let report = self.validator.validate(&document);
        let explained = FieldAnnotator::new(self.table.as_ref()).annotate(&document);

        debug!(
            segments = document.len(),
            errors = report.errors.len(),
            "Pipeline run complete"
        );

        Ok(PipelineOutput {
            document: explained,
            errors: report.into_errors(),
        })
    }
}
