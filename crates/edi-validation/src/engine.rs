//! Validation engine

use crate::reporter::ValidationReport;
use crate::rules::{
    EnvelopeChecks, check_envelopes, check_message_type, check_segment_tags,
    check_trailer_count_present,
};
use edi_ir::Document;
use serde::Deserialize;
use tracing::debug;

/// Validation configuration
///
/// The header/trailer checks always run. The remaining toggles switch
/// the additional envelope checks on or off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Message type the first UNH must carry, compared case-insensitively
    pub expected_message_type: Option<String>,
    /// Report malformed tags and unknown service tags
    pub check_tags: bool,
    /// Report envelope segments outside their envelope
    pub check_sequence: bool,
    /// Report UNT/UNZ counts that disagree with the document
    pub check_counts: bool,
    /// Report UNT/UNZ references that disagree with their headers
    pub check_references: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            expected_message_type: None,
            check_tags: true,
            check_sequence: true,
            check_counts: true,
            check_references: true,
        }
    }
}

impl ValidationConfig {
    /// Set the expected message type
    #[must_use]
    pub fn expect_message_type(mut self, message_type: impl Into<String>) -> Self {
        self.expected_message_type = Some(message_type.into());
        self
    }
}

/// Structural validator.
///
/// Runs over an already tokenized [`Document`] and accumulates every
/// anomaly instead of stopping at the first one.
#[derive(Debug, Clone, Default)]
pub struct StructuralValidator {
    config: ValidationConfig,
}

impl StructuralValidator {
    /// Create a validator with every check enabled and no expected type
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a complete document
    #[must_use]
    pub fn validate(&self, doc: &Document) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.config.check_tags {
            check_segment_tags(doc, &mut report);
        }

        if let Some(expected) = self.config.expected_message_type.as_deref() {
            check_message_type(doc, expected, &mut report);
        }

        check_trailer_count_present(doc, &mut report);

        let checks = EnvelopeChecks {
            sequence: self.config.check_sequence,
            counts: self.config.check_counts,
            references: self.config.check_references,
        };
        check_envelopes(doc, checks, &mut report);

        debug!(
            segments = doc.len(),
            errors = report.errors.len(),
            "Structural validation finished"
        );

        report
    }
}
