//! Structural error records

use edi_ir::RawSegment;
use serde::Serialize;
use std::fmt;

/// Code identifying the kind of structural anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input held no text; reported by callers that record parse refusals
    EmptyInput,
    /// A field value differs from what the caller expected
    FieldValueMismatch,
    /// UNT segment count absent or not a number
    UntSegmentCountMissing,
    /// UNT segment count differs from the segments in the message
    UntSegmentCountMismatch,
    /// Tag is not three letters
    InvalidSegmentTag,
    /// Tag in the service-segment range that no service segment uses
    UnknownSegmentTag,
    /// Envelope segment appears where its envelope is not open, or twice
    SegmentOutOfSequence,
    /// UNT message reference differs from its UNH
    MessageReferenceMismatch,
    /// UNZ control reference differs from its UNB
    InterchangeReferenceMismatch,
    /// UNZ message count differs from the messages in the interchange
    UnzMessageCountMismatch,
}

impl ErrorCode {
    /// Codes that signal malformed or unknown segment tags or
    /// out-of-sequence headers
    pub const MALFORMED_STRUCTURE: [ErrorCode; 3] = [
        ErrorCode::InvalidSegmentTag,
        ErrorCode::UnknownSegmentTag,
        ErrorCode::SegmentOutOfSequence,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyInput => "EMPTY_INPUT",
            ErrorCode::FieldValueMismatch => "FIELD_VALUE_MISMATCH",
            ErrorCode::UntSegmentCountMissing => "UNT_SEGMENT_COUNT_MISSING",
            ErrorCode::UntSegmentCountMismatch => "UNT_SEGMENT_COUNT_MISMATCH",
            ErrorCode::InvalidSegmentTag => "INVALID_SEGMENT_TAG",
            ErrorCode::UnknownSegmentTag => "UNKNOWN_SEGMENT_TAG",
            ErrorCode::SegmentOutOfSequence => "SEGMENT_OUT_OF_SEQUENCE",
            ErrorCode::MessageReferenceMismatch => "MESSAGE_REFERENCE_MISMATCH",
            ErrorCode::InterchangeReferenceMismatch => "INTERCHANGE_REFERENCE_MISMATCH",
            ErrorCode::UnzMessageCountMismatch => "UNZ_MESSAGE_COUNT_MISMATCH",
        }
    }

    /// Whether this code is in [`ErrorCode::MALFORMED_STRUCTURE`]
    #[must_use]
    pub fn signals_malformed_structure(&self) -> bool {
        Self::MALFORMED_STRUCTURE.contains(self)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural anomaly found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralError {
    pub code: ErrorCode,
    pub message: String,
    pub segment_tag: Option<String>,
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl StructuralError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            segment_tag: None,
            position: None,
            field: None,
            value: None,
        }
    }

    /// Attach the tag and position of the offending segment
    #[must_use]
    pub fn at(mut self, segment: &RawSegment) -> Self {
        self.segment_tag = Some(segment.tag.clone());
        self.position = Some(segment.position);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let (Some(tag), Some(position)) = (&self.segment_tag, self.position) {
            write!(f, " ({tag} at segment {position})")?;
        }
        Ok(())
    }
}

/// Ordered list of structural errors for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<StructuralError>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No errors were found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: StructuralError) {
        tracing::debug!(code = %error.code, position = ?error.position, "{}", error.message);
        self.errors.push(error);
    }

    /// Whether any error carries `code`
    #[must_use]
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Number of errors carrying `code`
    #[must_use]
    pub fn count(&self, code: ErrorCode) -> usize {
        self.errors.iter().filter(|e| e.code == code).count()
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<StructuralError> {
        self.errors
    }
}
