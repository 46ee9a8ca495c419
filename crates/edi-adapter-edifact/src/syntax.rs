//! EDIFACT syntax definitions and delimiter handling
//!
//! This module handles the service string advice (UNA) and default
//! separators used in EDIFACT documents.

use edi_ir::DelimiterSet;
use tracing::{trace, warn};

/// Tag of the service string advice header
pub const SERVICE_STRING_ADVICE: &str = "UNA";

/// Number of characters declared by a UNA after its tag
pub const SERVICE_STRING_ADVICE_LEN: usize = 6;

/// Outcome of inspecting the start of an interchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Delimiters to tokenize the rest of the text with
    pub delimiters: DelimiterSet,
    /// Byte offset where segment data starts (after a consumed UNA header)
    pub body_offset: usize,
}

impl Resolution {
    fn defaults() -> Self {
        Self {
            delimiters: DelimiterSet::default(),
            body_offset: 0,
        }
    }

    /// Whether a UNA header was read
    #[must_use]
    pub fn has_service_string_advice(&self) -> bool {
        self.body_offset > 0
    }
}

/// Resolve the delimiter set for `text`.
///
/// Never fails: a missing or malformed UNA falls back to `:+?'`.
#[must_use]
pub fn resolve(text: &str) -> DelimiterSet {
    detect(text).delimiters
}

/// Inspect the start of `text` for a UNA header.
///
/// UNA positions after the tag:
///   0 component separator, 1 data separator, 2 decimal mark,
///   3 release character, 4 reserved, 5 segment terminator
#[must_use]
pub fn detect(text: &str) -> Resolution {
    let trimmed = text.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    let lead = text.len() - trimmed.len();

    let Some(advice) = trimmed.strip_prefix(SERVICE_STRING_ADVICE) else {
        trace!("No service string advice, using default delimiters");
        return Resolution::defaults();
    };

    let declared: Vec<(usize, char)> = advice
        .char_indices()
        .take(SERVICE_STRING_ADVICE_LEN)
        .collect();

    if declared.len() < SERVICE_STRING_ADVICE_LEN {
        warn!(
            found = declared.len(),
            "Truncated service string advice, using default delimiters"
        );
        return Resolution::defaults();
    }

    let (last_offset, terminator) = declared[5];
    let body_offset = lead + SERVICE_STRING_ADVICE.len() + last_offset + terminator.len_utf8();

    let delimiters = match DelimiterSet::new(
        declared[0].1,
        declared[1].1,
        declared[3].1,
        terminator,
    ) {
        Ok(set) => set,
        Err(err) => {
            warn!(%err, "Unusable service string advice, using default delimiters");
            DelimiterSet::default()
        }
    };

    trace!(?delimiters, body_offset, "Resolved delimiters from service string advice");

    Resolution {
        delimiters,
        body_offset,
    }
}
