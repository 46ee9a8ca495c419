//! EDIFACT control characters

use crate::{Error, Result};
use serde::Serialize;

/// Default component separator
pub const DEFAULT_COMPONENT_SEPARATOR: char = ':';
/// Default data element separator
pub const DEFAULT_DATA_SEPARATOR: char = '+';
/// Default release (escape) character
pub const DEFAULT_RELEASE_CHARACTER: char = '?';
/// Default segment terminator
pub const DEFAULT_SEGMENT_TERMINATOR: char = '\'';

/// The four control characters used to tokenize one interchange.
///
/// Fields are private so the distinctness invariant cannot be broken after
/// construction; use [`DelimiterSet::new`] or [`DelimiterSet::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelimiterSet {
    component_sep: char,
    data_sep: char,
    release_char: char,
    segment_terminator: char,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            component_sep: DEFAULT_COMPONENT_SEPARATOR,
            data_sep: DEFAULT_DATA_SEPARATOR,
            release_char: DEFAULT_RELEASE_CHARACTER,
            segment_terminator: DEFAULT_SEGMENT_TERMINATOR,
        }
    }
}

impl DelimiterSet {
    /// Build a delimiter set, rejecting any repeated character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDelimiter`] when two roles share a character.
    pub fn new(component: char, data: char, release: char, terminator: char) -> Result<Self> {
        let chars = [component, data, release, terminator];
        let distinct = chars
            .iter()
            .enumerate()
            .all(|(i, c)| !chars[i + 1..].contains(c));

        if !distinct {
            return Err(Error::DuplicateDelimiter {
                component,
                data,
                release,
                terminator,
            });
        }

        Ok(Self {
            component_sep: component,
            data_sep: data,
            release_char: release,
            segment_terminator: terminator,
        })
    }

    #[must_use]
    pub fn component_sep(&self) -> char {
        self.component_sep
    }

    #[must_use]
    pub fn data_sep(&self) -> char {
        self.data_sep
    }

    #[must_use]
    pub fn release_char(&self) -> char {
        self.release_char
    }

    #[must_use]
    pub fn segment_terminator(&self) -> char {
        self.segment_terminator
    }
}
