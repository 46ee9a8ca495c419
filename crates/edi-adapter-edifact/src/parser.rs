//! EDIFACT document parser
//!
//! Drives the resolver and both scanners to build an [`edi_ir::Document`].
//! Parsing never rejects a segment: odd tags and shapes are kept as they
//! are and left for the structural validator to report.

use crate::syntax::detect;
use crate::tokenizer::{SegmentScanner, split_top_level, unescape};
use crate::{Error, Result};
use edi_ir::{DelimiterSet, Document, RawSegment};
use tracing::debug;

/// Length of a segment tag
const TAG_LEN: usize = 3;

/// EDIFACT parser.
///
/// Delimiters are resolved per call from the input unless fixed with
/// [`EdifactParser::with_delimiters`].
#[derive(Debug, Clone, Default)]
pub struct EdifactParser {
    delimiters: Option<DelimiterSet>,
}

impl EdifactParser {
    /// Create a parser that detects delimiters from each input
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that always uses `delimiters` and skips UNA detection
    #[must_use]
    pub fn with_delimiters(delimiters: DelimiterSet) -> Self {
        Self {
            delimiters: Some(delimiters),
        }
    }

    /// Parse a complete interchange or message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when `text` holds nothing but whitespace.
    pub fn parse(&self, text: &str) -> Result<Document> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let (delimiters, body) = match self.delimiters {
            Some(delimiters) => (delimiters, text),
            None => {
                let resolution = detect(text);
                (resolution.delimiters, &text[resolution.body_offset..])
            }
        };

        let segments: Vec<RawSegment> = SegmentScanner::new(
            body,
            delimiters.segment_terminator(),
            delimiters.release_char(),
        )
        .enumerate()
        .map(|(index, raw)| parse_segment(&raw, index + 1, &delimiters))
        .collect();

        debug!(
            segment_count = segments.len(),
            ?delimiters,
            "Tokenized EDIFACT input"
        );

        Ok(Document::new(delimiters, segments))
    }
}

/// Parse `text` with delimiters detected from its start
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when `text` holds nothing but whitespace.
pub fn parse(text: &str) -> Result<Document> {
    EdifactParser::new().parse(text)
}

/// Build one [`RawSegment`] from a raw segment string (terminator stripped).
///
/// The tag is the upper-cased first three characters. A data separator
/// directly after the tag is skipped; a segment holding only its tag has no
/// elements.
#[must_use]
pub fn parse_segment(raw: &str, position: usize, delimiters: &DelimiterSet) -> RawSegment {
    let cleaned: String = raw.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let cleaned = cleaned.trim();

    let tag_end = cleaned
        .char_indices()
        .nth(TAG_LEN)
        .map_or(cleaned.len(), |(offset, _)| offset);
    let tag = cleaned[..tag_end].to_uppercase();
    let rest = &cleaned[tag_end..];

    let body = match rest.strip_prefix(delimiters.data_sep()) {
        Some(body) => body,
        None if rest.is_empty() => {
            return RawSegment::new(tag, position, Vec::new());
        }
        None => rest,
    };

    let release = delimiters.release_char();
    let elements = split_top_level(body, delimiters.data_sep(), release)
        .into_iter()
        .map(|element| {
            split_top_level(&element, delimiters.component_sep(), release)
                .iter()
                .map(|component| unescape(component, release))
                .collect()
        })
        .collect();

    RawSegment::new(tag, position, elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_segment() {
        let doc = parse("UNB+UNOA:3+SENDER+RECEIVER+200101:1200+12345'").unwrap();
        let segment = &doc.segments[0];
        assert_eq!(segment.tag, "UNB");
        assert_eq!(segment.position, 1);
        // UNB has 5 data elements: syntax, sender, receiver, datetime, control_ref
        assert_eq!(segment.elements.len(), 5);
        assert_eq!(segment.elements[0], vec!["UNOA", "3"]);
    }

    #[test]
    fn test_parse_segment_with_composite() {
        let doc = parse("UNH+12345+ORDERS:D:96A:UN'").unwrap();
        let segment = &doc.segments[0];
        assert_eq!(segment.tag, "UNH");
        assert_eq!(segment.elements.len(), 2);
        assert_eq!(segment.elements[1], vec!["ORDERS", "D", "96A", "UN"]);
    }

    #[test]
    fn test_parse_una_is_consumed() {
        let doc = parse("UNA:+.? 'UNB+UNOA:3+SENDER+RECEIVER'").unwrap();
        assert_eq!(doc.tags(), vec!["UNB"]);
        assert_eq!(doc.segments[0].position, 1);
        assert_eq!(doc.segments[0].elements.len(), 3);
    }

    #[test]
    fn test_parse_custom_una() {
        let doc = parse("UNA*=.# ~UNH=1=ORDERS*D~FTX=AAA=A#~B#=C~").unwrap();
        assert_eq!(doc.tags(), vec!["UNH", "FTX"]);
        assert_eq!(doc.segments[0].elements[1], vec!["ORDERS", "D"]);
        assert_eq!(doc.segments[1].component(1, 0), Some("A~B=C"));
    }

    #[test]
    fn test_escaped_terminator_stays_in_component() {
        let doc = parse("FTX+AAA+A?'B'").unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.segments[0].elements[1], vec!["A'B"]);
    }

    #[test]
    fn test_escaped_separators_and_release() {
        let doc = parse("FTX+AAA+1?+1?:2??'").unwrap();
        assert_eq!(doc.segments[0].elements[1], vec!["1+1:2?"]);
    }

    #[test]
    fn test_empty_element_handling() {
        let doc = parse("NAD+BY++12345::9'").unwrap();
        let segment = &doc.segments[0];
        assert_eq!(segment.elements.len(), 3);
        assert_eq!(segment.elements[1], vec![""]);
        assert_eq!(segment.elements[2], vec!["12345", "", "9"]);
    }

    #[test]
    fn test_trailing_empty_element() {
        let doc = parse("TAG+VAL1++VAL3+'").unwrap();
        assert_eq!(
            doc.segments[0].elements,
            vec![vec!["VAL1"], vec![""], vec!["VAL3"], vec![""]]
        );
    }

    #[test]
    fn test_tag_only_segment_has_no_elements() {
        let doc = parse("UNS'UNS+S'").unwrap();
        assert!(doc.segments[0].elements.is_empty());
        assert_eq!(doc.segments[1].elements, vec![vec!["S"]]);
    }

    #[test]
    fn test_tag_is_uppercased() {
        let doc = parse("bgm+220'").unwrap();
        assert_eq!(doc.segments[0].tag, "BGM");
    }

    #[test]
    fn test_line_breaks_inside_segment_are_stripped() {
        let doc = parse("NAD+BY+\r\n1234567890123::9'\nUNT+2\n+1'").unwrap();
        assert_eq!(doc.segments[0].elements[1], vec!["1234567890123", "", "9"]);
        assert_eq!(doc.segments[1].elements, vec![vec!["2"], vec!["1"]]);
    }

    #[test]
    fn test_release_before_line_break_does_not_escape_next_separator() {
        let doc = parse("FTX+AAA+A?\n+B'").unwrap();
        assert_eq!(
            doc.segments[0].elements,
            vec![vec!["AAA"], vec!["A"], vec!["B"]]
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(parse("").unwrap_err(), Error::EmptyInput);
        assert_eq!(parse(" \n\t").unwrap_err(), Error::EmptyInput);
        assert_eq!(Error::EmptyInput.code(), "EMPTY_INPUT");
    }

    #[test]
    fn test_short_tag_is_kept() {
        let doc = parse("AB'").unwrap();
        assert_eq!(doc.segments[0].tag, "AB");
        assert!(doc.segments[0].elements.is_empty());
    }

    #[test]
    fn test_fixed_delimiters_skip_detection() {
        let delimiters = DelimiterSet::new(':', '+', '?', '~').unwrap();
        let parser = EdifactParser::with_delimiters(delimiters);
        let doc = parser.parse("BGM+220~DTM+137:20250101:102~").unwrap();
        assert_eq!(doc.tags(), vec!["BGM", "DTM"]);
        assert_eq!(doc.delimiters, delimiters);
    }
}
