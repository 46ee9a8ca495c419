//! Document representation for a tokenized interchange

use crate::delimiters::DelimiterSet;
use crate::segment::RawSegment;
use serde::Serialize;

/// A parsed interchange or message.
///
/// Owns its segments and the delimiter scheme they were split with. It keeps
/// no reference to the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Delimiters resolved for this parse
    pub delimiters: DelimiterSet,

    /// Segments in source order
    pub segments: Vec<RawSegment>,
}

impl Document {
    /// Create a new document from resolved delimiters and segments
    #[must_use]
    pub fn new(delimiters: DelimiterSet, segments: Vec<RawSegment>) -> Self {
        Self {
            delimiters,
            segments,
        }
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the document holds no segments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// First segment carrying `tag`
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&RawSegment> {
        self.segments.iter().find(|s| s.is(tag))
    }

    /// Last segment carrying `tag`
    #[must_use]
    pub fn last(&self, tag: &str) -> Option<&RawSegment> {
        self.segments.iter().rev().find(|s| s.is(tag))
    }

    /// Segment tags in source order
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.tag.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(tag: &str, position: usize, value: &str) -> RawSegment {
        RawSegment::new(tag, position, vec![vec![value.to_string()]])
    }

    #[test]
    fn test_document_lookup() {
        let doc = Document::new(
            DelimiterSet::default(),
            vec![
                segment("UNH", 1, "1"),
                segment("UNT", 2, "2"),
                segment("UNH", 3, "2"),
                segment("UNT", 4, "2"),
            ],
        );

        assert_eq!(doc.len(), 4);
        assert!(!doc.is_empty());
        assert_eq!(doc.first("UNH").map(|s| s.position), Some(1));
        assert_eq!(doc.last("UNT").map(|s| s.position), Some(4));
        assert!(doc.first("BGM").is_none());
        assert_eq!(doc.tags(), vec!["UNH", "UNT", "UNH", "UNT"]);
    }

    #[test]
    fn test_document_serializes_as_tree() {
        let doc = Document::new(DelimiterSet::default(), vec![segment("BGM", 1, "220")]);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["delimiters"]["dataSep"], "+");
        assert_eq!(json["segments"][0]["tag"], "BGM");
        assert_eq!(json["segments"][0]["position"], 1);
        assert_eq!(json["segments"][0]["elements"][0][0], "220");
    }
}
