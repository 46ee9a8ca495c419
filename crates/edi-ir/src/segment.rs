//! Tokenized segment representation

use serde::Serialize;

/// One terminator-delimited unit of an interchange.
///
/// `elements` holds every data element in source order, each split into its
/// components. Empty placeholders are kept as empty strings so positions
/// stay aligned with the EDIFACT position notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSegment {
    /// Upper-cased segment tag (normally three letters)
    pub tag: String,
    /// 1-based index in source order
    pub position: usize,
    /// Data elements, each an ordered list of component values
    pub elements: Vec<Vec<String>>,
}

impl RawSegment {
    pub fn new(tag: impl Into<String>, position: usize, elements: Vec<Vec<String>>) -> Self {
        Self {
            tag: tag.into(),
            position,
            elements,
        }
    }

    /// Get an element by 0-based index
    #[must_use]
    pub fn element(&self, index: usize) -> Option<&[String]> {
        self.elements.get(index).map(Vec::as_slice)
    }

    /// Get a component by 0-based element and component index
    #[must_use]
    pub fn component(&self, element: usize, component: usize) -> Option<&str> {
        self.elements
            .get(element)
            .and_then(|e| e.get(component))
            .map(String::as_str)
    }

    /// Like [`RawSegment::component`], but treats empty placeholders as absent
    #[must_use]
    pub fn non_empty_component(&self, element: usize, component: usize) -> Option<&str> {
        self.component(element, component)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Check whether this segment carries the given tag
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unh() -> RawSegment {
        RawSegment::new(
            "UNH",
            2,
            vec![
                vec!["1".to_string()],
                vec!["ORDERS".to_string(), "D".to_string(), "96A".to_string()],
                vec![String::new()],
            ],
        )
    }

    #[test]
    fn test_component_access() {
        let seg = unh();
        assert_eq!(seg.component(0, 0), Some("1"));
        assert_eq!(seg.component(1, 2), Some("96A"));
        assert_eq!(seg.component(1, 3), None);
        assert_eq!(seg.component(5, 0), None);
        assert_eq!(seg.element(1).map(<[String]>::len), Some(3));
    }

    #[test]
    fn test_empty_placeholder_is_absent_for_non_empty_lookup() {
        let seg = unh();
        assert_eq!(seg.component(2, 0), Some(""));
        assert_eq!(seg.non_empty_component(2, 0), None);
    }

    #[test]
    fn test_tag_comparison_ignores_case() {
        assert!(unh().is("unh"));
        assert!(!unh().is("UNT"));
    }
}
