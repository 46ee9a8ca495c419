//! Mapping table model and loading

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A code and what it means
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMeaning {
    pub code: String,
    pub meaning: String,
}

impl CodeMeaning {
    pub fn new(code: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            meaning: meaning.into(),
        }
    }
}

/// Declared data type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    Alphanumeric,
    Alphabetic,
    Numeric,
    Decimal,
    Date,
    Time,
    Code,
    /// Any type name this crate does not know
    #[serde(other)]
    Other,
}

/// One field of a segment, addressed by its position path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    /// `TAG/NN/NN`, 1-based element then component
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Datatype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<CodeMeaning>>,
}

impl MappingEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            description: None,
            required: None,
            datatype: None,
            codes: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_datatype(mut self, datatype: Datatype) -> Self {
        self.datatype = Some(datatype);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    #[must_use]
    pub fn with_codes(mut self, codes: Vec<CodeMeaning>) -> Self {
        self.codes = Some(codes);
        self
    }

    /// Meaning of `code` from this entry's own code list, ignoring ASCII case
    #[must_use]
    pub fn meaning_of(&self, code: &str) -> Option<&str> {
        self.codes
            .as_ref()?
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .map(|c| c.meaning.as_str())
    }
}

/// Description and fields of one segment tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentMapping {
    pub segment_description: String,
    #[serde(default)]
    pub fields: Vec<MappingEntry>,
}

impl SegmentMapping {
    pub fn new(segment_description: impl Into<String>, fields: Vec<MappingEntry>) -> Self {
        Self {
            segment_description: segment_description.into(),
            fields,
        }
    }

    /// Entry with exactly this path
    #[must_use]
    pub fn field(&self, path: &str) -> Option<&MappingEntry> {
        self.fields.iter().find(|f| f.path == path)
    }
}

/// Position of a component: tag plus 1-based element and component numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub tag: String,
    pub element: usize,
    pub component: usize,
}

impl FieldPath {
    pub fn new(tag: impl Into<String>, element: usize, component: usize) -> Self {
        Self {
            tag: tag.into(),
            element,
            component,
        }
    }

    /// Parse `TAG/NN/NN`; numbers are at least two digits and start at 1
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] naming what is wrong with `path`.
    pub fn parse(path: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPath {
            tag: path.split('/').next().unwrap_or_default().to_string(),
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = path.split('/').collect();
        let [tag, element, component] = parts.as_slice() else {
            return Err(invalid("expected TAG/NN/NN"));
        };

        let number = |part: &str| -> Result<usize> {
            if part.len() < 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("positions must be two or more digits"));
            }
            match part.parse::<usize>() {
                Ok(0) | Err(_) => Err(invalid("positions start at 01")),
                Ok(n) => Ok(n),
            }
        };

        if tag.is_empty() {
            return Err(invalid("missing segment tag"));
        }

        Ok(Self::new(
            tag.to_uppercase(),
            number(*element)?,
            number(*component)?,
        ))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.tag, self.element, self.component)
    }
}

/// Segment tag to segment mapping.
///
/// Tags are stored upper-cased. Read-only once built; share it by reference
/// across as many annotation calls as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappingTable {
    segments: BTreeMap<String, SegmentMapping>,
}

impl MappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the mapping for `tag`
    pub fn insert(&mut self, tag: impl AsRef<str>, mapping: SegmentMapping) {
        self.segments.insert(tag.as_ref().to_uppercase(), mapping);
    }

    /// Mapping for `tag`, matched case-insensitively
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&SegmentMapping> {
        self.segments
            .get(tag)
            .or_else(|| self.segments.get(&tag.to_uppercase()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Tags in sorted order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.segments.keys().map(String::as_str)
    }

    /// Build from raw segments, normalizing tags and checking every path
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for a malformed path or one whose tag
    /// differs from the segment it is listed under.
    pub fn from_segments(segments: BTreeMap<String, SegmentMapping>) -> Result<Self> {
        let mut table = Self::new();

        for (tag, mut mapping) in segments {
            let tag = tag.trim().to_uppercase();
            for field in &mut mapping.fields {
                let path = FieldPath::parse(field.path.trim())?;
                if path.tag != tag {
                    return Err(Error::InvalidPath {
                        tag,
                        path: field.path.clone(),
                        reason: "path tag differs from its segment".to_string(),
                    });
                }
                field.path = path.to_string();
            }
            table.segments.insert(tag, mapping);
        }

        Ok(table)
    }

    /// Parse a JSON table
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or a path is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let segments: BTreeMap<String, SegmentMapping> = serde_json::from_str(json)?;
        Self::from_segments(segments)
    }

    /// Parse a YAML table
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed or a path is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let segments: BTreeMap<String, SegmentMapping> = serde_yaml::from_str(yaml)?;
        Self::from_segments(segments)
    }

    /// Load a table from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, has another extension,
    /// or fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;

        let table = match extension.as_str() {
            "json" => Self::from_json_str(&content)?,
            "yaml" | "yml" => Self::from_yaml_str(&content)?,
            other => return Err(Error::UnsupportedFormat(other.to_string())),
        };

        debug!(path = %path.display(), segments = table.len(), "Loaded mapping table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_parse_and_display() {
        let path = FieldPath::parse("dtm/01/02").unwrap();
        assert_eq!(path, FieldPath::new("DTM", 1, 2));
        assert_eq!(path.to_string(), "DTM/01/02");
        assert_eq!(FieldPath::new("FTX", 4, 12).to_string(), "FTX/04/12");
    }

    #[test]
    fn test_field_path_rejects_bad_shapes() {
        for bad in ["DTM/1/2", "DTM/01", "DTM/00/01", "DTM/01/0x", "/01/01", "DTM/01/01/01"] {
            assert!(FieldPath::parse(bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_json_table_round_trip_fields() {
        let json = r#"{
            "rff": {
                "segmentDescription": "Reference",
                "fields": [
                    { "path": "RFF/01/01", "name": "Qualifier", "codes": [{ "code": "ON", "meaning": "Order" }] },
                    { "path": "rff/01/02", "name": "Reference", "datatype": "alphanumeric", "required": true }
                ]
            }
        }"#;
        let table = MappingTable::from_json_str(json).unwrap();

        let rff = table.get("RFF").unwrap();
        assert_eq!(rff.segment_description, "Reference");
        assert_eq!(rff.field("RFF/01/01").unwrap().meaning_of("ON"), Some("Order"));
        let reference = rff.field("RFF/01/02").unwrap();
        assert_eq!(reference.datatype, Some(Datatype::Alphanumeric));
        assert_eq!(reference.required, Some(true));
        assert!(reference.description.is_none());
        assert!(table.get("rff").is_some());
    }

    #[test]
    fn test_unknown_datatype_is_tolerated() {
        let json = r#"{ "BGM": { "segmentDescription": "B", "fields": [
            { "path": "BGM/01/01", "name": "x", "datatype": "an..35" } ] } }"#;
        let table = MappingTable::from_json_str(json).unwrap();
        assert_eq!(
            table.get("BGM").unwrap().fields[0].datatype,
            Some(Datatype::Other)
        );
    }

    #[test]
    fn test_path_under_wrong_segment_is_rejected() {
        let json = r#"{ "BGM": { "segmentDescription": "B", "fields": [
            { "path": "DTM/01/01", "name": "x" } ] } }"#;
        let err = MappingTable::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }), "{err}");
    }

    #[test]
    fn test_yaml_table() {
        let yaml = "NAD:\n  segmentDescription: Name and address\n  fields:\n    - path: NAD/01/01\n      name: Party qualifier\n";
        let table = MappingTable::from_yaml_str(yaml).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.tags().collect::<Vec<_>>(), vec!["NAD"]);
    }

    #[test]
    fn test_meaning_of_without_codes() {
        assert_eq!(MappingEntry::new("BGM/01/01", "x").meaning_of("220"), None);
    }

    #[test]
    fn test_meaning_of_ignores_case() {
        let entry = MappingEntry::new("RFF/01/01", "Qualifier")
            .with_codes(vec![CodeMeaning::new("on", "Purchase order")]);
        assert_eq!(entry.meaning_of("ON"), Some("Purchase order"));
        assert_eq!(entry.meaning_of("On"), Some("Purchase order"));
        assert_eq!(entry.meaning_of("VN"), None);
    }
}
