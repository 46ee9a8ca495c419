//! Field annotator
//!
//! Maps every component of a tokenized document to a path, a name and an
//! optional description. Unknown tags and paths get generic labels; the
//! annotator never fails.

use crate::defaults::builtin_table;
use crate::qualifiers::{DATE_TIME_TAG, builtin_qualifier, render_date};
use crate::table::{FieldPath, MappingEntry, MappingTable, SegmentMapping};
use edi_ir::{Document, RawSegment};
use serde::Serialize;
use tracing::trace;

/// Index of the DTM component carrying the date text
const DATE_VALUE_COMPONENT: usize = 1;
/// Index of the DTM component carrying the format code
const DATE_FORMAT_COMPONENT: usize = 2;

/// One labelled component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedField {
    pub path: String,
    pub name: String,
    pub description: Option<String>,
    pub value: String,
}

/// One labelled segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedSegment {
    pub segment: String,
    pub position: usize,
    pub description: String,
    pub fields: Vec<AnnotatedField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanations {
    pub segments: Vec<AnnotatedSegment>,
}

/// A document together with its explanations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainedDocument {
    #[serde(flatten)]
    pub document: Document,
    pub explanations: Explanations,
}

/// Annotates documents against one mapping table
#[derive(Debug, Clone, Copy)]
pub struct FieldAnnotator<'t> {
    table: &'t MappingTable,
}

impl Default for FieldAnnotator<'static> {
    fn default() -> Self {
        Self {
            table: builtin_table(),
        }
    }
}

impl<'t> FieldAnnotator<'t> {
    /// Use `table`, or the built-in table when `table` is absent or empty
    #[must_use]
    pub fn new(table: Option<&'t MappingTable>) -> Self {
        match table {
            Some(table) if !table.is_empty() => Self { table },
            _ => Self {
                table: builtin_table(),
            },
        }
    }

    /// Annotate every segment of `document`.
    ///
    /// The input is left untouched; the result owns a copy of it.
    #[must_use]
    pub fn annotate(&self, document: &Document) -> ExplainedDocument {
        let segments = document
            .segments
            .iter()
            .map(|segment| self.annotate_segment(segment))
            .collect();

        ExplainedDocument {
            document: document.clone(),
            explanations: Explanations { segments },
        }
    }

    /// Annotate the components of a single segment
    #[must_use]
    pub fn annotate_segment(&self, segment: &RawSegment) -> AnnotatedSegment {
        let mapping = self.table.get(&segment.tag);
        trace!(
            tag = %segment.tag,
            known = mapping.is_some(),
            "Annotating segment"
        );

        let description = mapping.map_or_else(
            || format!("Segment {}", segment.tag),
            |m| m.segment_description.clone(),
        );

        let fields = segment
            .elements
            .iter()
            .enumerate()
            .flat_map(|(i, components)| {
                components
                    .iter()
                    .enumerate()
                    .map(move |(j, value)| annotate_field(segment, mapping, i, j, value))
            })
            .collect();

        AnnotatedSegment {
            segment: segment.tag.clone(),
            position: segment.position,
            description,
            fields,
        }
    }
}

/// Annotate `document` with `table`, or the built-in table when `table` is
/// absent or empty
#[must_use]
pub fn annotate(document: &Document, table: Option<&MappingTable>) -> ExplainedDocument {
    FieldAnnotator::new(table).annotate(document)
}

fn annotate_field(
    segment: &RawSegment,
    mapping: Option<&SegmentMapping>,
    element: usize,
    component: usize,
    value: &str,
) -> AnnotatedField {
    let path = FieldPath::new(segment.tag.as_str(), element + 1, component + 1).to_string();
    let entry = mapping.and_then(|m| m.field(&path));

    let name = entry.map_or_else(
        || format!("Component {}.{}", element + 1, component + 1),
        |e| e.name.clone(),
    );
    let mut description = entry.and_then(|e| e.description.clone());

    if let Some(meaning) = code_meaning(&segment.tag, entry, component, value) {
        description = Some(append_note(description, &format!("{} = {meaning}", value.trim())));
    }

    if segment.tag == DATE_TIME_TAG && component == DATE_VALUE_COMPONENT {
        let rendered = segment
            .component(element, DATE_FORMAT_COMPONENT)
            .and_then(|format_code| render_date(value, format_code));
        if let Some(rendered) = rendered {
            description = Some(append_note(description, &format!("read as {rendered}")));
        }
    }

    AnnotatedField {
        path,
        name,
        description,
        value: value.to_string(),
    }
}

/// Table codes first, then the built-in qualifier list for the first
/// component of qualified segments
fn code_meaning<'a>(
    tag: &str,
    entry: Option<&'a MappingEntry>,
    component: usize,
    value: &str,
) -> Option<&'a str> {
    let code = value.trim();
    if code.is_empty() {
        return None;
    }

    entry.and_then(|e| e.meaning_of(code)).or_else(|| {
        if component == 0 {
            builtin_qualifier(tag, code)
        } else {
            None
        }
    })
}

fn append_note(description: Option<String>, note: &str) -> String {
    match description {
        Some(description) => format!("{description} ({note})"),
        None => note.to_string(),
    }
}
