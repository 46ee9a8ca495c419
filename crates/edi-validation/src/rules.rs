//! Structural rules
//!
//! Every rule is independent and conservative: it reports only on a positive
//! signal in the document and never on the mere absence of a segment.

use crate::reporter::{ErrorCode, StructuralError, ValidationReport};
use edi_ir::{Document, RawSegment};

pub const INTERCHANGE_HEADER: &str = "UNB";
pub const INTERCHANGE_TRAILER: &str = "UNZ";
pub const GROUP_HEADER: &str = "UNG";
pub const MESSAGE_HEADER: &str = "UNH";
pub const MESSAGE_TRAILER: &str = "UNT";

/// Service segment tags defined by ISO 9735.
///
/// Tags starting with `U` are reserved for service segments, so any other
/// `U` tag is unknown.
pub const SERVICE_SEGMENT_TAGS: &[&str] = &[
    "UCD", "UCF", "UCI", "UCM", "UCS", "UGH", "UGT", "UIB", "UIH", "UIR", "UIT", "UIZ", "UNA",
    "UNB", "UNE", "UNG", "UNH", "UNO", "UNP", "UNQ", "UNR", "UNS", "UNT", "UNZ", "USA", "USB",
    "USC", "USD", "USE", "USF", "USH", "USL", "USR", "UST", "USU", "USX", "USY",
];

/// Check that every tag is three letters and that `U` tags are known
/// service segments.
pub fn check_segment_tags(doc: &Document, report: &mut ValidationReport) {
    for segment in &doc.segments {
        let tag = segment.tag.as_str();
        let well_formed = tag.len() == 3 && tag.bytes().all(|b| b.is_ascii_uppercase());

        if !well_formed {
            report.push(
                StructuralError::new(
                    ErrorCode::InvalidSegmentTag,
                    format!("Segment tag '{tag}' is not three letters"),
                )
                .at(segment)
                .with_value(tag),
            );
        } else if tag.starts_with('U') && !SERVICE_SEGMENT_TAGS.contains(&tag) {
            report.push(
                StructuralError::new(
                    ErrorCode::UnknownSegmentTag,
                    format!("Segment tag '{tag}' is reserved for service segments but unknown"),
                )
                .at(segment)
                .with_value(tag),
            );
        }
    }
}

/// Compare the message type in the first UNH against `expected`
pub fn check_message_type(doc: &Document, expected: &str, report: &mut ValidationReport) {
    let Some(unh) = doc.first(MESSAGE_HEADER) else {
        return;
    };

    // A header without a type has nothing to compare
    let Some(actual) = unh.non_empty_component(1, 0) else {
        return;
    };
    if actual.eq_ignore_ascii_case(expected.trim()) {
        return;
    }

    report.push(
        StructuralError::new(
            ErrorCode::FieldValueMismatch,
            format!(
                "Expected message type '{}', found '{actual}'",
                expected.trim()
            ),
        )
        .at(unh)
        .with_field("UNH/02/01")
        .with_value(actual),
    );
}

/// Check that the last UNT carries a numeric segment count
pub fn check_trailer_count_present(doc: &Document, report: &mut ValidationReport) {
    let Some(unt) = doc.last(MESSAGE_TRAILER) else {
        return;
    };

    if declared_count(unt, 0).is_none() {
        let mut error = StructuralError::new(
            ErrorCode::UntSegmentCountMissing,
            "Message trailer has no numeric segment count",
        )
        .at(unt)
        .with_field("UNT/01/01");
        if let Some(raw) = unt.non_empty_component(0, 0) {
            error = error.with_value(raw);
        }
        report.push(error);
    }
}

/// Which envelope checks [`check_envelopes`] runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeChecks {
    pub sequence: bool,
    pub counts: bool,
    pub references: bool,
}

/// Walk UNB/UNG/UNH/UNT/UNZ in order, checking nesting, counts and
/// control references.
pub fn check_envelopes(doc: &Document, checks: EnvelopeChecks, report: &mut ValidationReport) {
    let mut open_message: Option<&RawSegment> = None;
    let mut open_interchange: Option<InterchangeState<'_>> = None;

    for segment in &doc.segments {
        match segment.tag.as_str() {
            INTERCHANGE_HEADER => {
                if let Some(previous) = &open_interchange {
                    if checks.sequence {
                        report.push(out_of_sequence(
                            segment,
                            format!(
                                "UNB while interchange opened at segment {} is not closed",
                                previous.header.position
                            ),
                        ));
                    }
                }
                open_interchange = Some(InterchangeState::new(segment));
            }
            GROUP_HEADER => {
                if let Some(interchange) = open_interchange.as_mut() {
                    interchange.groups += 1;
                }
            }
            MESSAGE_HEADER => {
                if let Some(previous) = open_message {
                    if checks.sequence {
                        report.push(out_of_sequence(
                            segment,
                            format!(
                                "UNH while message opened at segment {} is not closed",
                                previous.position
                            ),
                        ));
                    }
                }
                open_message = Some(segment);
                if let Some(interchange) = open_interchange.as_mut() {
                    interchange.messages += 1;
                }
            }
            MESSAGE_TRAILER => match open_message.take() {
                Some(header) => {
                    if checks.counts {
                        check_message_count(header, segment, report);
                    }
                    if checks.references {
                        check_reference(
                            header,
                            segment,
                            ErrorCode::MessageReferenceMismatch,
                            "UNT/02/01",
                            report,
                        );
                    }
                }
                None => {
                    if checks.sequence {
                        report.push(out_of_sequence(segment, "UNT without a preceding UNH"));
                    }
                }
            },
            INTERCHANGE_TRAILER => {
                if let Some(header) = open_message.take() {
                    if checks.sequence {
                        report.push(out_of_sequence(
                            segment,
                            format!(
                                "UNZ while message opened at segment {} is not closed",
                                header.position
                            ),
                        ));
                    }
                }
                match open_interchange.take() {
                    Some(interchange) => {
                        if checks.counts {
                            interchange.check_count(segment, report);
                        }
                        if checks.references {
                            check_reference_at(
                                interchange.header,
                                4,
                                segment,
                                ErrorCode::InterchangeReferenceMismatch,
                                "UNZ/02/01",
                                report,
                            );
                        }
                    }
                    None => {
                        if checks.sequence {
                            report.push(out_of_sequence(segment, "UNZ without a preceding UNB"));
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

struct InterchangeState<'a> {
    header: &'a RawSegment,
    messages: usize,
    groups: usize,
}

impl<'a> InterchangeState<'a> {
    fn new(header: &'a RawSegment) -> Self {
        Self {
            header,
            messages: 0,
            groups: 0,
        }
    }

    /// UNZ counts groups when the interchange uses them, messages otherwise
    fn check_count(&self, trailer: &RawSegment, report: &mut ValidationReport) {
        let Some(declared) = declared_count(trailer, 0) else {
            return;
        };
        let actual = if self.groups > 0 {
            self.groups
        } else {
            self.messages
        };

        if declared != actual {
            report.push(
                StructuralError::new(
                    ErrorCode::UnzMessageCountMismatch,
                    format!("UNZ declares {declared} messages, interchange holds {actual}"),
                )
                .at(trailer)
                .with_field("UNZ/01/01")
                .with_value(declared.to_string()),
            );
        }
    }
}

fn check_message_count(header: &RawSegment, trailer: &RawSegment, report: &mut ValidationReport) {
    let Some(declared) = declared_count(trailer, 0) else {
        return;
    };
    let actual = trailer.position + 1 - header.position;

    if declared != actual {
        report.push(
            StructuralError::new(
                ErrorCode::UntSegmentCountMismatch,
                format!("UNT declares {declared} segments, message holds {actual}"),
            )
            .at(trailer)
            .with_field("UNT/01/01")
            .with_value(declared.to_string()),
        );
    }
}

fn check_reference(
    header: &RawSegment,
    trailer: &RawSegment,
    code: ErrorCode,
    field: &str,
    report: &mut ValidationReport,
) {
    check_reference_at(header, 0, trailer, code, field, report);
}

/// Compare header element `header_element` with the trailer's second element
fn check_reference_at(
    header: &RawSegment,
    header_element: usize,
    trailer: &RawSegment,
    code: ErrorCode,
    field: &str,
    report: &mut ValidationReport,
) {
    let (Some(expected), Some(actual)) = (
        header.non_empty_component(header_element, 0),
        trailer.non_empty_component(1, 0),
    ) else {
        return;
    };

    if expected != actual {
        report.push(
            StructuralError::new(
                code,
                format!(
                    "{} reference '{actual}' does not match {} reference '{expected}'",
                    trailer.tag, header.tag
                ),
            )
            .at(trailer)
            .with_field(field)
            .with_value(actual),
        );
    }
}

fn declared_count(segment: &RawSegment, element: usize) -> Option<usize> {
    segment
        .non_empty_component(element, 0)
        .and_then(|v| v.parse().ok())
}

fn out_of_sequence(segment: &RawSegment, message: impl Into<String>) -> StructuralError {
    StructuralError::new(ErrorCode::SegmentOutOfSequence, message).at(segment)
}
