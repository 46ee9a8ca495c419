//! Integration tests for structural validation over real sample files.

use edi_adapter_edifact::parse;
use edi_validation::{ErrorCode, StructuralValidator, ValidationConfig, validate};
use std::fs;
use std::path::PathBuf;

fn sample(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata/samples")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {}", path.display(), err))
}

#[test]
fn orders_sample_is_structurally_valid() -> anyhow::Result<()> {
    let doc = parse(&sample("orders_d96a.edi"))?;
    let report = validate(&doc, Some("ORDERS"));

    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    Ok(())
}

#[test]
fn desadv_sample_with_custom_una_is_structurally_valid() -> anyhow::Result<()> {
    let doc = parse(&sample("desadv_custom_una.edi"))?;
    assert_eq!(doc.delimiters.segment_terminator(), '~');

    let report = validate(&doc, Some("DESADV"));
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
    Ok(())
}

#[test]
fn message_type_mismatch_points_at_header() -> anyhow::Result<()> {
    let doc = parse(&sample("orders_d96a.edi"))?;
    let unh_position = doc.first("UNH").map(|s| s.position);

    let report = validate(&doc, Some("INVOIC"));

    assert_eq!(report.count(ErrorCode::FieldValueMismatch), 1);
    let mismatch = report
        .errors
        .iter()
        .find(|e| e.code == ErrorCode::FieldValueMismatch)
        .expect("mismatch reported");
    assert_eq!(mismatch.position, unh_position);
    assert_eq!(mismatch.value.as_deref(), Some("ORDERS"));
    Ok(())
}

#[test]
fn corrupted_header_is_reported_as_malformed() -> anyhow::Result<()> {
    let text = sample("orders_d96a.edi").replace("UNH+", "UXH+");
    let doc = parse(&text)?;
    let report = StructuralValidator::new().validate(&doc);

    assert!(report.errors.iter().any(|e| e.code.signals_malformed_structure()));
    assert!(report.has_code(ErrorCode::UnknownSegmentTag));
    assert!(report.has_code(ErrorCode::SegmentOutOfSequence));
    Ok(())
}

#[test]
fn tokenization_survives_every_error() -> anyhow::Result<()> {
    let doc = parse("UNB+UNOA:3+S+R+240101:1200+A'UNH+1+INVOIC'UNH+2+X'unt'UNZ+7+B'")?;
    let config = ValidationConfig::default().expect_message_type("ORDERS");
    let report = StructuralValidator::with_config(config).validate(&doc);

    // Document is intact even though nearly every check fails
    assert_eq!(doc.tags(), vec!["UNB", "UNH", "UNH", "UNT", "UNZ"]);
    assert!(report.has_code(ErrorCode::FieldValueMismatch));
    assert!(report.has_code(ErrorCode::UntSegmentCountMissing));
    assert!(report.has_code(ErrorCode::SegmentOutOfSequence));
    assert!(report.has_code(ErrorCode::UnzMessageCountMismatch));
    assert!(report.has_code(ErrorCode::InterchangeReferenceMismatch));
    Ok(())
}
