//! Built-in qualifier code lists and date rendering
//!
//! The code lists are seeds, not complete directories: a mapping table's own
//! `codes` for a field take precedence.

use chrono::{NaiveDate, NaiveDateTime};

/// Tag of the date/time/period segment
pub const DATE_TIME_TAG: &str = "DTM";
/// Tag of the reference segment
pub const REFERENCE_TAG: &str = "RFF";

/// Date or time or period function code qualifier (2005)
const DATE_TIME_QUALIFIERS: &[(&str, &str)] = &[
    ("2", "Delivery date/time, requested"),
    ("3", "Invoice date/time"),
    ("4", "Order date/time"),
    ("7", "Effective date/time"),
    ("10", "Shipment date/time, requested"),
    ("11", "Despatch date and/or time"),
    ("17", "Delivery date/time, estimated"),
    ("35", "Delivery date/time, actual"),
    ("36", "Expiry date"),
    ("50", "Goods receipt date/time"),
    ("63", "Delivery date/time, latest"),
    ("64", "Delivery date/time, earliest"),
    ("69", "Delivery date/time, promised for"),
    ("132", "Arrival date/time, estimated"),
    ("133", "Departure date/time, estimated"),
    ("137", "Document/message date/time"),
    ("171", "Reference date/time"),
    ("178", "Arrival date/time, actual"),
    ("186", "Departure date/time, actual"),
    ("194", "Start date/time"),
    ("206", "End date/time"),
    ("263", "Invoicing period"),
];

/// Reference code qualifier (1153)
const REFERENCE_QUALIFIERS: &[(&str, &str)] = &[
    ("AAK", "Despatch advice number"),
    ("AAS", "Transport document number"),
    ("ACE", "Related document number"),
    ("ACW", "Reference number to previous message"),
    ("ALO", "Receiving advice number"),
    ("BM", "Bill of lading number"),
    ("CR", "Customer reference number"),
    ("CT", "Contract number"),
    ("DQ", "Delivery note number"),
    ("IV", "Invoice number"),
    ("LI", "Line item reference number"),
    ("ON", "Order number"),
    ("PL", "Price list number"),
    ("PQ", "Payment reference"),
    ("SS", "Seller's reference number"),
    ("TN", "Transaction/reference number"),
    ("VA", "VAT registration number"),
    ("VN", "Order number (supplier)"),
    ("ZZZ", "Mutually defined reference number"),
];

fn lookup(list: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    let code = code.trim();
    list.iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, meaning)| *meaning)
}

/// Meaning of a date/time qualifier
#[must_use]
pub fn date_time_qualifier(code: &str) -> Option<&'static str> {
    lookup(DATE_TIME_QUALIFIERS, code)
}

/// Meaning of a reference qualifier
#[must_use]
pub fn reference_qualifier(code: &str) -> Option<&'static str> {
    lookup(REFERENCE_QUALIFIERS, code)
}

/// Built-in qualifier meaning for the first component of `tag`, if `tag`
/// is a qualified segment
#[must_use]
pub fn builtin_qualifier(tag: &str, code: &str) -> Option<&'static str> {
    match tag {
        DATE_TIME_TAG => date_time_qualifier(code),
        REFERENCE_TAG => reference_qualifier(code),
        _ => None,
    }
}

/// Render a DTM value according to its format code (2379).
///
/// Returns `None` for unknown format codes and for values that do not match
/// their declared format.
#[must_use]
pub fn render_date(value: &str, format_code: &str) -> Option<String> {
    let value = value.trim();
    match format_code.trim() {
        "101" => date(value, "%y%m%d"),
        "102" => date(value, "%Y%m%d"),
        "201" => date_time(value, "%y%m%d%H%M", "%Y-%m-%d %H:%M"),
        "203" => date_time(value, "%Y%m%d%H%M", "%Y-%m-%d %H:%M"),
        "204" => date_time(value, "%Y%m%d%H%M%S", "%Y-%m-%d %H:%M:%S"),
        "718" => {
            let (start, end) = value.split_once('-')?;
            Some(format!(
                "{} to {}",
                date(start, "%Y%m%d")?,
                date(end, "%Y%m%d")?
            ))
        }
        _ => None,
    }
}

fn date(value: &str, format: &str) -> Option<String> {
    NaiveDate::parse_from_str(value, format)
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

fn date_time(value: &str, format: &str, output: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(value, format)
        .ok()
        .map(|d| d.format(output).to_string())
}
