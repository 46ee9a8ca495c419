//! Built-in default mapping table
//!
//! Covers the envelope segments and the handful of segments shared by every
//! message type, so a document can always be explained without an external
//! table.

use crate::table::{Datatype, MappingEntry, MappingTable, SegmentMapping};
use std::sync::LazyLock;

static BUILTIN: LazyLock<MappingTable> = LazyLock::new(build);

/// The built-in table. Immutable; shared by every caller.
#[must_use]
pub fn builtin_table() -> &'static MappingTable {
    &BUILTIN
}

fn field(path: &str, name: &str) -> MappingEntry {
    MappingEntry::new(path, name)
}

fn build() -> MappingTable {
    let mut table = MappingTable::new();

    table.insert(
        "UNB",
        SegmentMapping::new(
            "Interchange header",
            vec![
                field("UNB/01/01", "Syntax identifier")
                    .with_description("Controlling agency and character repertoire, e.g. UNOA")
                    .required(),
                field("UNB/01/02", "Syntax version number").required(),
                field("UNB/02/01", "Interchange sender identification").required(),
                field("UNB/02/02", "Sender identification code qualifier"),
                field("UNB/03/01", "Interchange recipient identification").required(),
                field("UNB/03/02", "Recipient identification code qualifier"),
                field("UNB/04/01", "Date of preparation")
                    .with_datatype(Datatype::Date)
                    .required(),
                field("UNB/04/02", "Time of preparation")
                    .with_datatype(Datatype::Time)
                    .required(),
                field("UNB/05/01", "Interchange control reference")
                    .with_description("Unique reference repeated in UNZ")
                    .required(),
            ],
        ),
    );

    table.insert(
        "UNH",
        SegmentMapping::new(
            "Message header",
            vec![
                field("UNH/01/01", "Message reference number")
                    .with_description("Unique message reference repeated in UNT")
                    .required(),
                field("UNH/02/01", "Message type")
                    .with_description("Code identifying the message type, e.g. ORDERS")
                    .with_datatype(Datatype::Code)
                    .required(),
                field("UNH/02/02", "Message version number").required(),
                field("UNH/02/03", "Message release number").required(),
                field("UNH/02/04", "Controlling agency").required(),
                field("UNH/02/05", "Association assigned code"),
            ],
        ),
    );

    table.insert(
        "BGM",
        SegmentMapping::new(
            "Beginning of message",
            vec![
                field("BGM/01/01", "Document name code")
                    .with_description("Type of document or message")
                    .with_datatype(Datatype::Code),
                field("BGM/02/01", "Document identifier"),
                field("BGM/03/01", "Message function code").with_datatype(Datatype::Code),
            ],
        ),
    );

    table.insert(
        "DTM",
        SegmentMapping::new(
            "Date/time/period",
            vec![
                field("DTM/01/01", "Date or time or period function code qualifier")
                    .with_description("What the date stands for")
                    .with_datatype(Datatype::Code)
                    .required(),
                field("DTM/01/02", "Date or time or period text"),
                field("DTM/01/03", "Date or time or period format code")
                    .with_datatype(Datatype::Code),
            ],
        ),
    );

    table.insert(
        "RFF",
        SegmentMapping::new(
            "Reference",
            vec![
                field("RFF/01/01", "Reference code qualifier")
                    .with_description("What the reference identifies")
                    .with_datatype(Datatype::Code)
                    .required(),
                field("RFF/01/02", "Reference identifier"),
            ],
        ),
    );

    table.insert(
        "NAD",
        SegmentMapping::new(
            "Name and address",
            vec![
                field("NAD/01/01", "Party function code qualifier")
                    .with_datatype(Datatype::Code)
                    .required(),
                field("NAD/02/01", "Party identifier"),
                field("NAD/02/02", "Code list identification code"),
                field("NAD/02/03", "Code list responsible agency code"),
                field("NAD/04/01", "Party name"),
                field("NAD/05/01", "Street and number or post office box identifier"),
                field("NAD/06/01", "City name"),
                field("NAD/08/01", "Postal identification code"),
                field("NAD/09/01", "Country identifier"),
            ],
        ),
    );

    table.insert(
        "UNT",
        SegmentMapping::new(
            "Message trailer",
            vec![
                field("UNT/01/01", "Number of segments in a message")
                    .with_description("Counts UNH through UNT inclusive")
                    .with_datatype(Datatype::Numeric)
                    .required(),
                field("UNT/02/01", "Message reference number").required(),
            ],
        ),
    );

    table.insert(
        "UNZ",
        SegmentMapping::new(
            "Interchange trailer",
            vec![
                field("UNZ/01/01", "Interchange control count")
                    .with_datatype(Datatype::Numeric)
                    .required(),
                field("UNZ/02/01", "Interchange control reference").required(),
            ],
        ),
    );

    table
}
