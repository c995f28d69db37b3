//! Field Mapping - The Form Layout as Data
//!
//! One entry per semantic field: where the field lands in the template and how
//! its value is rendered. The table is fixed at build time and encodes four
//! zones of the paper form, one template table each:
//!
//! - table 0: inspection details header
//! - table 1: checklist grid
//! - table 2: spare keys checkbox
//! - table 3: signature block
//!
//! Changing the form layout means editing this table, never the traversal.

use crate::document::CellAt;
use crate::format;
use crate::record::InspectionRecord;

/// How a field's raw value becomes cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text, written even when empty.
    Text,
    /// Plain text, suppressed when empty so a blank template cell stays blank.
    OptionalText,
    /// `"<primary> (<secondary>)"` when the secondary field is present.
    Composite { secondary: &'static str },
    /// One of the two checkbox glyphs. A missing field renders unticked.
    Checkbox,
    /// ISO-8601 timestamp as `DD/MM/YYYY`; suppressed when empty, passed
    /// through raw when unparseable.
    Date,
}

/// Static entry binding a record field to a template cell.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub field: &'static str,
    pub at: CellAt,
    pub kind: FieldKind,
}

const fn text(field: &'static str, table: usize, row: usize, col: usize) -> FieldMapping {
    FieldMapping {
        field,
        at: CellAt::new(table, row, col),
        kind: FieldKind::Text,
    }
}

const fn date(field: &'static str, table: usize, row: usize, col: usize) -> FieldMapping {
    FieldMapping {
        field,
        at: CellAt::new(table, row, col),
        kind: FieldKind::Date,
    }
}

const fn check(field: &'static str, row: usize, col: usize) -> FieldMapping {
    FieldMapping {
        field,
        at: CellAt::new(1, row, col),
        kind: FieldKind::Checkbox,
    }
}

/// The full layout of the inspection form.
pub static FIELD_MAPPINGS: &[FieldMapping] = &[
    // Inspection details (table 0)
    text("vehicleRegistrationNo", 0, 0, 1),
    FieldMapping {
        field: "storeName",
        at: CellAt::new(0, 0, 3),
        kind: FieldKind::Composite {
            secondary: "storeNumber",
        },
    },
    text("odometerReading", 0, 1, 1),
    date("inspectionDate", 0, 1, 3),
    text("employeeName", 0, 2, 1),
    // Checklist grid (table 1). Left column holds exterior/mechanical items,
    // right column lights and cab items; rows 3 and 8 carry section headers
    // on one side only.
    check("tyresTreadDepth", 1, 0),
    check("tailLights", 1, 2),
    check("wheelNuts", 2, 0),
    check("headlightsLowBeam", 2, 2),
    check("headlightsHighBeam", 3, 2),
    check("cleanliness", 4, 0),
    check("reverseLights", 4, 2),
    check("bodyDamage", 5, 0),
    check("brakeLights", 5, 2),
    check("mirrorsWindows", 6, 0),
    check("signage", 7, 0),
    check("windscreenWipers", 7, 2),
    check("horn", 8, 2),
    check("engineOilWater", 9, 0),
    check("indicators", 9, 2),
    check("brakes", 10, 0),
    check("seatBelts", 10, 2),
    check("transmission", 11, 0),
    check("cabCleanliness", 11, 2),
    check("serviceLogBook", 12, 2),
    // Spare keys checkbox (table 2)
    FieldMapping {
        field: "spareKeys",
        at: CellAt::new(2, 0, 0),
        kind: FieldKind::Checkbox,
    },
    // Signature block (table 3): signature line, then the inspection date
    // repeated under both signature columns.
    FieldMapping {
        field: "signature",
        at: CellAt::new(3, 1, 0),
        kind: FieldKind::OptionalText,
    },
    date("inspectionDate", 3, 2, 0),
    date("inspectionDate", 3, 2, 2),
];

/// Resolve a record into `(cell, display text)` pairs in declaration order.
///
/// Date and optional-text entries whose display text ends up empty are
/// suppressed: no data supplied means the template cell keeps whatever it
/// already shows, which is distinct from explicitly writing an empty string.
pub fn resolve(record: &InspectionRecord) -> Vec<(CellAt, String)> {
    let mut pairs = Vec::with_capacity(FIELD_MAPPINGS.len());

    for mapping in FIELD_MAPPINGS {
        let display = match mapping.kind {
            FieldKind::Text | FieldKind::OptionalText => {
                format::format_text(record.text(mapping.field))
            }
            FieldKind::Composite { secondary } => format::format_composite(
                record.text(mapping.field).unwrap_or_default(),
                record.text(secondary).unwrap_or_default(),
            ),
            FieldKind::Checkbox => format::format_checkbox(record.flag(mapping.field)).to_string(),
            FieldKind::Date => {
                format::format_date(record.text(mapping.field).unwrap_or_default())
            }
        };

        let suppress_empty = matches!(mapping.kind, FieldKind::Date | FieldKind::OptionalText);
        if display.is_empty() && suppress_empty {
            continue;
        }

        pairs.push((mapping.at, display));
    }

    pairs
}
