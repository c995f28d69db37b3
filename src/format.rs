//! Value Formatting - Raw Field Values to Cell Display Text
//!
//! Formatting never fails a run: unparseable dates degrade to the raw input.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Glyph written for a ticked checklist item.
pub const CHECKBOX_CHECKED: &str = "☑";
/// Glyph written for an unticked checklist item.
pub const CHECKBOX_UNCHECKED: &str = "□";

/// Pass a free-text value through, mapping an absent value to empty text.
pub fn format_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// One of exactly two fixed glyphs. There is no indeterminate state.
pub fn format_checkbox(checked: bool) -> &'static str {
    if checked {
        CHECKBOX_CHECKED
    } else {
        CHECKBOX_UNCHECKED
    }
}

/// Reformat an ISO-8601 timestamp as `DD/MM/YYYY`.
///
/// Accepts a trailing `Z` or explicit offset, an offset-less datetime, or a
/// bare date. On any parse failure the input is returned unchanged so a
/// hand-typed date still lands in the cell.
pub fn format_date(value: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y";

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(DISPLAY).to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return dt.format(DISPLAY).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format(DISPLAY).to_string();
    }

    value.to_string()
}

/// Combine a primary value with a secondary identifier: `"Store (5)"`.
/// An empty secondary renders the primary alone.
pub fn format_composite(primary: &str, secondary: &str) -> String {
    if secondary.is_empty() {
        primary.to_string()
    } else {
        format!("{} ({})", primary, secondary)
    }
}
