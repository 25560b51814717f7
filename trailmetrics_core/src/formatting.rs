use anyhow::Result;
use time::format_description::well_known;
use time::{OffsetDateTime, UtcOffset};

/// Formats 'date' into a string like "2024-09-01T05:10:44Z", converting it
/// to UTC first. This is the format that GPX files contain.
pub fn format_utc_date(date: &OffsetDateTime) -> Result<String> {
    Ok(date.to_offset(UtcOffset::UTC).format(&well_known::Rfc3339)?)
}

/// Formats a distance in metres as km with 2 decimal places.
pub fn format_km(metres: f64) -> String {
    format!("{:.2}km", metres / 1000.0)
}
