use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar date of an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (a trailing `Z` is UTC), a date-time without offset, or a
/// bare date. The date is taken in the timestamp's own offset.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
