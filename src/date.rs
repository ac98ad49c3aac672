use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the timestamp shapes the backend has been seen to send.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|d| d.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| parse_date(text).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d-%m-%Y"))
        .ok()
}

/// Dashed dates are shown as DD/MM/YYYY, anything else is passed through as given.
pub fn display_date(text: Option<&str>) -> String {
    match text {
        None | Some("") => "N/A".to_string(),
        Some(text) if text.contains('-') => parse_timestamp(text)
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| text.to_string()),
        Some(text) => text.to_string(),
    }
}
