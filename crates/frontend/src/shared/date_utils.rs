/// Utilities for date and time formatting
use chrono::{DateTime, Utc};

/// Compact UTC timestamp used in download names
/// Example: 2024-03-15T14:02:26Z -> "20240315T140226"
pub fn export_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%S").to_string()
}

/// Current time taken from the browser clock
pub fn now_utc() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(export_timestamp(at), "20240315T140226");
    }

    #[test]
    fn test_export_timestamp_pads_fields() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(export_timestamp(at), "20250102T030405");
    }
}
