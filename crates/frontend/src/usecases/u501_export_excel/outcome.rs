//! Deciding what an export response is: a workbook to save or an error to show

use chrono::{DateTime, Utc};
use contracts::shared::api_message::ApiMessage;
use contracts::usecases::u501_export_excel::{ExportKind, NO_DATA_MARKER, SPREADSHEET_MARKER};
use thiserror::Error;

use crate::shared::date_utils::export_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No data to export for the selected filters")]
    NoData,
    #[error("Failed to create Excel file")]
    NotSpreadsheet,
    #[error("The exported file is empty")]
    EmptyFile,
    #[error("{}", .message.clone().unwrap_or_else(|| format!("Export failed with HTTP {}", .status)))]
    Status { status: u16, message: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Browser error: {0}")]
    Browser(String),
}

pub fn is_spreadsheet(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(SPREADSHEET_MARKER)
}

/// Error for a body that is not a workbook. `status` is `None` when the
/// response was 2xx but carried the wrong content type.
pub fn classify_failure(status: Option<u16>, body: &str) -> ExportError {
    if body.contains(NO_DATA_MARKER) {
        return ExportError::NoData;
    }
    match status {
        Some(status) => ExportError::Status {
            status,
            message: serde_json::from_str::<ApiMessage>(body)
                .ok()
                .map(|m| m.message)
                .filter(|m| !m.trim().is_empty()),
        },
        None => ExportError::NotSpreadsheet,
    }
}

pub fn check_size(size: u64) -> Result<(), ExportError> {
    if size == 0 {
        Err(ExportError::EmptyFile)
    } else {
        Ok(())
    }
}

/// File name from a `Content-Disposition` header, quotes stripped.
/// `filename*=UTF-8''...` wins over plain `filename=`.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.rsplit("''").next().unwrap_or(value);
                if let Ok(decoded) = urlencoding::decode(encoded) {
                    if !decoded.trim().is_empty() {
                        return Some(decoded.into_owned());
                    }
                }
            }
            "filename" if !value.is_empty() => plain = Some(value.to_string()),
            _ => {}
        }
    }
    plain
}

/// `pop_materials_{simple|enhanced}_{YYYYMMDDTHHMMSS}.xlsx`
pub fn fallback_filename(kind: ExportKind, at: DateTime<Utc>) -> String {
    format!("pop_materials_{}_{}.xlsx", kind.slug(), export_timestamp(at))
}

pub fn download_name(disposition: Option<&str>, kind: ExportKind, at: DateTime<Utc>) -> String {
    disposition
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| fallback_filename(kind, at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_content_type_detection() {
        assert!(is_spreadsheet(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        ));
        assert!(!is_spreadsheet("text/html; charset=utf-8"));
    }

    #[test]
    fn test_no_data_page_is_recognized() {
        let body = format!("<html><div class=\"flash\">{}</div></html>", NO_DATA_MARKER);
        assert_eq!(classify_failure(None, &body), ExportError::NoData);
        assert_eq!(classify_failure(Some(404), &body), ExportError::NoData);
    }

    #[test]
    fn test_other_failures() {
        assert_eq!(
            classify_failure(None, "<html>Dashboard</html>"),
            ExportError::NotSpreadsheet
        );
        let err = classify_failure(Some(500), r#"{"success": false, "message": "disk full"}"#);
        assert_eq!(err.to_string(), "disk full");
        let err = classify_failure(Some(502), "Bad Gateway");
        assert_eq!(err.to_string(), "Export failed with HTTP 502");
        assert_eq!(check_size(0), Err(ExportError::EmptyFile));
        assert_eq!(check_size(12), Ok(()));
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="pop_report.xlsx""#).as_deref(),
            Some("pop_report.xlsx")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=plain.xlsx").as_deref(),
            Some("plain.xlsx")
        );
        assert_eq!(
            filename_from_disposition(
                r#"attachment; filename="fallback.xlsx"; filename*=UTF-8''pop%20report.xlsx"#
            )
            .as_deref(),
            Some("pop report.xlsx")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn test_fallback_filename() {
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 5).unwrap();
        assert_eq!(
            download_name(None, ExportKind::Simple, at),
            "pop_materials_simple_20261017T093005.xlsx"
        );
        assert_eq!(
            download_name(Some("inline"), ExportKind::Enhanced, at),
            "pop_materials_enhanced_20261017T093005.xlsx"
        );
    }
}
