pub mod request;

pub use request::{ExportFilters, ExportKind};

use crate::usecases::common::UseCaseMetadata;

/// `Accept` header sent with every export request
pub const SPREADSHEET_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Substring of the response content type that marks a real workbook
pub const SPREADSHEET_MARKER: &str = "spreadsheet";

/// Text the server flashes into its dashboard page when the filters match nothing
pub const NO_DATA_MARKER: &str = "لا توجد بيانات للتصدير";

pub struct ExportExcel;

impl UseCaseMetadata for ExportExcel {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "export_excel"
    }

    fn display_name() -> &'static str {
        "Excel export"
    }

    fn description() -> &'static str {
        "Download the filtered POP material entries as an .xlsx workbook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        assert_eq!(ExportExcel::full_name(), "u501_export_excel");
    }
}
