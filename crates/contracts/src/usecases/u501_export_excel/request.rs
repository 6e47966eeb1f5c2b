use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    /// Formatted workbook with embedded images
    Enhanced,
    /// Plain workbook without images
    Simple,
}

impl ExportKind {
    pub fn path(&self) -> &'static str {
        match self {
            ExportKind::Enhanced => "/export_excel",
            ExportKind::Simple => "/export_excel_simple",
        }
    }

    /// Used in the fallback download name
    pub fn slug(&self) -> &'static str {
        match self {
            ExportKind::Enhanced => "enhanced",
            ExportKind::Simple => "simple",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Enhanced => "enhanced report (with images)",
            ExportKind::Simple => "simple report",
        }
    }
}

/// Filters of the admin dashboard, sent as the export query string.
/// Empty values are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl ExportFilters {
    /// Builds filters from raw input values, treating blank strings as unset
    pub fn from_inputs(
        employee: &str,
        branch: &str,
        model: &str,
        date_from: &str,
        date_to: &str,
    ) -> Self {
        fn non_blank(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        Self {
            employee: non_blank(employee),
            branch: non_blank(branch),
            model: non_blank(model),
            date_from: non_blank(date_from),
            date_to: non_blank(date_to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_inputs_are_unset() {
        let filters = ExportFilters::from_inputs("  ", "Mall", "", "2024-01-01", "");
        assert_eq!(filters.employee, None);
        assert_eq!(filters.branch.as_deref(), Some("Mall"));
        assert_eq!(filters.date_from.as_deref(), Some("2024-01-01"));
        assert!(!filters.is_empty());
        assert!(ExportFilters::from_inputs("", "", "", "", "").is_empty());
    }

    #[test]
    fn test_unset_filters_are_not_serialized() {
        let filters = ExportFilters::from_inputs("", "Mall", "", "", "");
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({"branch": "Mall"})
        );
    }

    #[test]
    fn test_paths() {
        assert_eq!(ExportKind::Enhanced.path(), "/export_excel");
        assert_eq!(ExportKind::Simple.path(), "/export_excel_simple");
    }
}
