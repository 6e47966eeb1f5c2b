use serde::{Deserialize, Serialize};

/// Placeholder the server emits when a branch has no shop code on record.
pub const NO_SHOP_CODE: &str = "N/A";

/// Branch as returned by `/get_branches` and `/get_branch_by_code`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDto {
    pub name: String,
    pub code: String,
}

impl BranchDto {
    /// Shop code, or `None` when the server reported the `N/A` placeholder
    pub fn shop_code(&self) -> Option<&str> {
        let code = self.code.trim();
        if code.is_empty() || code == NO_SHOP_CODE {
            None
        } else {
            Some(code)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchesResponse {
    pub success: bool,
    #[serde(default)]
    pub branches: Vec<BranchDto>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchByCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub branch: Option<BranchDto>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_code_is_absent() {
        let branch = BranchDto {
            name: "Mall".to_string(),
            code: "N/A".to_string(),
        };
        assert_eq!(branch.shop_code(), None);

        let branch = BranchDto {
            name: "Mall".to_string(),
            code: " 204 ".to_string(),
        };
        assert_eq!(branch.shop_code(), Some("204"));
    }

    #[test]
    fn test_failed_lookup_decodes_without_branch() {
        let resp: BranchByCodeResponse =
            serde_json::from_str(r#"{"success": false, "message": "Branch not found"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.branch.is_none());
        assert_eq!(resp.message.as_deref(), Some("Branch not found"));
    }
}
