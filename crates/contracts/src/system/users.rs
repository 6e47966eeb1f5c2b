use serde::{Deserialize, Serialize};

use crate::domain::a001_branch::{BranchDto, NO_SHOP_CODE};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const MIN_BRANCH_FIELD_LEN: usize = 2;

/// Row of the admin user table, embedded by the host page as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub company_code: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub branches: Vec<String>,
}

/// Body of `POST /manage_user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ManageUserRequest {
    Add {
        name: String,
        full_name: Option<String>,
        company_code: String,
        password: String,
        is_admin: bool,
    },
    Edit {
        id: i64,
        name: String,
        full_name: Option<String>,
        company_code: String,
        /// `None` keeps the current password
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        is_admin: bool,
    },
    Delete {
        id: i64,
    },
}

/// Body of `POST /manage_user_branches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ManageUserBranchesRequest {
    AddBranch {
        user_id: i64,
        branch_name: String,
        branch_code: String,
    },
    RemoveBranch {
        user_id: i64,
        branch_id: i64,
    },
    AddMultipleBranches {
        user_id: i64,
        branches: Vec<BranchDto>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBranch {
    pub id: i64,
    pub branch_name: String,
    #[serde(default)]
    pub shop_code: String,
}

impl UserBranch {
    pub fn shop_code(&self) -> Option<&str> {
        let code = self.shop_code.trim();
        if code.is_empty() || code == NO_SHOP_CODE {
            None
        } else {
            Some(code)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBranchesResponse {
    pub success: bool,
    #[serde(default)]
    pub branches: Vec<UserBranch>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /change_admin_password`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeAdminPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_manage_user_is_tagged_by_action() {
        let add = ManageUserRequest::Add {
            name: "sara".to_string(),
            full_name: None,
            company_code: "E-17".to_string(),
            password: "secret1".to_string(),
            is_admin: false,
        };
        let value = serde_json::to_value(&add).unwrap();
        assert_eq!(value["action"], "add");
        assert_eq!(value["company_code"], "E-17");

        let edit = ManageUserRequest::Edit {
            id: 4,
            name: "sara".to_string(),
            full_name: Some("Sara K".to_string()),
            company_code: "E-17".to_string(),
            password: None,
            is_admin: true,
        };
        let value = serde_json::to_value(&edit).unwrap();
        assert_eq!(value["action"], "edit");
        assert!(value.get("password").is_none());

        let delete = serde_json::to_value(ManageUserRequest::Delete { id: 9 }).unwrap();
        assert_eq!(delete, json!({"action": "delete", "id": 9}));
    }

    #[test]
    fn test_branch_requests_use_server_action_names() {
        let req = ManageUserBranchesRequest::AddMultipleBranches {
            user_id: 2,
            branches: vec![BranchDto {
                name: "Downtown".to_string(),
                code: "123".to_string(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "action": "add_multiple_branches",
                "user_id": 2,
                "branches": [{"name": "Downtown", "code": "123"}]
            })
        );

        let req = ManageUserBranchesRequest::RemoveBranch {
            user_id: 2,
            branch_id: 11,
        };
        assert_eq!(serde_json::to_value(&req).unwrap()["action"], "remove_branch");
    }

    #[test]
    fn test_user_branch_placeholder_code() {
        let resp: UserBranchesResponse = serde_json::from_value(json!({
            "success": true,
            "branches": [
                {"id": 1, "branch_name": "Mall", "shop_code": "N/A"},
                {"id": 2, "branch_name": "Airport", "shop_code": "88"}
            ]
        }))
        .unwrap();
        assert_eq!(resp.branches[0].shop_code(), None);
        assert_eq!(resp.branches[1].shop_code(), Some("88"));
    }
}
