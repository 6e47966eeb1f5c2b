//! Admin console form rules, checked before any request is sent

use contracts::domain::a001_branch::BranchDto;
use contracts::system::users::{
    AdminUser, ChangeAdminPasswordRequest, ManageUserRequest, MIN_BRANCH_FIELD_LEN,
    MIN_PASSWORD_LEN,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminFormError {
    #[error("Name and company code are required.")]
    MissingIdentity,
    #[error("Password is required for new users.")]
    MissingPassword,
    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
    #[error("All password fields are required.")]
    PasswordFieldsMissing,
    #[error("New passwords do not match.")]
    PasswordMismatch,
    #[error("Branch name and code must be at least 2 characters each.")]
    BranchFieldTooShort,
    #[error("Add at least one branch.")]
    NoBranches,
}

/// Fields of the add/edit user modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    /// `Some` when editing an existing user
    pub id: Option<i64>,
    pub name: String,
    pub full_name: String,
    pub company_code: String,
    pub password: String,
    pub is_admin: bool,
}

impl UserForm {
    pub fn from_user(user: &AdminUser) -> Self {
        Self {
            id: Some(user.id),
            name: user.name.clone(),
            full_name: user.full_name.clone().unwrap_or_default(),
            company_code: user.company_code.clone(),
            password: String::new(),
            is_admin: user.is_admin,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Editing keeps the current password when the field is left empty
    pub fn to_request(&self) -> Result<ManageUserRequest, AdminFormError> {
        let name = self.name.trim().to_string();
        let company_code = self.company_code.trim().to_string();
        if name.is_empty() || company_code.is_empty() {
            return Err(AdminFormError::MissingIdentity);
        }
        let full_name = Some(self.full_name.trim().to_string()).filter(|n| !n.is_empty());

        let password = (!self.password.is_empty()).then(|| self.password.clone());
        if let Some(p) = &password {
            if p.chars().count() < MIN_PASSWORD_LEN {
                return Err(AdminFormError::PasswordTooShort);
            }
        }

        match self.id {
            Some(id) => Ok(ManageUserRequest::Edit {
                id,
                name,
                full_name,
                company_code,
                password,
                is_admin: self.is_admin,
            }),
            None => Ok(ManageUserRequest::Add {
                name,
                full_name,
                company_code,
                password: password.ok_or(AdminFormError::MissingPassword)?,
                is_admin: self.is_admin,
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChangeForm {
    /// Live indicator on the confirm field
    pub fn mismatch(&self) -> bool {
        !self.confirm.is_empty() && self.confirm != self.new
    }

    pub fn to_request(&self) -> Result<ChangeAdminPasswordRequest, AdminFormError> {
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(AdminFormError::PasswordFieldsMissing);
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminFormError::PasswordTooShort);
        }
        if self.new != self.confirm {
            return Err(AdminFormError::PasswordMismatch);
        }
        Ok(ChangeAdminPasswordRequest {
            current_password: self.current.clone(),
            new_password: self.new.clone(),
        })
    }
}

/// One branch to assign: name and code, both trimmed
pub fn branch_entry(name: &str, code: &str) -> Result<BranchDto, AdminFormError> {
    let (name, code) = (name.trim(), code.trim());
    if name.chars().count() < MIN_BRANCH_FIELD_LEN || code.chars().count() < MIN_BRANCH_FIELD_LEN {
        return Err(AdminFormError::BranchFieldTooShort);
    }
    Ok(BranchDto {
        name: name.to_string(),
        code: code.to_string(),
    })
}

/// Rows of the "add several" form. Fully blank rows are skipped.
pub fn branch_batch(rows: &[(String, String)]) -> Result<Vec<BranchDto>, AdminFormError> {
    let branches = rows
        .iter()
        .filter(|(name, code)| !(name.trim().is_empty() && code.trim().is_empty()))
        .map(|(name, code)| branch_entry(name, code))
        .collect::<Result<Vec<_>, _>>()?;
    if branches.is_empty() {
        return Err(AdminFormError::NoBranches);
    }
    Ok(branches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: Option<i64>, password: &str) -> UserForm {
        UserForm {
            id,
            name: " sara ".to_string(),
            full_name: "  ".to_string(),
            company_code: "E-17".to_string(),
            password: password.to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_add_requires_password() {
        assert_eq!(form(None, "").to_request(), Err(AdminFormError::MissingPassword));
        assert_eq!(form(None, "abc").to_request(), Err(AdminFormError::PasswordTooShort));

        let req = form(None, "secret1").to_request().unwrap();
        assert_eq!(
            req,
            ManageUserRequest::Add {
                name: "sara".to_string(),
                full_name: None,
                company_code: "E-17".to_string(),
                password: "secret1".to_string(),
                is_admin: false,
            }
        );
    }

    #[test]
    fn test_edit_keeps_password_when_empty() {
        match form(Some(3), "").to_request().unwrap() {
            ManageUserRequest::Edit { id, password, .. } => {
                assert_eq!(id, 3);
                assert_eq!(password, None);
            }
            other => panic!("unexpected request {:?}", other),
        }
        assert_eq!(form(Some(3), "12345").to_request(), Err(AdminFormError::PasswordTooShort));
    }

    #[test]
    fn test_identity_required() {
        let mut f = form(None, "secret1");
        f.company_code = " ".to_string();
        assert_eq!(f.to_request(), Err(AdminFormError::MissingIdentity));
    }

    #[test]
    fn test_password_change_rules() {
        let mut f = PasswordChangeForm {
            current: "old-pass".to_string(),
            new: "newpass1".to_string(),
            confirm: "newpass".to_string(),
        };
        assert!(f.mismatch());
        assert_eq!(f.to_request(), Err(AdminFormError::PasswordMismatch));

        f.confirm = "newpass1".to_string();
        assert!(!f.mismatch());
        assert_eq!(f.to_request().unwrap().new_password, "newpass1");

        f.new = "short".to_string();
        f.confirm = "short".to_string();
        assert_eq!(f.to_request(), Err(AdminFormError::PasswordTooShort));

        f.current.clear();
        assert_eq!(f.to_request(), Err(AdminFormError::PasswordFieldsMissing));
    }

    #[test]
    fn test_branch_fields_need_two_characters() {
        assert_eq!(branch_entry("M", "204"), Err(AdminFormError::BranchFieldTooShort));
        assert_eq!(branch_entry(" Mall ", "2"), Err(AdminFormError::BranchFieldTooShort));
        assert_eq!(branch_entry(" Mall ", " 204 ").unwrap().name, "Mall");
    }

    #[test]
    fn test_branch_batch_skips_blank_rows() {
        let rows = vec![
            ("Mall".to_string(), "204".to_string()),
            (String::new(), " ".to_string()),
            ("Downtown".to_string(), "123".to_string()),
        ];
        let branches = branch_batch(&rows).unwrap();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[1].code, "123");

        let blank = vec![(String::new(), String::new())];
        assert_eq!(branch_batch(&blank), Err(AdminFormError::NoBranches));

        let partial = vec![("Mall".to_string(), String::new())];
        assert_eq!(branch_batch(&partial), Err(AdminFormError::BranchFieldTooShort));
    }
}
