//! Rows of the "add several branches" form

use contracts::system::users::ManageUserBranchesRequest;

/// Part of the modal cleared after a branch mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormReset {
    Nothing,
    /// Single branch name and code inputs
    SingleInputs,
    /// Batch rows, and the batch section closes
    BatchForm,
}

impl FormReset {
    /// A failed request keeps whatever the user typed
    pub fn after<T, E>(request: &ManageUserBranchesRequest, result: &Result<T, E>) -> Self {
        if result.is_err() {
            return FormReset::Nothing;
        }
        match request {
            ManageUserBranchesRequest::AddBranch { .. } => FormReset::SingleInputs,
            ManageUserBranchesRequest::AddMultipleBranches { .. } => FormReset::BatchForm,
            ManageUserBranchesRequest::RemoveBranch { .. } => FormReset::Nothing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub key: usize,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRows {
    rows: Vec<BatchRow>,
    next_key: usize,
}

impl Default for BatchRows {
    fn default() -> Self {
        Self {
            rows: vec![BatchRow {
                key: 0,
                name: String::new(),
                code: String::new(),
            }],
            next_key: 1,
        }
    }
}

impl BatchRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self) {
        self.rows.push(BatchRow {
            key: self.next_key,
            name: String::new(),
            code: String::new(),
        });
        self.next_key += 1;
    }

    /// The last remaining row stays
    pub fn remove(&mut self, key: usize) {
        if self.can_remove() {
            self.rows.retain(|r| r.key != key);
        }
    }

    /// Remove controls are hidden while only one row is left
    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    pub fn set_name(&mut self, key: usize, name: String) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.name = name;
        }
    }

    pub fn set_code(&mut self, key: usize, code: String) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.key == key) {
            row.code = code;
        }
    }

    pub fn rows(&self) -> &[BatchRow] {
        &self.rows
    }

    pub fn pairs(&self) -> Vec<(String, String)> {
        self.rows
            .iter()
            .map(|r| (r.name.clone(), r.code.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_row_cannot_be_removed() {
        let mut rows = BatchRows::new();
        assert!(!rows.can_remove());
        rows.remove(0);
        assert_eq!(rows.rows().len(), 1);

        rows.add();
        assert!(rows.can_remove());
        rows.remove(0);
        assert_eq!(rows.rows()[0].key, 1);
        assert!(!rows.can_remove());
    }

    #[test]
    fn test_edits_follow_keys() {
        let mut rows = BatchRows::new();
        rows.add();
        rows.set_name(1, "Mall".to_string());
        rows.set_code(1, "204".to_string());
        assert_eq!(
            rows.pairs(),
            vec![
                (String::new(), String::new()),
                ("Mall".to_string(), "204".to_string())
            ]
        );
    }

    #[test]
    fn test_inputs_survive_failed_request() {
        let add = ManageUserBranchesRequest::AddBranch {
            user_id: 1,
            branch_name: "City Stars".to_string(),
            branch_code: "118".to_string(),
        };
        let failed: Result<String, String> = Err("UNIQUE constraint failed".to_string());
        assert_eq!(FormReset::after(&add, &failed), FormReset::Nothing);
        assert_eq!(FormReset::after(&add, &Ok::<_, String>("ok")), FormReset::SingleInputs);

        let many = ManageUserBranchesRequest::AddMultipleBranches {
            user_id: 1,
            branches: Vec::new(),
        };
        assert_eq!(FormReset::after(&many, &failed), FormReset::Nothing);
        assert_eq!(FormReset::after(&many, &Ok::<_, String>("ok")), FormReset::BatchForm);

        let remove = ManageUserBranchesRequest::RemoveBranch {
            user_id: 1,
            branch_id: 4,
        };
        assert_eq!(FormReset::after(&remove, &Ok::<_, String>("ok")), FormReset::Nothing);
    }
}
