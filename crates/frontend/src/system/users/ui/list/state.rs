use contracts::system::users::AdminUser;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct UsersListState {
    pub all: Vec<AdminUser>,
    pub search_query: String,
    pub is_loaded: bool,
}

impl UsersListState {
    /// Users whose name, full name or company code contain the query
    pub fn visible(&self) -> Vec<AdminUser> {
        let query = self.search_query.trim().to_lowercase();
        self.all
            .iter()
            .filter(|u| {
                query.is_empty()
                    || u.name.to_lowercase().contains(&query)
                    || u.full_name
                        .as_deref()
                        .unwrap_or("")
                        .to_lowercase()
                        .contains(&query)
                    || u.company_code.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

impl UsersListState {
    /// Replaces the branch names shown for one user; false when the user is unknown
    pub fn set_branches(&mut self, user_id: i64, names: Vec<String>) -> bool {
        match self.all.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.branches = names;
                true
            }
            None => false,
        }
    }
}

pub fn create_state() -> RwSignal<UsersListState> {
    RwSignal::new(UsersListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, code: &str) -> AdminUser {
        AdminUser {
            id,
            name: name.to_string(),
            full_name: None,
            company_code: code.to_string(),
            is_admin: false,
            branches: Vec::new(),
        }
    }

    #[test]
    fn test_visible_filters_by_name_and_code() {
        let state = UsersListState {
            all: vec![user(1, "Sara", "E-17"), user(2, "omar", "E-20")],
            search_query: " e-2".to_string(),
            is_loaded: true,
        };
        let ids: Vec<i64> = state.visible().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);

        let state = UsersListState {
            search_query: "SAR".to_string(),
            ..state
        };
        assert_eq!(state.visible()[0].id, 1);
    }

    #[test]
    fn test_set_branches_updates_one_user() {
        let mut state = UsersListState {
            all: vec![user(1, "Sara", "E-17"), user(2, "omar", "E-20")],
            ..Default::default()
        };
        assert!(state.set_branches(2, vec!["City Stars".to_string()]));
        assert_eq!(state.all[1].branches, vec!["City Stars".to_string()]);
        assert!(state.all[0].branches.is_empty());
        assert!(!state.set_branches(9, Vec::new()));
    }
}
