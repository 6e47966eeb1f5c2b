//! Lists and lookups that depend on a parent control of the same row
//!
//! Each request is tagged with the parent's value at request time. A reply
//! is applied only while the parent still holds that value, so a slow reply
//! for an old category can never overwrite the list of the current one.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dependent<T> {
    token: Option<String>,
    status: LoadStatus,
    value: T,
}

impl<T: Default> Default for Dependent<T> {
    fn default() -> Self {
        Self {
            token: None,
            status: LoadStatus::Idle,
            value: T::default(),
        }
    }
}

impl<T: Default> Dependent<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clears the value and starts loading for `parent`. Returns the token
    /// to send along, or `None` when the parent is blank.
    pub fn request(&mut self, parent: &str) -> Option<String> {
        self.reset();
        let parent = parent.trim();
        if parent.is_empty() {
            return None;
        }
        self.token = Some(parent.to_string());
        self.status = LoadStatus::Loading;
        Some(parent.to_string())
    }

    /// Applies a reply issued for `token` if `current_parent` still equals it
    pub fn resolve(&mut self, token: &str, current_parent: &str, result: Result<T, String>) -> bool {
        if self.token.as_deref() != Some(token) || current_parent.trim() != token {
            log::debug!("dropping stale reply for {:?}", token);
            return false;
        }
        match result {
            Ok(value) => {
                self.value = value;
                self.status = LoadStatus::Ready;
            }
            Err(message) => {
                self.value = T::default();
                self.status = LoadStatus::Failed(message);
            }
        }
        true
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Option list fed by `/get_dynamic_data/*`
pub type DependentList = Dependent<Vec<String>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Result<Vec<String>, String> {
        Ok(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_late_reply_for_old_parent_is_dropped() {
        let mut models = DependentList::new();
        let oled = models.request("OLED").unwrap();
        let qled = models.request("QLED").unwrap();

        assert!(models.resolve(&qled, "QLED", list(&["Q80C"])));
        assert!(!models.resolve(&oled, "QLED", list(&["S95F"])));
        assert_eq!(models.value(), &vec!["Q80C".to_string()]);
    }

    #[test]
    fn test_reply_dropped_when_parent_changed_without_new_request() {
        let mut models = DependentList::new();
        let token = models.request("OLED").unwrap();
        assert!(!models.resolve(&token, "", list(&["S95F"])));
        assert!(models.is_loading());
    }

    #[test]
    fn test_blank_parent_stays_idle() {
        let mut models = DependentList::new();
        assert_eq!(models.request("  "), None);
        assert_eq!(models.status(), &LoadStatus::Idle);
    }

    #[test]
    fn test_failure_is_recorded() {
        let mut pops = DependentList::new();
        let token = pops.request("S95F").unwrap();
        assert!(pops.resolve(&token, "S95F", Err("Network error".to_string())));
        assert_eq!(pops.error(), Some("Network error"));
        assert!(pops.value().is_empty());
    }
}
