//! User table embedded by the server-rendered admin page

use contracts::system::users::AdminUser;

/// `<script type="application/json" id="users-data">`
pub const USERS_DATA_ELEMENT_ID: &str = "users-data";

pub fn parse_users(json: &str) -> Result<Vec<AdminUser>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| format!("Invalid user data: {}", e))
}

/// Users from the host page; empty when the element is missing
pub fn read_users() -> Result<Vec<AdminUser>, String> {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(USERS_DATA_ELEMENT_ID))
        .and_then(|el| el.text_content());
    match text {
        Some(json) => parse_users(&json),
        None => {
            log::warn!("#{} not found on the page", USERS_DATA_ELEMENT_ID);
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_users() {
        let json = r#"[
            {"id": 1, "name": "admin", "company_code": "A-1", "is_admin": true},
            {"id": 2, "name": "sara", "full_name": "Sara K", "company_code": "E-17", "branches": ["Mall"]}
        ]"#;
        let users = parse_users(json).unwrap();
        assert_eq!(users.len(), 2);
        assert!(users[0].is_admin);
        assert_eq!(users[1].full_name.as_deref(), Some("Sara K"));
        assert_eq!(users[1].branches, vec!["Mall".to_string()]);
    }

    #[test]
    fn test_blank_and_broken_data() {
        assert!(parse_users("  ").unwrap().is_empty());
        assert!(parse_users("{not json").is_err());
    }
}
