use serde::{Deserialize, Serialize};

/// Generic `{success, message}` reply used by the form and admin endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let msg: ApiMessage = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(msg, ApiMessage::ok(""));
    }
}
