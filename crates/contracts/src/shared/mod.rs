pub mod api_message;
pub mod image_policy;
pub mod offline_shell;
