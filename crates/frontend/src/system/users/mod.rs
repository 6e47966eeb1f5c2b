pub mod api;
pub mod error_map;
pub mod host_data;
pub mod ui;
pub mod validation;
