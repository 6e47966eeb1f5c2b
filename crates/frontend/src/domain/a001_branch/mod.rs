pub mod api;
pub mod autocomplete;
pub mod directory;
pub mod ui;
