pub mod cascade;
pub mod entry;
pub mod images;
pub mod payload;
pub mod ui;
pub mod validation;
