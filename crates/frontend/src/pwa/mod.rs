//! Installable app support: service worker registration, install prompt
//! and the update notice

pub mod installer;
pub mod register;
mod view;

pub use view::PwaShell;
