mod entry_card;
mod image_picker;
pub mod model;
pub mod picked_file;
mod view;
pub mod view_model;

pub use view::DataEntryPage;
