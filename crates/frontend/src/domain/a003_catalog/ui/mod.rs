mod guide_popup;

pub use guide_popup::ModelGuidePopup;
