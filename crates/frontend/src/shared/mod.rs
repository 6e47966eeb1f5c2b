pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod export;
pub mod icons;
pub mod modal_frame;
pub mod storage;
pub mod toast;
