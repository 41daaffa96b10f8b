pub mod alerts;
pub mod api_utils;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod report;
pub mod storage;
pub mod utils;
