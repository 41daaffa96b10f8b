pub mod api;
pub mod config;
pub mod detail;
pub mod ui;
