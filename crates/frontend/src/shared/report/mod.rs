pub mod api;
pub mod config;
pub mod controller;
pub mod filters;
pub mod integration;
pub mod ui;
pub mod view_model;
