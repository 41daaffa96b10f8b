pub mod error;
pub mod filters;
