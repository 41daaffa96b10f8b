//! Wire contracts shared between the report backend and the browser front end.

pub mod reports;
pub mod shared;
