//! API endpoint handlers.

pub mod status;
pub mod translate;
