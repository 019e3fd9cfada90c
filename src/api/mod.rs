//! WakaLens HTTP API.
//!
//! Exposes the persona translation pipeline as JSON endpoints under
//! `/api/`. Every request is rate limited per client and every submitted
//! text passes the input safety gates before any model call.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{serve, ServerError};
pub use types::ApiContext;
