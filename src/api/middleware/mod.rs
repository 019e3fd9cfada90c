//! API middleware.
//!
//! Every `/api` route passes the general limiter; routes that call the
//! model also pass the stricter translate limiter.

pub mod rate;
