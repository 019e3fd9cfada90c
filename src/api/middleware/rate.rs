//! Per-client rate limiting middleware.
//!
//! Two sliding-window limits share one implementation:
//! - general: `RATE_LIMIT_MAX_REQUESTS` per `RATE_LIMIT_WINDOW_MS` on all `/api` routes
//! - translate: 10 requests per 5 minutes on routes that call the model

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, RateLimiter};

/// Extract a rate-limit key from the request: the peer address when the
/// server recorded one, else the first `X-Forwarded-For` entry.
fn rate_key(req: &Request<axum::body::Body>) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return format!("ip:{}", addr.ip());
    }
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|ip| format!("ip:{ip}"))
        .unwrap_or_else(|| "anonymous".to_string())
}

/// General limit for every `/api` route. Returns 429 if exceeded.
pub async fn limit_general(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next, |ctx| ctx.general_limiter.clone()).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Stricter limit for the model-calling routes.
pub async fn limit_translate(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next, |ctx| ctx.translate_limiter.clone()).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn limit_inner(
    req: Request<axum::body::Body>,
    next: Next,
    select: fn(&ApiContext) -> Arc<Mutex<RateLimiter>>,
) -> Result<Response, ApiError> {
    let limiter = req
        .extensions()
        .get::<ApiContext>()
        .map(select)
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let key = rate_key(&req);

    // MutexGuard is !Send; drop before .await
    {
        let mut limiter = limiter
            .lock()
            .map_err(|_| ApiError::Internal("rate limiter lock".into()))?;

        limiter.check(&key).map_err(|retry_after| {
            tracing::warn!(client = %key, retry_after, "Rate limit exceeded");
            ApiError::RateLimited { retry_after }
        })?;
    }

    Ok(next.run(req).await)
}
