//! WakaLens HTTP router.
//!
//! Returns a composable `Router`. Translation routes are nested under
//! `/api/`; `/health` sits at the root. Unmatched paths go to the static
//! frontend when one is configured, else to a JSON 404.
//!
//! Middleware stack (outermost → innermost):
//! CORS → security headers → body limit → general rate limit → translate rate limit

use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config::{AppConfig, MAX_BODY_BYTES};

/// The browser OCR worker loads its script, WASM and language data from
/// these origins.
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    style-src 'self' 'unsafe-inline'; \
    script-src 'self' https://cdn.jsdelivr.net 'unsafe-eval'; \
    img-src 'self' data: https: blob:; \
    connect-src 'self' https://api.anthropic.com https://cdn.jsdelivr.net https://tessdata.projectnaptha.com data:; \
    worker-src 'self' blob: https://cdn.jsdelivr.net; \
    child-src 'self' blob:; \
    object-src 'none'; \
    font-src 'self' https: data:";

/// Build the full application router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// `/api` layer). Handlers use `State<ApiContext>`.
pub fn api_router(ctx: ApiContext, config: &AppConfig) -> Router {
    // Routes that call the model carry the stricter limit.
    let model_routes = Router::new()
        .route("/extract-facts", post(endpoints::translate::extract_facts))
        .route("/translate-persona", post(endpoints::translate::translate_persona))
        .route("/translate", post(endpoints::translate::translate))
        .route("/translate-4-6", post(endpoints::translate::translate_4_6))
        .route("/translate-english", post(endpoints::translate::translate_english))
        .route_layer(axum::middleware::from_fn(middleware::rate::limit_translate));

    let api = Router::new()
        .route("/status", get(endpoints::status::status))
        .merge(model_routes)
        .route_layer(axum::middleware::from_fn(middleware::rate::limit_general))
        .with_state(ctx.clone())
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx));

    let app = Router::new()
        .route("/health", get(endpoints::status::health))
        .nest("/api", api);

    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(endpoints::status::not_found.into_service()),
        ),
        None => app.fallback(endpoints::status::not_found),
    };

    app.layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(cors_layer(&config.frontend_url))
}

/// CORS limited to the configured frontend origin.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin; cross-origin requests disabled");
            cors
        }
    }
}
