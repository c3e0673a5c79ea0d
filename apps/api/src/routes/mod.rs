pub mod health;

use axum::{
    http::{header, HeaderName, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::state::AppState;
use crate::ticket::handlers;

/// Local frontend origins allowed to call the API from a browser.
pub const CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Response headers readable by browser scripts on those origins.
pub const EXPOSED_HEADERS: [HeaderName; 3] =
    [header::CONTENT_TYPE, header::CONTENT_LENGTH, header::DATE];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/agent/create-ticket",
            post(handlers::handle_create_ticket),
        )
        .route("/api/agent/infer-tags", post(handlers::handle_infer_tags))
        .layer(cors_layer())
        .with_state(state)
}

/// Credentials are allowed, so methods and headers are mirrored and exposed
/// headers are listed rather than `*`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            CORS_ORIGINS.map(HeaderValue::from_static),
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers(EXPOSED_HEADERS)
        .allow_credentials(true)
}
