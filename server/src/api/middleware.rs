//! HTTP middleware (CORS, 404 handler)

use axum::extract::Request;
use axum::http::{Method, StatusCode, header};
use axum::response::IntoResponse;
use tower_http::cors::{Any, CorsLayer};

/// Create CORS layer
///
/// Clients are game mods and the Discord bot rather than browsers, so the
/// policy stays permissive.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
}

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> impl IntoResponse {
    tracing::debug!("[404] {} {}", req.method(), req.uri());
    StatusCode::NOT_FOUND
}
