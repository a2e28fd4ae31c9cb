//! CORS layer
//!
//! Browsers may call the API from any origin, matching the permissive
//! defaults the service has always shipped with.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Create the CORS layer allowing every origin
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(Any)
}
