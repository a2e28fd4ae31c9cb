//! HTTP API for the envelope service
//!
//! Routes:
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`handlers::hello`] |
//! | POST | `/envelopes` | [`handlers::create_envelope`] |
//! | GET | `/envelopes` | [`handlers::list_envelopes`] |
//! | GET | `/envelopes/:id` | [`handlers::get_envelope`] |
//! | PUT | `/envelopes/:id/update` | [`handlers::update_envelope`] |
//! | DELETE | `/envelopes/:id` | [`handlers::delete_envelope`] |
//! | POST | `/envelopes/transfer/:from_id/:to_id` | [`handlers::transfer`] |
//! | GET | `/audit` | [`handlers::audit_log`] |

pub mod cors;
pub mod handlers;
pub mod params;
pub mod response;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::storage::Storage;

pub use cors::create_cors_layer;
pub use response::{ApiError, ApiResult};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let router = Router::new()
        .route("/", get(handlers::hello))
        .route(
            "/envelopes",
            post(handlers::create_envelope).get(handlers::list_envelopes),
        )
        .route(
            "/envelopes/:id",
            get(handlers::get_envelope).delete(handlers::delete_envelope),
        )
        .route("/envelopes/:id/update", put(handlers::update_envelope))
        .route(
            "/envelopes/transfer/:from_id/:to_id",
            post(handlers::transfer),
        )
        .route("/audit", get(handlers::audit_log))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if settings.cors_enabled {
        router.layer(create_cors_layer())
    } else {
        router
    }
}
