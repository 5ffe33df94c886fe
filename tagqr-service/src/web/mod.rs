//! Web server module for the SuperApp webhooks.
//!
//! Handlers only verify the request hash and answer. Gate actions and their
//! callbacks run in the background.

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::{get_price, index, not_found, open_gate, AppState};

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Wrong methods on known paths get the same 404 as unknown paths.
        .route("/", get(index).fallback(not_found))
        .route("/get-price", post(get_price).fallback(not_found))
        .route("/open-gate", post(open_gate).fallback(not_found))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
