//! # HTTP surface
//!
//! Read-only JSON routes for the menu and the order list, plus the `/ws` upgrade into the
//! relay. All routes allow any origin.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/menu", get(handlers::list_menu))
        .route("/api/orders", get(handlers::list_orders))
        .route("/api/health", get(handlers::health))
        .route("/ws", get(handlers::ws_upgrade))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
