//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/elements/:id",
            post(register_element_handler)
                .get(element_handler)
                .delete(remove_element_handler),
        )
        .route(
            "/countdown/:id",
            post(start_countdown_handler).delete(cancel_countdown_handler),
        )
        .route("/defaults/pagination", get(pagination_defaults_handler))
        .route("/defaults/filters", get(filter_defaults_handler))
        .route("/page-number", get(page_number_handler))
        .route("/messages/server-error", post(server_error_message_handler))
        .route("/messages/validation", post(validation_message_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
