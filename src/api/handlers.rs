//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::{
    helpers::{
        server_error_message, validation_message, PageQuery, PaginationOptions, ServerError,
        TableFilterOptions, ValidationIssue,
    },
    state::{AppState, CountdownState, ElementSnapshot, LabelPolicy},
};
use super::responses::{
    CancelResponse, CountdownResponse, HealthResponse, MessageResponse, PageNumberResponse,
    RegisterElementRequest, StartCountdownRequest, StatusResponse,
};

/// Handle POST /elements/:id - Register a button
pub async fn register_element_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<RegisterElementRequest>,
) -> Json<ElementSnapshot> {
    let label = if request.indicator {
        Some(request.label.unwrap_or_default())
    } else {
        None
    };
    Json(state.register_element(&id, label))
}

/// Handle GET /elements/:id - Current element state and render history
pub async fn element_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ElementSnapshot>, StatusCode> {
    state.element(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Handle DELETE /elements/:id - Remove an element
pub async fn remove_element_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    if state.remove_element(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Handle POST /countdown/:id - Start a countdown on an element
pub async fn start_countdown_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StartCountdownRequest>,
) -> Json<CountdownResponse> {
    let mut countdown = CountdownState::new(request.seconds, id.clone());
    if let Some(label) = request.default_label {
        countdown = countdown.with_label(label);
    }
    let policy = if request.preserve_label {
        LabelPolicy::Preserve
    } else {
        LabelPolicy::FirstTickOnly
    };

    let status = state.start_countdown(countdown, policy).await;
    let snapshot = state.countdowns.state_of(&id).await;
    Json(CountdownResponse::new(id, status, snapshot))
}

/// Handle DELETE /countdown/:id - Cancel a running countdown
pub async fn cancel_countdown_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CancelResponse>, StatusCode> {
    match state.cancel_countdown(&id).await {
        Some(outcome) => {
            info!("Countdown on '{}' cancelled: {:?}", id, outcome);
            Ok(Json(CancelResponse {
                element_id: id,
                outcome,
                timestamp: Utc::now(),
            }))
        }
        None => {
            warn!("No countdown running on '{}'", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle GET /defaults/pagination
pub async fn pagination_defaults_handler(State(state): State<Arc<AppState>>) -> Json<PaginationOptions> {
    Json(PaginationOptions::reset(state.settings.table_length))
}

/// Handle GET /defaults/filters
pub async fn filter_defaults_handler() -> Json<TableFilterOptions> {
    Json(TableFilterOptions::default())
}

/// Handle GET /page-number - Row number for a table row
pub async fn page_number_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageNumberResponse>, StatusCode> {
    match query.page_number(u64::from(state.settings.table_length)) {
        Some(page_number) => Ok(Json(PageNumberResponse { page_number })),
        None => {
            warn!("Page number overflow for {:?}", query);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Handle POST /messages/server-error
pub async fn server_error_message_handler(Json(err): Json<ServerError>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: server_error_message(&err),
    })
}

/// Handle POST /messages/validation
pub async fn validation_message_handler(Json(issues): Json<Vec<ValidationIssue>>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: validation_message(&issues),
    })
}

/// Handle GET /status - Return current panel status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        app_name: state.settings.app_name.clone(),
        api_url: state.settings.api_url.clone(),
        table_length: state.settings.table_length,
        active_countdowns: state.countdowns.active().await,
        uptime: state.get_uptime(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
