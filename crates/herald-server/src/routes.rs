//! HTTP routes
//!
//! Thin boundary over the facade: handlers translate between JSON and the
//! core types and map the error taxonomy onto status codes. A broadcast
//! failure is a reported condition here, never a process-ending one.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use herald_core::{
    BroadcastRequest, CoreError, DispatchError, GroupChat, Herald, SessionEvent, SessionState,
};

#[derive(Clone)]
pub struct AppState {
    pub herald: Arc<Herald>,
    /// Sender side of the lifecycle-event channel; the facade's pump task
    /// holds the receiving end
    pub events: mpsc::Sender<SessionEvent>,
}

/// Create the control-surface router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(api_status))
        .route("/api/broadcast", post(api_broadcast))
        .route("/api/groups", get(api_groups))
        // Lifecycle webhook posted by the session gateway
        .route("/hooks/session", post(session_hook))
        // Health check
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(e: CoreError) -> Response {
    let status = match &e {
        CoreError::Dispatch(DispatchError::NotReady) => StatusCode::CONFLICT,
        CoreError::Dispatch(DispatchError::NoDestinations) => StatusCode::BAD_REQUEST,
        CoreError::InvalidImageUrl(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %e, "Request failed");
    }

    (status, Json(ErrorResponse {
        error: e.to_string(),
    }))
        .into_response()
}

/// Session status response
#[derive(Serialize)]
pub struct StatusResponse {
    pub state: SessionState,
    /// Present only while a challenge is open and actionable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_artifact: Option<String>,
    pub changed_at: DateTime<Utc>,
}

/// GET /api/status
pub async fn api_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = state.herald.status();

    Json(StatusResponse {
        state: status.state(),
        login_artifact: status.actionable_artifact().map(|a| a.to_string()),
        changed_at: status.changed_at,
    })
}

/// POST /api/broadcast
pub async fn api_broadcast(
    State(state): State<AppState>,
    Json(request): Json<BroadcastRequest>,
) -> Response {
    match state.herald.broadcast(request).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/groups
pub async fn api_groups(State(state): State<AppState>) -> Response {
    match state.herald.groups().await {
        Ok(groups) => Json::<Vec<GroupChat>>(groups).into_response(),
        Err(e) => error_response(e),
    }
}

/// Lifecycle event posted by the session gateway.
#[derive(Debug, Deserialize)]
pub struct SessionHook {
    pub event: String,
    pub payload: Option<String>,
}

/// POST /hooks/session
pub async fn session_hook(
    State(state): State<AppState>,
    Json(hook): Json<SessionHook>,
) -> Response {
    let Some(event) = SessionEvent::from_parts(&hook.event, hook.payload.as_deref()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Unknown session event: {}", hook.event),
            }),
        )
            .into_response();
    };

    if state.events.send(event).await.is_err() {
        tracing::error!("Event pump is gone, dropping lifecycle event");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Event pump unavailable".to_string(),
            }),
        )
            .into_response();
    }

    StatusCode::NO_CONTENT.into_response()
}
