//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};

use crate::cache::SolveError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/solve", post(solve))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Solve one instance from node 1 to node `nodes`.
async fn solve(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: SolveRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let key = req.into_key(state.config.window, &state.limits)?;
    let (nodes, edges, window) = (key.node_count, key.edges.len(), key.window);
    let solved = state.planner.solve(key).await?;

    info!(
        nodes,
        edges,
        window,
        outcome = %solved.result.outcome,
        cached = solved.cached,
        "solved"
    );

    Ok(Json(SolveResponse::from(solved)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<SolveError> for AppError {
    fn from(e: SolveError) -> Self {
        match e {
            SolveError::Graph(_) | SolveError::Search(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            SolveError::Task(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<LimitError> for AppError {
    fn from(e: LimitError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
