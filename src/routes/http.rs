// HTTP handlers; runtime errors map to 404 or 502 with a JSON body

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::runtime::RuntimeError;
use crate::version::{NAME, VERSION};

pub(super) struct ApiError(RuntimeError);

impl From<RuntimeError> for ApiError {
    fn from(e: RuntimeError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            RuntimeError::NotFound(_) | RuntimeError::MissingLabel(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/containers/stats: latest complete aggregate.
pub(super) async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let aggregate = state.store.read();
    Json(aggregate.as_ref().clone())
}

pub(super) async fn list_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let targets = state.runtime.list_targets().await?;
    Ok(Json(targets).into_response())
}

pub(super) async fn logs_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let lines = state.runtime.container_logs(&name).await?;
    Ok(Json(lines).into_response())
}

pub(super) async fn restart_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.runtime.restart_container(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn stop_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.runtime.stop_container(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/images/{name}/version: `version` label of the image.
pub(super) async fn image_version_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let version = state.runtime.image_version(&name).await?;
    Ok(Json(serde_json::json!({ "image": name, "version": version })).into_response())
}
