//! Motion sensor handlers.

use axum::Json;
use axum::extract::{Path, State};

use hoo_domain::motion::MotionRecord;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/motion`
pub async fn list(State(state): State<AppState>) -> Json<Vec<MotionRecord>> {
    Json(state.bridge.motion_sensors())
}

/// `GET /api/motion/{name}/present`
///
/// # Errors
///
/// 404 for an unknown sensor.
pub async fn present(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MotionRecord>, ApiError> {
    Ok(Json(state.bridge.set_presence(&name, true)?))
}

/// `GET /api/motion/{name}/clear`
///
/// # Errors
///
/// 404 for an unknown sensor.
pub async fn clear(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MotionRecord>, ApiError> {
    Ok(Json(state.bridge.set_presence(&name, false)?))
}
