//! Animation handlers.
//!
//! Timings are whole seconds in the path; targets and hues are optional
//! comma-separated query lists. No `lights` means every light.

use std::collections::BTreeSet;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use hoo_domain::animation::{AnimationKind, AnimationRequest};
use hoo_domain::id::LightNumber;

use super::parse_csv;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters accepted by the animation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AnimationQuery {
    /// Comma-separated light numbers.
    pub lights: Option<String>,
    /// Comma-separated hues, only used by rotate.
    pub hues: Option<String>,
}

/// Response body of every animation endpoint.
#[derive(Debug, Serialize)]
pub struct AnimationStatus {
    /// What was requested.
    pub kind: AnimationKind,
    /// Whether an animation is running after the request.
    pub animating: bool,
}

/// `GET /api/rotate/{transition}/{hold}?lights=..&hues=..`
///
/// # Errors
///
/// 400 for malformed timings, targets or hues.
pub async fn rotate(
    State(state): State<AppState>,
    Path(timing): Path<(String, String)>,
    Query(query): Query<AnimationQuery>,
) -> Result<Json<AnimationStatus>, ApiError> {
    let (transition, hold) = parse_timing(&timing)?;
    let hues = parse_csv(query.hues.as_deref(), "hues")?;
    let request = AnimationRequest::rotate(transition, hold, targets(&query)?, hues);
    Ok(start(&state, &request))
}

/// `GET /api/random/{transition}/{hold}?lights=..`
///
/// # Errors
///
/// 400 for malformed timings or targets.
pub async fn random(
    State(state): State<AppState>,
    Path(timing): Path<(String, String)>,
    Query(query): Query<AnimationQuery>,
) -> Result<Json<AnimationStatus>, ApiError> {
    let (transition, hold) = parse_timing(&timing)?;
    let request = AnimationRequest::random(transition, hold, targets(&query)?);
    Ok(start(&state, &request))
}

/// `GET /api/sleepy/{transition}/{hold}?lights=..`
///
/// # Errors
///
/// 400 for malformed timings or targets.
pub async fn sleepy(
    State(state): State<AppState>,
    Path(timing): Path<(String, String)>,
    Query(query): Query<AnimationQuery>,
) -> Result<Json<AnimationStatus>, ApiError> {
    let (transition, hold) = parse_timing(&timing)?;
    let request = AnimationRequest::sleepy(transition, hold, targets(&query)?);
    Ok(start(&state, &request))
}

/// `GET /api/stop`
pub async fn stop(State(state): State<AppState>) -> Json<AnimationStatus> {
    state.bridge.stop_animation();
    Json(AnimationStatus {
        kind: AnimationKind::Stop,
        animating: false,
    })
}

fn start(state: &AppState, request: &AnimationRequest) -> Json<AnimationStatus> {
    state.bridge.start_animation(request);
    Json(AnimationStatus {
        kind: request.kind,
        animating: state.bridge.is_animating(),
    })
}

fn parse_timing((transition, hold): &(String, String)) -> Result<(u16, u16), ApiError> {
    let seconds = |raw: &str| {
        raw.parse::<u16>()
            .map_err(|_| ApiError::BadRequest(format!("invalid duration {raw:?}")))
    };
    Ok((seconds(transition)?, seconds(hold)?))
}

fn targets(query: &AnimationQuery) -> Result<BTreeSet<LightNumber>, ApiError> {
    let numbers: Vec<LightNumber> = parse_csv(query.lights.as_deref(), "lights")?;
    Ok(numbers.into_iter().collect())
}
