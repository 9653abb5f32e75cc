//! Light handlers.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};

use hoo_domain::color::Rgb;
use hoo_domain::light::{LightAttribute, LightRecord, TRANSITION_TIME_QUERY_KEY};

use super::parse_light_number;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/lights`
pub async fn list(State(state): State<AppState>) -> Json<Vec<LightRecord>> {
    Json(state.bridge.lights())
}

/// `GET /api/light/{number}`
///
/// # Errors
///
/// 400 for a malformed number, 404 for an unknown light.
pub async fn get(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<LightRecord>, ApiError> {
    let number = parse_light_number(&number)?;
    Ok(Json(state.bridge.light(number)?))
}

/// `GET /api/{number}/on`
///
/// # Errors
///
/// 400 for a malformed number, 404 for an unknown light.
pub async fn turn_on(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<LightRecord>, ApiError> {
    let number = parse_light_number(&number)?;
    Ok(Json(state.bridge.set_power(number, true)?))
}

/// `GET /api/{number}/off`
///
/// # Errors
///
/// 400 for a malformed number, 404 for an unknown light.
pub async fn turn_off(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<LightRecord>, ApiError> {
    let number = parse_light_number(&number)?;
    Ok(Json(state.bridge.set_power(number, false)?))
}

/// `GET /api/{number}/state?hue=..&sat=..&bri=..&transitiontime=..`
///
/// Every value is checked before any is applied.
///
/// # Errors
///
/// 400 for a malformed number, an unknown key, no key at all, a malformed
/// value or a value out of range; 404 for an unknown light.
pub async fn set_state(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<LightRecord>, ApiError> {
    let number = parse_light_number(&number)?;

    let mut updates = Vec::new();
    let mut transition_time = None;
    for (key, raw) in &params {
        if key == TRANSITION_TIME_QUERY_KEY {
            transition_time = Some(parse_value::<u16>(raw, key)?);
            continue;
        }
        let attribute = LightAttribute::from_query_key(key)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown state parameter {key:?}")))?;
        let value = parse_value::<u32>(raw, attribute.name())?;
        updates.push((attribute, attribute.validate(value)?));
    }
    if updates.is_empty() && transition_time.is_none() {
        return Err(ApiError::BadRequest(
            "expected one of hue, sat, bri or transitiontime".to_string(),
        ));
    }

    let mut record = state.bridge.light(number)?;
    if let Some(deciseconds) = transition_time {
        record = state.bridge.set_transition_time(number, deciseconds)?;
    }
    for (attribute, value) in updates {
        record = state.bridge.set_attribute(number, attribute, value)?;
    }
    Ok(Json(record))
}

/// `GET /api/{number}/color?r=..&g=..&b=..`
///
/// A missing channel counts as 0.
///
/// # Errors
///
/// 400 for a malformed number or a channel outside `0..=255`; 404 for an
/// unknown light.
pub async fn set_color(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Json<LightRecord>, ApiError> {
    let number = parse_light_number(&number)?;
    let channel = |key: &str| {
        params
            .get(key)
            .map_or(Ok(0), |raw| parse_value::<u8>(raw, key))
    };
    let color = Rgb::new(channel("r")?, channel("g")?, channel("b")?);
    Ok(Json(state.bridge.set_color(number, color)?))
}

fn parse_value<T: FromStr>(raw: &str, field: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {field} value {raw:?}")))
}
