//! Bridge API handler modules.

pub mod animations;
pub mod lights;
pub mod motion;

use std::str::FromStr;

use axum::Router;
use axum::routing::get;

use hoo_domain::id::LightNumber;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Lights
        .route("/lights", get(lights::list))
        .route("/light/{number}", get(lights::get))
        .route("/{number}/on", get(lights::turn_on))
        .route("/{number}/off", get(lights::turn_off))
        .route("/{number}/state", get(lights::set_state))
        .route("/{number}/color", get(lights::set_color))
        // Motion sensors
        .route("/motion", get(motion::list))
        .route("/motion/{name}/present", get(motion::present))
        .route("/motion/{name}/clear", get(motion::clear))
        // Animations
        .route("/rotate/{transition}/{hold}", get(animations::rotate))
        .route("/random/{transition}/{hold}", get(animations::random))
        .route("/sleepy/{transition}/{hold}", get(animations::sleepy))
        .route("/stop", get(animations::stop))
}

fn parse_light_number(raw: &str) -> Result<LightNumber, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid light number {raw:?}")))
}

/// Parse a comma-separated list, skipping empty items.
fn parse_csv<T: FromStr>(raw: Option<&str>, field: &str) -> Result<Vec<T>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .map_err(|_| ApiError::BadRequest(format!("invalid {field} entry {item:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_csv_skipping_blanks() {
        let parsed: Vec<u16> = parse_csv(Some("3, 7,,9"), "hues").unwrap();
        assert_eq!(parsed, vec![3, 7, 9]);
    }

    #[test]
    fn should_treat_missing_csv_as_empty() {
        let parsed: Vec<u16> = parse_csv(None, "hues").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn should_reject_bad_csv_entry() {
        let parsed: Result<Vec<u16>, _> = parse_csv(Some("1,x"), "hues");
        assert!(matches!(parsed, Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn should_reject_non_numeric_light_number() {
        assert!(parse_light_number("kitchen").is_err());
        assert_eq!(parse_light_number("4").unwrap(), LightNumber::new(4));
    }
}
