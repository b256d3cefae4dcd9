//! Season calendar endpoints.
//!
//! - GET /api/v1/calendar
//! - GET /api/v1/weekends/next

use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{CalendarEntry, WeekendSummary};

/// Full season calendar with the winner of every completed weekend.
///
/// An empty list means the season has no scheduled weekends; an upstream
/// failure is reported as 502, never as an empty calendar.
#[utoipa::path(
    get,
    path = "/api/v1/calendar",
    tag = "Calendar",
    responses(
        (status = 200, description = "Weekends ordered by round", body = Vec<CalendarEntry>),
        (status = 502, description = "Season list could not be fetched", body = ErrorResponse),
    )
)]
pub async fn get_calendar(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarEntry>>, AppError> {
    let calendar = state.service.season_calendar().await?;
    Ok(Json(calendar))
}

/// The next weekend of the season.
#[utoipa::path(
    get,
    path = "/api/v1/weekends/next",
    tag = "Calendar",
    responses(
        (status = 200, description = "Nearest unfinished weekend", body = WeekendSummary),
        (status = 404, description = "The season has no remaining weekends", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_next_weekend(
    State(state): State<AppState>,
) -> Result<Json<WeekendSummary>, AppError> {
    state
        .service
        .next_weekend()
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No remaining weekends in season {}",
                state.service.season()
            ))
        })
}
