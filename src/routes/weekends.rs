use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::WeekendDetail;

/// Schedule, status and race/qualifying/sprint results of one round.
///
/// Each result table carries its own state: PUBLISHED, NOT_AVAILABLE_YET
/// (session not run or not classified), or UNAVAILABLE (fetch failed, retry).
#[utoipa::path(
    get,
    path = "/api/v1/weekends/{round}",
    tag = "Weekends",
    params(
        ("round" = u32, Path, description = "Round number, starting at 1"),
    ),
    responses(
        (status = 200, description = "Weekend detail", body = WeekendDetail),
        (status = 400, description = "Invalid round number", body = ErrorResponse),
        (status = 404, description = "Round not found", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_weekend(
    State(state): State<AppState>,
    Path(round): Path<String>,
) -> Result<Json<WeekendDetail>, AppError> {
    let round: u32 = round
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid round number '{}'", round)))?;
    let detail = state.service.weekend_detail(round).await?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::jolpica::JolpicaClient;
    use crate::services::season::SeasonService;
    use crate::services::status::SystemClock;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;
    use std::time::Duration;

    fn state() -> AppState {
        AppState {
            service: SeasonService::new(
                JolpicaClient::new("http://127.0.0.1:9", "F1Live-test/0.1", Duration::from_secs(1)),
                Arc::new(SystemClock),
                chrono_tz::Europe::Lisbon,
                "2025",
                4,
            ),
        }
    }

    #[tokio::test]
    async fn test_non_numeric_round_is_json_bad_request() {
        let err = get_weekend(State(state()), Path("abc".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid round number 'abc'");
    }

    #[tokio::test]
    async fn test_negative_round_is_bad_request() {
        let err = get_weekend(State(state()), Path("-1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
