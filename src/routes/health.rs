use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// API version
    pub version: String,
    /// Season the service reads (a year, or "current")
    pub season: String,
}

/// Health check endpoint.
///
/// Returns the API status, version and configured season. Does not call the
/// upstream API, so it stays cheap enough for load balancer probes.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        season: state.service.season().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::jolpica::JolpicaClient;
    use crate::services::season::SeasonService;
    use crate::services::status::SystemClock;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_health_check_reports_season() {
        let service = SeasonService::new(
            JolpicaClient::new("http://127.0.0.1:9", "F1Live-test/0.1", Duration::from_secs(1)),
            Arc::new(SystemClock),
            chrono_tz::Europe::Lisbon,
            "2025",
            4,
        );

        let Json(response) = health_check(State(AppState { service })).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.season, "2025");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
