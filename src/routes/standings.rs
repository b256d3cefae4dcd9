use axum::extract::{Path, State};
use axum::Json;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{Standings, StandingsKind};

/// Driver or constructor championship table.
#[utoipa::path(
    get,
    path = "/api/v1/standings/{kind}",
    tag = "Standings",
    params(
        ("kind" = String, Path, description = "\"drivers\" or \"constructors\""),
    ),
    responses(
        (status = 200, description = "Standings as of the last completed round", body = Standings),
        (status = 400, description = "Unknown standings kind", body = ErrorResponse),
        (status = 502, description = "Upstream failure or inconsistent standings", body = ErrorResponse),
    )
)]
pub async fn get_standings(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Standings>, AppError> {
    let kind: StandingsKind = kind.parse().map_err(AppError::BadRequest)?;
    let standings = state.service.standings(kind).await?;
    Ok(Json(standings))
}
