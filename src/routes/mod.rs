pub mod calendar;
pub mod health;
pub mod standings;
pub mod weekends;

use crate::services::season::SeasonService;

/// Shared application state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) service: SeasonService,
}
