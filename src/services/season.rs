//! Season-level reads: calendar with winners, next weekend, weekend detail
//! and standings.
//!
//! Every read samples the clock once, so all weekends in one response are
//! judged against the same instant.

use std::sync::Arc;

use chrono_tz::Tz;
use futures::stream::{self, StreamExt};

use crate::errors::AppError;
use crate::helpers::{parse_u32, NOT_AVAILABLE};
use crate::models::{
    CalendarEntry, ResultTable, Standings, StandingsKind, Status, TableState, WeekendDetail,
    WeekendSummary,
};
use crate::services::jolpica::{
    last_race_path, next_race_path, qualifying_path, results_path, round_path, season_path,
    sprint_path, standings_path, winner_path, FetchOutcome, FirstRecord, JolpicaClient, RawResult,
};
use crate::services::results::{map_constructor_standings, map_driver_standings, map_results};
use crate::services::status::Clock;
use crate::services::weekend::summarize_weekend;

#[derive(Clone)]
pub struct SeasonService {
    client: JolpicaClient,
    clock: Arc<dyn Clock>,
    tz: Tz,
    season: String,
    winner_concurrency: usize,
}

impl SeasonService {
    pub fn new(
        client: JolpicaClient,
        clock: Arc<dyn Clock>,
        tz: Tz,
        season: impl Into<String>,
        winner_concurrency: usize,
    ) -> Self {
        Self {
            client,
            clock,
            tz,
            season: season.into(),
            winner_concurrency: winner_concurrency.max(1),
        }
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    /// Winning driver of a round, or the "N/D" sentinel when the lookup fails
    /// or the classification is not published yet.
    async fn fetch_winner(&self, round: u32) -> String {
        let record = self
            .client
            .fetch_first_race(&winner_path(&self.season, round))
            .await;
        map_results(record.race.results.as_deref())
            .into_iter()
            .find(|r| r.position == 1)
            .map(|r| r.driver)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// The season calendar ordered by round.
    ///
    /// Winner lookups run only for COMPLETED weekends, at most
    /// `winner_concurrency` at a time. A failed season fetch is an error; an
    /// empty season is an empty calendar.
    pub async fn season_calendar(&self) -> Result<Vec<CalendarEntry>, AppError> {
        let races = self
            .client
            .fetch_races(&season_path(&self.season))
            .await?;
        let now = self.clock.now();

        let mut weekends: Vec<WeekendSummary> = races
            .iter()
            .filter_map(|raw| summarize_weekend(raw, self.tz, now))
            .collect();
        weekends.sort_by_key(|w| w.round);

        let completed = weekends
            .iter()
            .filter(|w| w.status == Status::Completed)
            .count();
        tracing::debug!(
            "Season {}: {} weekends, {} completed",
            self.season,
            weekends.len(),
            completed
        );

        let entries = stream::iter(weekends)
            .map(|weekend| async move {
                let winner = if weekend.status == Status::Completed {
                    self.fetch_winner(weekend.round).await
                } else {
                    NOT_AVAILABLE.to_string()
                };
                CalendarEntry { weekend, winner }
            })
            .buffered(self.winner_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(entries)
    }

    /// The nearest weekend that has not finished, with UPCOMING shown as NEXT.
    /// `None` once the season has no weekends left.
    pub async fn next_weekend(&self) -> Result<Option<WeekendSummary>, AppError> {
        let races = self
            .client
            .fetch_races(&next_race_path(&self.season))
            .await?;
        let now = self.clock.now();

        Ok(races
            .iter()
            .find_map(|raw| summarize_weekend(raw, self.tz, now))
            .map(|mut weekend| {
                weekend.status = weekend.status.as_next();
                weekend
            }))
    }

    /// Schedule, status and the three result tables of one round.
    pub async fn weekend_detail(&self, round: u32) -> Result<WeekendDetail, AppError> {
        if round == 0 {
            return Err(AppError::BadRequest("Round numbers start at 1".to_string()));
        }

        let season = self.season.as_str();
        let schedule_resource = round_path(season, round);
        let race_resource = results_path(season, round);
        let qualifying_resource = qualifying_path(season, round);
        let sprint_resource = sprint_path(season, round);
        let (schedule, race, qualifying, sprint) = futures::join!(
            self.client.fetch_first_race(&schedule_resource),
            self.client.fetch_first_race(&race_resource),
            self.client.fetch_first_race(&qualifying_resource),
            self.client.fetch_first_race(&sprint_resource),
        );
        let now = self.clock.now();

        // Result resources repeat the schedule fields, so any of them can stand
        // in when the schedule fetch itself failed.
        let records = [&schedule, &race, &qualifying, &sprint];
        let Some(base) = records.iter().find(|r| r.race.has_round()) else {
            return Err(
                if records.iter().any(|r| r.outcome == FetchOutcome::Failed) {
                    AppError::ExternalServiceError(format!(
                        "Round {} of season {} could not be fetched",
                        round, season
                    ))
                } else {
                    AppError::NotFound(format!("Round {} not found in season {}", round, season))
                },
            );
        };

        let weekend = summarize_weekend(&base.race, self.tz, now).ok_or_else(|| {
            AppError::ExternalServiceError(format!(
                "Upstream record for round {} has an unusable round number",
                round
            ))
        })?;

        Ok(WeekendDetail {
            weekend,
            race: result_table(&race, race.race.results.as_deref()),
            qualifying: result_table(&qualifying, qualifying.race.qualifying_results.as_deref()),
            sprint: result_table(&sprint, sprint.race.sprint_results.as_deref()),
        })
    }

    /// Championship table labelled with the round its totals reflect.
    ///
    /// The label comes from a separate read; if the two disagree the read
    /// fails instead of publishing a mismatched label.
    pub async fn standings(&self, kind: StandingsKind) -> Result<Standings, AppError> {
        let table_path = standings_path(&self.season, kind);
        let label_path = last_race_path(&self.season);
        let (table, last) = futures::try_join!(
            self.client.fetch_standings(&table_path),
            self.client.fetch_races(&label_path),
        )?;

        let list = table.standings_lists.into_iter().next();
        let last = last.into_iter().next();
        let standings_round = list.as_ref().and_then(|l| parse_u32(l.round.as_deref()));
        let last_round = last.as_ref().and_then(|r| parse_u32(r.round.as_deref()));

        // Pre-season: neither side has a round yet.
        let pre_season = list.is_none() && last_round.is_none();
        if !pre_season && (standings_round.is_none() || standings_round != last_round) {
            return Err(AppError::ExternalServiceError(format!(
                "{:?} standings are for round {:?} but the last completed round is {:?}",
                kind, standings_round, last_round
            )));
        }

        let entries = match (&list, kind) {
            (Some(l), StandingsKind::Drivers) => map_driver_standings(&l.driver_standings),
            (Some(l), StandingsKind::Constructors) => {
                map_constructor_standings(&l.constructor_standings)
            }
            (None, _) => Vec::new(),
        };

        Ok(Standings {
            kind,
            season: table.season.unwrap_or_else(|| self.season.clone()),
            as_of_round: last_round,
            as_of: last
                .and_then(|r| r.race_name)
                .map(|n| n.trim().to_uppercase()),
            entries,
        })
    }
}

/// Result table for one sub-resource. A failed fetch is UNAVAILABLE; a
/// successful fetch with no classification is NOT_AVAILABLE_YET.
fn result_table(record: &FirstRecord, raw: Option<&[RawResult]>) -> ResultTable {
    if record.outcome == FetchOutcome::Failed {
        return ResultTable {
            state: TableState::Unavailable,
            results: Vec::new(),
        };
    }

    let results = map_results(raw);
    let state = if results.is_empty() {
        TableState::NotAvailableYet
    } else {
        TableState::Published
    };
    ResultTable { state, results }
}
