//! Jolpica (Ergast-compatible) F1 API client.
//!
//! Fetches season schedules, results and standings.
//! See: https://github.com/jolpica/jolpica-f1/blob/main/docs/README.md
//!
//! Two fetch flavours exist:
//! - strict (`fetch_races`, `fetch_standings`) for aggregate lists, where a failure
//!   must reach the caller because an empty list would read as "off-season";
//! - fail-soft (`fetch_first_race`) for per-round sub-resources, where a missing
//!   sprint or an unpublished result must never abort the surrounding read.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::AppError;
use crate::helpers::lenient_string;
use crate::models::{SessionKind, StandingsKind};

/// Upper bound the upstream accepts for `limit`; avoids paginating season lists.
const PAGE_LIMIT: u32 = 100;

/// Client for the Jolpica F1 API.
#[derive(Debug, Clone)]
pub struct JolpicaClient {
    client: reqwest::Client,
    base_url: String,
}

/// How a fail-soft fetch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A record was returned.
    Found,
    /// The request succeeded but the race table was empty.
    Missing,
    /// Network, HTTP or parse failure.
    Failed,
}

/// Result of a fail-soft fetch: the first race record, or an empty record.
#[derive(Debug, Clone)]
pub struct FirstRecord {
    pub race: RawRace,
    pub outcome: FetchOutcome,
}

// --- Ergast JSON response types ---
//
// Every field is optional: records are partially populated depending on the
// resource and on how far the weekend has progressed.

#[derive(Debug, Deserialize)]
struct MrEnvelope<T> {
    #[serde(rename = "MRData")]
    data: T,
}

#[derive(Debug, Deserialize)]
struct RaceData {
    #[serde(rename = "RaceTable")]
    race_table: RaceTable,
}

#[derive(Debug, Default, Deserialize)]
struct RaceTable {
    #[serde(rename = "Races", default)]
    races: Vec<RawRace>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRace {
    #[serde(default, deserialize_with = "lenient_string")]
    pub round: Option<String>,
    #[serde(rename = "raceName", default)]
    pub race_name: Option<String>,
    #[serde(rename = "Circuit", default)]
    pub circuit: Option<RawCircuit>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "FirstPractice", default)]
    pub first_practice: Option<RawSession>,
    #[serde(rename = "SecondPractice", default)]
    pub second_practice: Option<RawSession>,
    #[serde(rename = "ThirdPractice", default)]
    pub third_practice: Option<RawSession>,
    #[serde(rename = "SprintQualifying", alias = "SprintShootout", default)]
    pub sprint_qualifying: Option<RawSession>,
    #[serde(rename = "Sprint", default)]
    pub sprint: Option<RawSession>,
    #[serde(rename = "Qualifying", default)]
    pub qualifying: Option<RawSession>,
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<RawResult>>,
    #[serde(rename = "QualifyingResults", default)]
    pub qualifying_results: Option<Vec<RawResult>>,
    #[serde(rename = "SprintResults", default)]
    pub sprint_results: Option<Vec<RawResult>>,
}

impl RawRace {
    /// The scheduled sub-object for a pre-race session, if upstream lists one.
    /// RACE has no sub-object; its date/time live on the record itself.
    pub fn session(&self, kind: SessionKind) -> Option<&RawSession> {
        match kind {
            SessionKind::FirstPractice => self.first_practice.as_ref(),
            SessionKind::SecondPractice => self.second_practice.as_ref(),
            SessionKind::ThirdPractice => self.third_practice.as_ref(),
            SessionKind::SprintQualifying => self.sprint_qualifying.as_ref(),
            SessionKind::Sprint => self.sprint.as_ref(),
            SessionKind::Qualifying => self.qualifying.as_ref(),
            SessionKind::Race => None,
        }
    }

    /// Whether this record carries a round identifier (i.e. is not the empty sentinel).
    pub fn has_round(&self) -> bool {
        self.round.as_deref().is_some_and(|r| !r.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCircuit {
    #[serde(rename = "circuitName", default)]
    pub circuit_name: Option<String>,
    #[serde(rename = "Location", default)]
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSession {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDriver {
    #[serde(rename = "givenName", default)]
    pub given_name: Option<String>,
    #[serde(rename = "familyName", default)]
    pub family_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConstructor {
    #[serde(default)]
    pub name: Option<String>,
}

/// One line of a race, sprint or qualifying classification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub points: Option<String>,
    #[serde(rename = "Driver", default)]
    pub driver: Option<RawDriver>,
    #[serde(rename = "Constructor", default)]
    pub constructor: Option<RawConstructor>,
    #[serde(rename = "Q1", default, deserialize_with = "lenient_string")]
    pub q1: Option<String>,
    #[serde(rename = "Q2", default, deserialize_with = "lenient_string")]
    pub q2: Option<String>,
    #[serde(rename = "Q3", default, deserialize_with = "lenient_string")]
    pub q3: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StandingsData {
    #[serde(rename = "StandingsTable")]
    standings_table: RawStandingsTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStandingsTable {
    #[serde(default, deserialize_with = "lenient_string")]
    pub season: Option<String>,
    #[serde(rename = "StandingsLists", default)]
    pub standings_lists: Vec<RawStandingsList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStandingsList {
    #[serde(default, deserialize_with = "lenient_string")]
    pub round: Option<String>,
    #[serde(rename = "DriverStandings", default)]
    pub driver_standings: Vec<RawDriverStanding>,
    #[serde(rename = "ConstructorStandings", default)]
    pub constructor_standings: Vec<RawConstructorStanding>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDriverStanding {
    #[serde(default, deserialize_with = "lenient_string")]
    pub points: Option<String>,
    #[serde(rename = "Driver", default)]
    pub driver: Option<RawDriver>,
    #[serde(rename = "Constructors", default)]
    pub constructors: Vec<RawConstructor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConstructorStanding {
    #[serde(default, deserialize_with = "lenient_string")]
    pub points: Option<String>,
    #[serde(rename = "Constructor", default)]
    pub constructor: Option<RawConstructor>,
}

impl JolpicaClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!("Ignoring invalid User-Agent '{}'", user_agent);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `{base_url}/{path}` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalServiceError(format!("request to {} failed: {}", path, e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "{} returned HTTP {}",
                path,
                response.status()
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::ExternalServiceError(format!("{} JSON parse error: {}", path, e))
        })
    }

    /// Strict: every race record of a race-table resource.
    pub async fn fetch_races(&self, path: &str) -> Result<Vec<RawRace>, AppError> {
        let envelope: MrEnvelope<RaceData> = self.get_json(path).await?;
        Ok(envelope.data.race_table.races)
    }

    /// Fail-soft: the first race record of a race-table resource, or an empty
    /// record when the request fails or the table is empty.
    pub async fn fetch_first_race(&self, path: &str) -> FirstRecord {
        match self.fetch_races(path).await {
            Ok(races) => match races.into_iter().next() {
                Some(race) => FirstRecord {
                    race,
                    outcome: FetchOutcome::Found,
                },
                None => FirstRecord {
                    race: RawRace::default(),
                    outcome: FetchOutcome::Missing,
                },
            },
            Err(e) => {
                tracing::warn!("Treating {} as empty: {}", path, e);
                FirstRecord {
                    race: RawRace::default(),
                    outcome: FetchOutcome::Failed,
                }
            }
        }
    }

    /// Strict: the standings table of a standings resource.
    pub async fn fetch_standings(&self, path: &str) -> Result<RawStandingsTable, AppError> {
        let envelope: MrEnvelope<StandingsData> = self.get_json(path).await?;
        Ok(envelope.data.standings_table)
    }
}

// --- Resource paths ---

pub fn season_path(season: &str) -> String {
    format!("{}.json?limit={}", season, PAGE_LIMIT)
}

pub fn next_race_path(season: &str) -> String {
    format!("{}/next.json", season)
}

pub fn last_race_path(season: &str) -> String {
    format!("{}/last.json", season)
}

pub fn round_path(season: &str, round: u32) -> String {
    format!("{}/{}.json", season, round)
}

pub fn results_path(season: &str, round: u32) -> String {
    format!("{}/{}/results.json?limit={}", season, round, PAGE_LIMIT)
}

/// Position-1 result only; the upstream filters server-side.
pub fn winner_path(season: &str, round: u32) -> String {
    format!("{}/{}/results/1.json", season, round)
}

pub fn qualifying_path(season: &str, round: u32) -> String {
    format!("{}/{}/qualifying.json?limit={}", season, round, PAGE_LIMIT)
}

pub fn sprint_path(season: &str, round: u32) -> String {
    format!("{}/{}/sprint.json?limit={}", season, round, PAGE_LIMIT)
}

pub fn standings_path(season: &str, kind: StandingsKind) -> String {
    let resource = match kind {
        StandingsKind::Drivers => "driverStandings",
        StandingsKind::Constructors => "constructorStandings",
    };
    format!("{}/{}.json?limit={}", season, resource, PAGE_LIMIT)
}
