//! Normalized, render-ready domain model.
//!
//! These are the only types that cross the HTTP boundary; nothing downstream
//! ever sees the raw upstream shapes in `services::jolpica`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// A timed on-track activity within a weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SessionKind {
    #[serde(rename = "FP1")]
    FirstPractice,
    #[serde(rename = "FP2")]
    SecondPractice,
    #[serde(rename = "FP3")]
    ThirdPractice,
    #[serde(rename = "SPRINT QUALIFYING")]
    SprintQualifying,
    #[serde(rename = "SPRINT")]
    Sprint,
    #[serde(rename = "QUALIFYING")]
    Qualifying,
    #[serde(rename = "RACE")]
    Race,
}

impl SessionKind {
    /// Sessions that precede the race, in the order the sport runs them.
    pub const BEFORE_RACE: [SessionKind; 6] = [
        SessionKind::FirstPractice,
        SessionKind::SecondPractice,
        SessionKind::ThirdPractice,
        SessionKind::SprintQualifying,
        SessionKind::Sprint,
        SessionKind::Qualifying,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::FirstPractice => "FP1",
            SessionKind::SecondPractice => "FP2",
            SessionKind::ThirdPractice => "FP3",
            SessionKind::SprintQualifying => "SPRINT QUALIFYING",
            SessionKind::Sprint => "SPRINT",
            SessionKind::Qualifying => "QUALIFYING",
            SessionKind::Race => "RACE",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a weekend, derived from the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The single nearest future weekend (next-weekend view only).
    Next,
    Upcoming,
    Ongoing,
    Completed,
}

/// One session of a weekend.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Session {
    pub kind: SessionKind,
    /// Display timestamp in the home timezone, e.g. "Fri 14 March - 11:30".
    /// Null when upstream has no usable time for this session.
    pub datetime: Option<String>,
    /// Session start as a UTC instant. Null under the same condition as `datetime`.
    pub starts_at: Option<DateTime<Utc>>,
}

/// A race weekend, normalized for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeekendSummary {
    pub round: u32,
    /// Race name in uppercase (e.g. "AUSTRALIAN GRAND PRIX")
    pub race_name: String,
    pub circuit_name: String,
    pub locality: String,
    pub country: String,
    /// Human-readable span of the weekend (e.g. "14 - 16 March 2025")
    pub date_range: Option<String>,
    /// Race start as an ISO 8601 UTC instant (e.g. "2025-03-16T04:00:00.000Z")
    pub race_instant: Option<String>,
    /// Sessions in running order; RACE is always last.
    pub sessions: Vec<Session>,
    pub status: Status,
}

/// A weekend on the season calendar, with its winner.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarEntry {
    #[serde(flatten)]
    pub weekend: WeekendSummary,
    /// Winning driver, or "N/D" until the weekend is completed and classified.
    pub winner: String,
}

/// One classified line of a race, sprint or qualifying result.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RankedResult {
    pub position: u32,
    pub driver: String,
    pub constructor: String,
    /// Starting grid slot. Null when unknown; 0 is a pit-lane start.
    pub grid: Option<u32>,
    pub points: u32,
    pub q1: String,
    pub q2: String,
    pub q3: String,
}

/// Whether a result table has data to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableState {
    Published,
    /// The session has not run or results are not published yet.
    NotAvailableYet,
    /// The upstream request failed; the renderer should offer a retry.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ResultTable {
    pub state: TableState,
    pub results: Vec<RankedResult>,
}

/// Everything known about a single round.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeekendDetail {
    pub weekend: WeekendSummary,
    pub race: ResultTable,
    pub qualifying: ResultTable,
    pub sprint: ResultTable,
}

/// Which championship table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StandingsKind {
    Drivers,
    Constructors,
}

impl FromStr for StandingsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drivers" => Ok(StandingsKind::Drivers),
            "constructors" => Ok(StandingsKind::Constructors),
            other => Err(format!(
                "unknown standings kind '{}' (expected 'drivers' or 'constructors')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StandingsEntry {
    /// 1-based rank, taken from the entry's place in the table
    pub position: u32,
    pub name: String,
    /// Current team (driver standings only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Standings {
    pub kind: StandingsKind,
    pub season: String,
    /// Round the point totals reflect. Null before the first race.
    pub as_of_round: Option<u32>,
    /// Uppercase name of that round (e.g. "SAUDI ARABIAN GRAND PRIX").
    pub as_of: Option<String>,
    pub entries: Vec<StandingsEntry>,
}
