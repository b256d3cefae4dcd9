//! Builds a `WeekendSummary` from one raw race record.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::helpers::parse_u32;
use crate::models::{SessionKind, WeekendSummary};
use crate::services::jolpica::RawRace;
use crate::services::sessions::assemble_sessions;
use crate::services::status::{first_session_start, race_start, resolve_status};
use crate::services::time_format::{format_date_range, parse_date, to_iso_instant};

/// Calendar day of an instant in the home timezone, as `YYYY-MM-DD`.
fn home_day(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).date_naive().to_string()
}

/// Earliest upstream date among the pre-race sessions, used when none of
/// them has a usable start instant.
fn first_listed_day(raw: &RawRace) -> Option<String> {
    SessionKind::BEFORE_RACE
        .iter()
        .filter_map(|&kind| raw.session(kind))
        .filter_map(|s| s.date.as_deref())
        .filter_map(|d| parse_date(d).ok())
        .min()
        .map(|d| d.to_string())
}

/// Normalize a raw weekend evaluated at `now`.
///
/// Returns None when the record has no valid round number, since a weekend
/// without one cannot be addressed by the rest of the model.
pub fn summarize_weekend(raw: &RawRace, tz: Tz, now: DateTime<Utc>) -> Option<WeekendSummary> {
    let round = match parse_u32(raw.round.as_deref()) {
        Some(r) if r >= 1 => r,
        _ => {
            tracing::warn!("Skipping race record with invalid round {:?}", raw.round);
            return None;
        }
    };

    let sessions = assemble_sessions(raw, tz);
    let first_at = first_session_start(&sessions);
    let race_at = race_start(&sessions);
    let status = resolve_status(now, first_at, race_at);

    // Range days follow the home timezone, like the session timestamps.
    let last_day = race_at.map(|at| home_day(at, tz)).or_else(|| raw.date.clone());
    let first_day = first_at
        .map(|at| home_day(at, tz))
        .or_else(|| first_listed_day(raw))
        .or_else(|| last_day.clone());
    let date_range = match (first_day, last_day) {
        (Some(start), Some(end)) => match format_date_range(&start, &end) {
            Ok(range) => Some(range),
            Err(e) => {
                tracing::warn!("Round {}: cannot format date range: {}", round, e);
                None
            }
        },
        _ => None,
    };

    let race_instant = match (raw.date.as_deref(), raw.time.as_deref()) {
        (Some(date), Some(time)) => to_iso_instant(date, time, tz).ok(),
        _ => None,
    };

    let circuit = raw.circuit.clone().unwrap_or_default();
    let location = circuit.location.unwrap_or_default();

    Some(WeekendSummary {
        round,
        race_name: raw
            .race_name
            .as_deref()
            .map(|n| n.trim().to_uppercase())
            .unwrap_or_default(),
        circuit_name: circuit.circuit_name.unwrap_or_default(),
        locality: location.locality.unwrap_or_default(),
        country: location.country.unwrap_or_default(),
        date_range,
        race_instant,
        sessions,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::services::jolpica::{RawCircuit, RawLocation, RawSession};
    use chrono_tz::Europe::Lisbon;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    fn session(date: &str, time: &str) -> Option<RawSession> {
        Some(RawSession {
            date: Some(date.into()),
            time: Some(time.into()),
        })
    }

    fn melbourne() -> RawRace {
        RawRace {
            round: Some("1".into()),
            race_name: Some("Australian Grand Prix".into()),
            circuit: Some(RawCircuit {
                circuit_name: Some("Albert Park Grand Prix Circuit".into()),
                location: Some(RawLocation {
                    locality: Some("Melbourne".into()),
                    country: Some("Australia".into()),
                }),
            }),
            date: Some("2025-03-16".into()),
            time: Some("14:00".into()),
            first_practice: session("2025-03-14", "11:30"),
            qualifying: session("2025-03-15", "15:00"),
            ..Default::default()
        }
    }

    #[test]
    fn test_ongoing_weekend_scenario() {
        let summary = summarize_weekend(&melbourne(), Lisbon, utc("2025-03-15T16:00:00Z")).unwrap();

        assert_eq!(summary.status, Status::Ongoing);
        let kinds: Vec<SessionKind> = summary.sessions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SessionKind::FirstPractice,
                SessionKind::Qualifying,
                SessionKind::Race
            ]
        );
        assert_eq!(summary.race_name, "AUSTRALIAN GRAND PRIX");
        assert_eq!(summary.locality, "Melbourne");
        assert_eq!(summary.date_range.as_deref(), Some("14 - 16 March 2025"));
        assert_eq!(
            summary.race_instant.as_deref(),
            Some("2025-03-16T14:00:00.000Z")
        );
    }

    #[test]
    fn test_sprint_only_weekend_can_be_ongoing() {
        let raw = RawRace {
            round: Some("6".into()),
            date: Some("2025-05-04".into()),
            time: Some("20:00:00Z".into()),
            sprint_qualifying: session("2025-05-02", "20:30:00Z"),
            sprint: session("2025-05-03", "16:00:00Z"),
            qualifying: session("2025-05-03", "20:00:00Z"),
            ..Default::default()
        };

        let summary = summarize_weekend(&raw, Lisbon, utc("2025-05-02T21:00:00Z")).unwrap();
        assert_eq!(summary.status, Status::Ongoing);
        assert_eq!(summary.date_range.as_deref(), Some("2 - 4 May 2025"));
    }

    #[test]
    fn test_unscheduled_race_is_upcoming_without_instant() {
        let raw = RawRace {
            round: Some("24".into()),
            race_name: Some("Abu Dhabi Grand Prix".into()),
            date: Some("2025-12-07".into()),
            ..Default::default()
        };

        let summary = summarize_weekend(&raw, Lisbon, utc("2025-12-08T00:00:00Z")).unwrap();
        assert_eq!(summary.status, Status::Upcoming);
        assert!(summary.race_instant.is_none());
        assert_eq!(summary.date_range.as_deref(), Some("7 December 2025"));
    }

    #[test]
    fn test_malformed_dates_omit_range() {
        let raw = RawRace {
            round: Some("3".into()),
            date: Some("07/04/2025".into()),
            time: Some("05:00:00Z".into()),
            ..Default::default()
        };

        let summary = summarize_weekend(&raw, Lisbon, utc("2025-04-01T00:00:00Z")).unwrap();
        assert!(summary.date_range.is_none());
        assert!(summary.race_instant.is_none());
        assert!(summary.sessions[0].datetime.is_none());
    }

    #[test]
    fn test_date_range_uses_home_timezone_days() {
        // 23:30Z on Friday 13 June is 00:30 on Saturday in Lisbon (UTC+1).
        let raw = RawRace {
            round: Some("10".into()),
            date: Some("2025-06-15".into()),
            time: Some("13:00:00Z".into()),
            first_practice: session("2025-06-13", "23:30:00Z"),
            ..Default::default()
        };

        let summary = summarize_weekend(&raw, Lisbon, utc("2025-06-01T00:00:00Z")).unwrap();
        assert_eq!(
            summary.sessions[0].datetime.as_deref(),
            Some("Sat 14 June - 00:30")
        );
        assert_eq!(summary.date_range.as_deref(), Some("14 - 15 June 2025"));
    }

    #[test]
    fn test_date_range_falls_back_to_listed_dates() {
        let raw = RawRace {
            round: Some("11".into()),
            date: Some("2025-06-29".into()),
            first_practice: Some(RawSession {
                date: Some("2025-06-27".into()),
                time: None,
            }),
            ..Default::default()
        };

        let summary = summarize_weekend(&raw, Lisbon, utc("2025-06-01T00:00:00Z")).unwrap();
        assert_eq!(summary.date_range.as_deref(), Some("27 - 29 June 2025"));
    }

    #[test]
    fn test_invalid_round_is_skipped() {
        let mut raw = melbourne();
        raw.round = Some("zero".into());
        assert!(summarize_weekend(&raw, Lisbon, utc("2025-03-15T16:00:00Z")).is_none());
        raw.round = Some("0".into());
        assert!(summarize_weekend(&raw, Lisbon, utc("2025-03-15T16:00:00Z")).is_none());
    }

    #[test]
    fn test_pure_function_of_inputs() {
        let now = utc("2025-03-15T16:00:00Z");
        let a = summarize_weekend(&melbourne(), Lisbon, now);
        let b = summarize_weekend(&melbourne(), Lisbon, now);
        assert_eq!(a, b);
    }
}
