//! Session assembly: turns the optional per-session sub-objects of a raw
//! weekend into an ordered, kind-unique session list ending with RACE.

use chrono_tz::Tz;

use crate::models::{Session, SessionKind};
use crate::services::jolpica::RawRace;
use crate::services::time_format::{civil_to_utc, format_date_time, TimeError};

fn build_session(
    kind: SessionKind,
    date: Option<&str>,
    time: Option<&str>,
    round: Option<&str>,
    tz: Tz,
) -> Session {
    let timed = match (date, time) {
        (Some(d), Some(t)) => civil_to_utc(d, t, tz)
            .and_then(|starts_at| format_date_time(d, t, tz).map(|label| (starts_at, label))),
        (Some(_), None) => Err(TimeError::MissingTime),
        (None, _) => Err(TimeError::MissingDate),
    };

    match timed {
        Ok((starts_at, datetime)) => Session {
            kind,
            datetime: Some(datetime),
            starts_at: Some(starts_at),
        },
        Err(e) => {
            tracing::warn!(
                "Round {}: {} has no usable start time: {}",
                round.unwrap_or("?"),
                kind,
                e
            );
            Session {
                kind,
                datetime: None,
                starts_at: None,
            }
        }
    }
}

/// Assemble the sessions of a weekend.
///
/// Pre-race sessions appear in running order (FP1, FP2, FP3, SPRINT QUALIFYING,
/// SPRINT, QUALIFYING) when upstream lists them; RACE is appended from the
/// record's own date/time even if those are missing.
pub fn assemble_sessions(raw: &RawRace, tz: Tz) -> Vec<Session> {
    let round = raw.round.as_deref();
    let mut sessions: Vec<Session> = SessionKind::BEFORE_RACE
        .iter()
        .filter_map(|&kind| {
            raw.session(kind).map(|s| {
                build_session(kind, s.date.as_deref(), s.time.as_deref(), round, tz)
            })
        })
        .collect();

    sessions.push(build_session(
        SessionKind::Race,
        raw.date.as_deref(),
        raw.time.as_deref(),
        round,
        tz,
    ));
    sessions
}
