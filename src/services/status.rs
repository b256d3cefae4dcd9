//! Weekend lifecycle status.
//!
//! Status is a pure function of the current instant and the weekend's session
//! instants. The current instant comes from a [`Clock`] so status transitions
//! can be tested at exact boundaries.

use chrono::{DateTime, Utc};

use crate::models::{Session, SessionKind, Status};

/// Source of "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Classify a weekend at `now`.
///
/// 1. race has started (`race <= now`): COMPLETED
/// 2. first session has started (`first_session <= now < race`): ONGOING
/// 3. otherwise UPCOMING, including when the race is not scheduled yet.
pub fn resolve_status(
    now: DateTime<Utc>,
    first_session: Option<DateTime<Utc>>,
    race: Option<DateTime<Utc>>,
) -> Status {
    let Some(race) = race else {
        return Status::Upcoming;
    };
    if race <= now {
        return Status::Completed;
    }
    match first_session {
        Some(first) if first <= now => Status::Ongoing,
        _ => Status::Upcoming,
    }
}

/// Earliest start among the pre-race sessions that have a usable time.
///
/// On formats without practice this is sprint qualifying, so such weekends
/// still get an ONGOING window. The race itself is never used as the bound.
pub fn first_session_start(sessions: &[Session]) -> Option<DateTime<Utc>> {
    sessions
        .iter()
        .filter(|s| s.kind != SessionKind::Race)
        .filter_map(|s| s.starts_at)
        .min()
}

pub fn race_start(sessions: &[Session]) -> Option<DateTime<Utc>> {
    sessions
        .iter()
        .find(|s| s.kind == SessionKind::Race)
        .and_then(|s| s.starts_at)
}

impl Status {
    /// Relabel for the next-weekend view: the nearest weekend that has not
    /// started is NEXT rather than UPCOMING.
    pub fn as_next(self) -> Status {
        match self {
            Status::Upcoming => Status::Next,
            other => other,
        }
    }
}
