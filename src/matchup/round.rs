//! Choosing which matchday counts as "upcoming".
//!
//! Kickoff dates are the first signal: the earliest round that still has a
//! match dated now or later. Postponed fixtures often keep a stale or
//! unparseable date while still being unplayed, so when no dated match lies
//! ahead the earliest round with a match not yet FINISHED is used instead.

use chrono::{DateTime, Utc};

use crate::football_data::models::Match;

/// Smallest matchday among matches kicking off at or after `now`, falling back
/// to the smallest matchday among unfinished matches. `None` when neither
/// exists. Matches without a matchday are ignored.
pub fn select_upcoming_matchday(matches: &[Match], now: DateTime<Utc>) -> Option<u32> {
    earliest_future_matchday(matches, now).or_else(|| earliest_unfinished_matchday(matches))
}

fn earliest_future_matchday(matches: &[Match], now: DateTime<Utc>) -> Option<u32> {
    matches
        .iter()
        .filter(|m| m.kickoff().is_some_and(|kickoff| kickoff >= now))
        .filter_map(|m| m.matchday)
        .min()
}

fn earliest_unfinished_matchday(matches: &[Match]) -> Option<u32> {
    matches
        .iter()
        .filter(|m| !m.status.is_finished())
        .filter_map(|m| m.matchday)
        .min()
}

#[cfg(test)]
pub(crate) fn fixture(
    home: &str,
    away: &str,
    status: crate::football_data::models::MatchStatus,
    matchday: Option<u32>,
    utc_date: &str,
) -> Match {
    use crate::football_data::models::TeamRef;

    Match {
        utc_date: Some(utc_date.to_string()),
        status,
        matchday,
        home_team: TeamRef {
            name: Some(home.to_string()),
            ..TeamRef::default()
        },
        away_team: TeamRef {
            name: Some(away.to_string()),
            ..TeamRef::default()
        },
    }
}
