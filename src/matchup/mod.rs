pub mod filter;
pub mod ranking;
pub mod round;

pub use filter::{top_vs_bottom, Fixture};
pub use ranking::Ranking;
pub use round::select_upcoming_matchday;

use chrono::{DateTime, Utc};

use crate::football_data::models::{Match, TableRow};

/// Outcome of looking for the next top-vs-bottom round of a league.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundPlan {
    Upcoming {
        matchday: u32,
        ranking: Ranking,
        fixtures: Vec<Fixture>,
    },
    NoUpcomingRound,
}

/// Rank the table, pick the upcoming matchday and keep its top-vs-bottom
/// fixtures.
pub fn plan_round(table: &[TableRow], matches: &[Match], now: DateTime<Utc>) -> RoundPlan {
    let ranking = Ranking::from_table(table);
    match select_upcoming_matchday(matches, now) {
        Some(matchday) => {
            let fixtures = top_vs_bottom(&ranking, matches, matchday, now);
            RoundPlan::Upcoming {
                matchday,
                ranking,
                fixtures,
            }
        }
        None => RoundPlan::NoUpcomingRound,
    }
}
