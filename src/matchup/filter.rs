use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::ranking::Ranking;
use crate::football_data::models::{Match, MatchStatus};

/// Brasília time is UTC-3 all year.
const LOCAL_OFFSET_HOURS: i64 = 3;
const LOCAL_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A top-vs-bottom match as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub home: String,
    pub away: String,
    pub status: MatchStatus,
    pub matchday: u32,
    /// Kickoff exactly as upstream sent it
    pub utc_date: String,
    pub local_date_time_br: String,
}

/// Kickoff shifted to Brasília time, e.g. `01/05/2024 12:00`.
pub fn localized_kickoff(kickoff: DateTime<Utc>) -> String {
    (kickoff - Duration::hours(LOCAL_OFFSET_HOURS))
        .format(LOCAL_FORMAT)
        .to_string()
}

/// Matches of `matchday`, not finished and kicking off at or after `now`,
/// that pit a top team against a bottom team.
///
/// Sorted by the localized kickoff text; equal kickoffs keep upstream order.
pub fn top_vs_bottom(
    ranking: &Ranking,
    matches: &[Match],
    matchday: u32,
    now: DateTime<Utc>,
) -> Vec<Fixture> {
    let mut fixtures: Vec<Fixture> = matches
        .iter()
        .filter(|m| m.matchday == Some(matchday))
        .filter(|m| !m.status.is_finished())
        .filter_map(|m| {
            let kickoff = m.kickoff().filter(|k| *k >= now)?;
            let utc_date = m.utc_date.clone()?;
            let home = m.home_name()?;
            let away = m.away_name()?;
            if !ranking.is_cross_group(home, away) {
                return None;
            }
            Some(Fixture {
                home: home.to_string(),
                away: away.to_string(),
                status: m.status,
                matchday,
                utc_date,
                local_date_time_br: localized_kickoff(kickoff),
            })
        })
        .collect();

    fixtures.sort_by(|a, b| a.local_date_time_br.cmp(&b.local_date_time_br));
    fixtures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football_data::models::MatchStatus::*;
    use crate::matchup::ranking::table_of;
    use crate::matchup::round::fixture;

    const TEAMS: [&str; 20] = [
        "Arsenal FC",
        "Liverpool FC",
        "Manchester City FC",
        "Aston Villa FC",
        "Tottenham Hotspur FC",
        "Chelsea FC",
        "Newcastle United FC",
        "Manchester United FC",
        "West Ham United FC",
        "Crystal Palace FC",
        "Brighton & Hove Albion FC",
        "AFC Bournemouth",
        "Fulham FC",
        "Wolverhampton Wanderers FC",
        "Everton FC",
        "Brentford FC",
        "Nottingham Forest FC",
        "Luton Town FC",
        "Burnley FC",
        "Sheffield United FC",
    ];

    fn ranking() -> Ranking {
        Ranking::from_table(&table_of(&TEAMS))
    }

    fn now() -> DateTime<Utc> {
        "2024-04-25T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_localized_kickoff() {
        let kickoff: DateTime<Utc> = "2024-05-01T15:00:00Z".parse().unwrap();
        assert_eq!(localized_kickoff(kickoff), "01/05/2024 12:00");
    }

    #[test]
    fn test_localized_kickoff_crosses_midnight() {
        let kickoff: DateTime<Utc> = "2024-05-01T01:30:00Z".parse().unwrap();
        assert_eq!(localized_kickoff(kickoff), "30/04/2024 22:30");
    }

    #[test]
    fn test_includes_cross_group_match_once_in_either_orientation() {
        let matches = vec![
            fixture(
                "Arsenal FC",
                "Sheffield United FC",
                Timed,
                Some(36),
                "2024-05-04T14:00:00Z",
            ),
            fixture(
                "Burnley FC",
                "Liverpool FC",
                Scheduled,
                Some(36),
                "2024-05-05T15:30:00Z",
            ),
        ];
        let out = top_vs_bottom(&ranking(), &matches, 36, now());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].home, "Arsenal FC");
        assert_eq!(out[0].local_date_time_br, "04/05/2024 11:00");
        assert_eq!(out[1].home, "Burnley FC");
        assert_eq!(out[1].away, "Liverpool FC");
        assert_eq!(out[1].utc_date, "2024-05-05T15:30:00Z");
    }

    #[test]
    fn test_excludes_same_group_and_midtable() {
        let matches = vec![
            fixture("Arsenal FC", "Liverpool FC", Timed, Some(36), "2024-05-04T14:00:00Z"),
            fixture("Burnley FC", "Luton Town FC", Timed, Some(36), "2024-05-04T14:00:00Z"),
            fixture("Arsenal FC", "Chelsea FC", Timed, Some(36), "2024-05-04T14:00:00Z"),
        ];
        assert!(top_vs_bottom(&ranking(), &matches, 36, now()).is_empty());
    }

    #[test]
    fn test_excludes_other_matchday() {
        let matches = vec![fixture(
            "Arsenal FC",
            "Burnley FC",
            Timed,
            Some(37),
            "2024-05-11T14:00:00Z",
        )];
        assert!(top_vs_bottom(&ranking(), &matches, 36, now()).is_empty());
    }

    #[test]
    fn test_excludes_finished_and_past_kickoffs() {
        let matches = vec![
            fixture("Arsenal FC", "Burnley FC", Finished, Some(36), "2024-05-04T14:00:00Z"),
            fixture(
                "Liverpool FC",
                "Luton Town FC",
                Postponed,
                Some(36),
                "2024-04-20T14:00:00Z",
            ),
            fixture("Aston Villa FC", "Sheffield United FC", Timed, Some(36), "TBD"),
        ];
        assert!(top_vs_bottom(&ranking(), &matches, 36, now()).is_empty());
    }

    #[test]
    fn test_excludes_match_without_date() {
        let mut undated = fixture("Liverpool FC", "Burnley FC", Postponed, Some(36), "");
        undated.utc_date = None;
        let matches = vec![
            undated,
            fixture("Arsenal FC", "Luton Town FC", Timed, Some(36), "2024-05-04T11:30:00Z"),
        ];
        let out = top_vs_bottom(&ranking(), &matches, 36, now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].home, "Arsenal FC");
        assert_eq!(out[0].utc_date, "2024-05-04T11:30:00Z");
    }

    #[test]
    fn test_sorted_by_localized_text() {
        let matches = vec![
            fixture("Liverpool FC", "Burnley FC", Timed, Some(36), "2024-05-05T15:30:00Z"),
            fixture("Arsenal FC", "Luton Town FC", Timed, Some(36), "2024-05-04T11:30:00Z"),
            fixture(
                "Aston Villa FC",
                "Nottingham Forest FC",
                Timed,
                Some(36),
                "2024-05-04T14:00:00Z",
            ),
        ];
        let out = top_vs_bottom(&ranking(), &matches, 36, now());
        let local: Vec<&str> = out.iter().map(|f| f.local_date_time_br.as_str()).collect();
        assert_eq!(
            local,
            vec!["04/05/2024 08:30", "04/05/2024 11:00", "05/05/2024 12:30"]
        );
    }

    #[test]
    fn test_fixture_serializes_camel_case() {
        let f = Fixture {
            home: "Arsenal FC".into(),
            away: "Burnley FC".into(),
            status: Timed,
            matchday: 36,
            utc_date: "2024-05-01T15:00:00Z".into(),
            local_date_time_br: "01/05/2024 12:00".into(),
        };
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["utcDate"], "2024-05-01T15:00:00Z");
        assert_eq!(json["localDateTimeBr"], "01/05/2024 12:00");
        assert_eq!(json["status"], "TIMED");
    }
}
