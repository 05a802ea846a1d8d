//! Typed shapes of the football-data.org v4 responses.
//!
//! Only the fields the service reads are declared. Everything upstream may
//! leave out is an `Option` so a sparse payload still decodes; the client
//! turns a missing top-level array into `UpstreamError::MissingField`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ── Envelopes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompetitionsEnvelope {
    pub competitions: Option<Vec<Competition>>,
}

#[derive(Debug, Deserialize)]
pub struct StandingsEnvelope {
    pub standings: Option<Vec<StandingGroup>>,
}

#[derive(Debug, Deserialize)]
pub struct MatchesEnvelope {
    pub matches: Option<Vec<Match>>,
}

// ── Competitions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Competition {
    pub id: u64,
    pub name: String,
    pub code: Option<String>,
    pub area: Option<Area>,
    /// Subscription tier, e.g. "TIER_ONE"
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: Option<String>,
}

// ── Standings ─────────────────────────────────────────────────────────────────

/// One standings group. Leagues return TOTAL, HOME and AWAY groups; the
/// first one is the overall table.
#[derive(Debug, Clone, Deserialize)]
pub struct StandingGroup {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub table: Option<Vec<TableRow>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub position: u32,
    pub team: TeamRef,
    pub played_games: Option<u32>,
    pub won: Option<u32>,
    pub draw: Option<u32>,
    pub lost: Option<u32>,
    pub points: Option<i32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub goal_difference: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    /// Null for knockout slots whose participant is not decided yet
    pub name: Option<String>,
    pub tla: Option<String>,
}

// ── Matches ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// RFC 3339 kickoff time. Kept as text; parsed where it is compared.
    /// Rescheduled fixtures may come back with no date at all.
    #[serde(default)]
    pub utc_date: Option<String>,
    #[serde(default, deserialize_with = "status_or_unknown")]
    pub status: MatchStatus,
    /// Null for cup fixtures outside the regular rounds
    pub matchday: Option<u32>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
}

impl Match {
    pub fn home_name(&self) -> Option<&str> {
        self.home_team.name.as_deref()
    }

    pub fn away_name(&self) -> Option<&str> {
        self.away_team.name.as_deref()
    }

    /// Parsed kickoff, or `None` when upstream sent no date or something that
    /// is not RFC 3339.
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        let raw = self.utc_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A null status reads the same as an absent or unrecognised one.
fn status_or_unknown<'de, D>(deserializer: D) -> Result<MatchStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MatchStatus>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    Awarded,
    Live,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    pub fn is_finished(self) -> bool {
        self == MatchStatus::Finished
    }
}
