use async_trait::async_trait;

use super::error::UpstreamResult;
use super::models::{Competition, Match, TableRow};

/// Source of league data. Implemented by the HTTP client and by the caching
/// wrapper around it.
#[async_trait]
pub trait FootballDataSource: Send + Sync {
    /// All competitions visible to the API key.
    async fn competitions(&self) -> UpstreamResult<Vec<Competition>>;

    /// Overall table of a league, rank 1 first.
    async fn standings(&self, league: &str) -> UpstreamResult<Vec<TableRow>>;

    /// Every match of the league's current season.
    async fn matches(&self, league: &str) -> UpstreamResult<Vec<Match>>;
}
