use async_trait::async_trait;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::error::UpstreamResult;
use super::models::{Competition, Match, TableRow};
use super::provider::FootballDataSource;
use super::response_cache::TtlCache;

const COMPETITIONS_KEY: &str = "competitions_all";

/// How long each kind of upstream response stays fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub standings: Duration,
    pub matches: Duration,
    pub competitions: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        CacheTtls {
            standings: Duration::from_secs(12 * 60 * 60),
            matches: Duration::from_secs(5 * 60),
            competitions: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Response cache for all three upstream resources.
///
/// Cheap to clone; clones share storage.
#[derive(Clone, Default)]
pub struct ResponseCache {
    competitions: TtlCache<Vec<Competition>>,
    standings: TtlCache<Vec<TableRow>>,
    matches: TtlCache<Vec<Match>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn purge_expired(&self) -> usize {
        self.competitions.purge_expired().await
            + self.standings.purge_expired().await
            + self.matches.purge_expired().await
    }

    pub async fn len(&self) -> usize {
        self.competitions.len().await + self.standings.len().await + self.matches.len().await
    }
}

/// Periodically drops expired entries for leagues nobody asks about any more.
pub fn spawn_sweeper(cache: ResponseCache, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let removed = cache.purge_expired().await;
            if removed > 0 {
                debug!(
                    "Cache sweep removed {} expired entries, {} remain",
                    removed,
                    cache.len().await
                );
            }
        }
    })
}

fn standings_key(league: &str) -> String {
    format!("standings_{}", league)
}

fn matches_key(league: &str) -> String {
    format!("matches_{}", league)
}

/// Wraps a data source and memoizes each response until its TTL runs out.
pub struct CachedFootballData<S> {
    upstream: S,
    cache: ResponseCache,
    ttls: CacheTtls,
}

impl<S: FootballDataSource> CachedFootballData<S> {
    pub fn new(upstream: S, cache: ResponseCache, ttls: CacheTtls) -> Self {
        info!(
            "Response cache TTLs: standings={:?}, matches={:?}, competitions={:?}",
            ttls.standings, ttls.matches, ttls.competitions
        );
        CachedFootballData {
            upstream,
            cache,
            ttls,
        }
    }
}

#[async_trait]
impl<S: FootballDataSource> FootballDataSource for CachedFootballData<S> {
    async fn competitions(&self) -> UpstreamResult<Vec<Competition>> {
        self.cache
            .competitions
            .get_or_fetch(COMPETITIONS_KEY, self.ttls.competitions, || {
                self.upstream.competitions()
            })
            .await
    }

    async fn standings(&self, league: &str) -> UpstreamResult<Vec<TableRow>> {
        self.cache
            .standings
            .get_or_fetch(&standings_key(league), self.ttls.standings, || {
                self.upstream.standings(league)
            })
            .await
    }

    async fn matches(&self, league: &str) -> UpstreamResult<Vec<Match>> {
        self.cache
            .matches
            .get_or_fetch(&matches_key(league), self.ttls.matches, || {
                self.upstream.matches(league)
            })
            .await
    }
}
