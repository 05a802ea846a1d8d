use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use crate::football_data::CacheTtls;

/// Upper bound for any cache TTL: one year.
const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Top-4 vs bottom-4 fixture finder for football-data.org leagues
#[derive(Parser, Debug, Clone)]
#[command(name = "topvsbottom", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: String,

    /// football-data.org API base URL (BaseUrl)
    #[arg(
        long,
        env = "FOOTBALL_DATA_BASE_URL",
        default_value = "https://api.football-data.org/v4"
    )]
    pub base_url: String,

    /// football-data.org API key, sent as X-Auth-Token (ApiKey)
    #[arg(long, env = "FOOTBALL_DATA_API_KEY")]
    pub api_key: Option<String>,

    /// Timeout for each upstream request, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,

    /// How long league tables stay cached, in seconds
    #[arg(long, env = "STANDINGS_TTL_SECS", default_value = "43200")]
    pub standings_ttl_secs: u64,

    /// How long match lists stay cached, in seconds
    #[arg(long, env = "MATCHES_TTL_SECS", default_value = "300")]
    pub matches_ttl_secs: u64,

    /// How long the competition list stays cached, in seconds
    #[arg(long, env = "COMPETITIONS_TTL_SECS", default_value = "86400")]
    pub competitions_ttl_secs: u64,

    /// Interval between sweeps of expired cache entries, in seconds
    #[arg(long, env = "CACHE_SWEEP_SECS", default_value = "600")]
    pub cache_sweep_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let base = url::Url::parse(&self.base_url).map_err(|e| {
            anyhow::anyhow!("base_url '{}' is not a valid URL: {}", self.base_url, e)
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("base_url must use http or https");
        }
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("listen_addr '{}' is invalid: {}", self.listen_addr, e))?;
        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("upstream_timeout_secs must be positive");
        }
        let ttls = [
            self.standings_ttl_secs,
            self.matches_ttl_secs,
            self.competitions_ttl_secs,
        ];
        if ttls.contains(&0) {
            anyhow::bail!("cache TTLs must be positive");
        }
        if ttls.iter().any(|&secs| secs > MAX_TTL_SECS) {
            anyhow::bail!("cache TTLs must not exceed {} seconds", MAX_TTL_SECS);
        }
        if self.cache_sweep_secs == 0 {
            anyhow::bail!("cache_sweep_secs must be positive");
        }
        Ok(())
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_secs)
    }

    pub fn cache_ttls(&self) -> CacheTtls {
        CacheTtls {
            standings: Duration::from_secs(self.standings_ttl_secs),
            matches: Duration::from_secs(self.matches_ttl_secs),
            competitions: Duration::from_secs(self.competitions_ttl_secs),
        }
    }
}
