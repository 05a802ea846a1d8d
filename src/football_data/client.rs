use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::{UpstreamError, UpstreamResult};
use super::models::{
    Competition, CompetitionsEnvelope, Match, MatchesEnvelope, StandingsEnvelope, TableRow,
};
use super::provider::FootballDataSource;

const AUTH_HEADER: &str = "X-Auth-Token";

/// Client for the football-data.org v4 REST API.
#[derive(Clone)]
pub struct FootballDataClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FootballDataClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FootballDataClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// GET `{base}{path}` and return the body text of a 2xx response.
    async fn get_text(&self, path: &str) -> UpstreamResult<(String, String)> {
        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            req = req.header(AUTH_HEADER, key);
        }

        let resp = req.send().await.map_err(|source| UpstreamError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { url, status, body });
        }

        let body = resp.text().await.map_err(|source| UpstreamError::Transport {
            url: url.clone(),
            source,
        })?;
        Ok((url, body))
    }
}

#[async_trait]
impl FootballDataSource for FootballDataClient {
    async fn competitions(&self) -> UpstreamResult<Vec<Competition>> {
        let (url, body) = self.get_text("/competitions").await?;
        decode_competitions(&url, &body)
    }

    async fn standings(&self, league: &str) -> UpstreamResult<Vec<TableRow>> {
        let (url, body) = self
            .get_text(&format!("/competitions/{}/standings", league))
            .await?;
        decode_standings(&url, &body)
    }

    async fn matches(&self, league: &str) -> UpstreamResult<Vec<Match>> {
        let (url, body) = self
            .get_text(&format!("/competitions/{}/matches", league))
            .await?;
        decode_matches(&url, &body)
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> UpstreamResult<T> {
    serde_json::from_str(body).map_err(|source| UpstreamError::Decode {
        url: url.to_string(),
        source,
    })
}

fn missing(url: &str, field: &'static str) -> UpstreamError {
    UpstreamError::MissingField {
        url: url.to_string(),
        field,
    }
}

fn decode_competitions(url: &str, body: &str) -> UpstreamResult<Vec<Competition>> {
    let env: CompetitionsEnvelope = decode(url, body)?;
    env.competitions.ok_or_else(|| missing(url, "competitions"))
}

/// Only the first group is used: for leagues that is the TOTAL table.
fn decode_standings(url: &str, body: &str) -> UpstreamResult<Vec<TableRow>> {
    let env: StandingsEnvelope = decode(url, body)?;
    let group = env
        .standings
        .and_then(|groups| groups.into_iter().next())
        .ok_or_else(|| missing(url, "standings"))?;
    debug!("Using standings group {:?}", group.kind);
    group.table.ok_or_else(|| missing(url, "standings[0].table"))
}

fn decode_matches(url: &str, body: &str) -> UpstreamResult<Vec<Match>> {
    let env: MatchesEnvelope = decode(url, body)?;
    env.matches.ok_or_else(|| missing(url, "matches"))
}
