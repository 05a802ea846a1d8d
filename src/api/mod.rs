pub mod error;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::football_data::models::{Competition, TableRow};
use crate::football_data::FootballDataSource;
use crate::matchup::{plan_round, Fixture, Ranking, RoundPlan};
use error::{ApiError, MATCHES_UNAVAILABLE, TABLE_UNAVAILABLE};

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<dyn FootballDataSource>,
}

/// Build the Axum router for the public API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/leagues", get(leagues_handler))
        .route("/standings/:league", get(standings_handler))
        .route("/topvsbottom/:league", get(top_vs_bottom_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// ── Response bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LeagueSummary {
    pub id: u64,
    pub name: String,
    pub code: Option<String>,
    pub area: Option<String>,
    pub plan: Option<String>,
}

impl From<Competition> for LeagueSummary {
    fn from(c: Competition) -> Self {
        LeagueSummary {
            id: c.id,
            name: c.name,
            code: c.code,
            area: c.area.and_then(|a| a.name),
            plan: c.plan,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub position: u32,
    pub team: Option<String>,
    pub tla: Option<String>,
    pub played_games: Option<u32>,
    pub won: Option<u32>,
    pub draw: Option<u32>,
    pub lost: Option<u32>,
    pub points: Option<i32>,
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub goal_difference: Option<i32>,
}

impl From<&TableRow> for StandingEntry {
    fn from(row: &TableRow) -> Self {
        StandingEntry {
            position: row.position,
            team: row.team.name.clone(),
            tla: row.team.tla.clone(),
            played_games: row.played_games,
            won: row.won,
            draw: row.draw,
            lost: row.lost,
            points: row.points,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopVsBottomResponse {
    pub upcoming_matchday: u32,
    pub ranking: Ranking,
    pub matches: Vec<Fixture>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /leagues
async fn leagues_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LeagueSummary>>, ApiError> {
    let competitions = state.data.competitions().await.map_err(|e| {
        warn!("Failed to load competitions: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(competitions.into_iter().map(LeagueSummary::from).collect()))
}

/// GET /standings/:league
async fn standings_handler(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
) -> Result<Json<Vec<StandingEntry>>, ApiError> {
    let table = state.data.standings(&league).await.map_err(|e| {
        warn!("Failed to load standings for {}: {}", league, e);
        ApiError::load_failed(e, TABLE_UNAVAILABLE)
    })?;
    Ok(Json(table.iter().map(StandingEntry::from).collect()))
}

/// GET /topvsbottom/:league
async fn top_vs_bottom_handler(
    State(state): State<Arc<AppState>>,
    Path(league): Path<String>,
) -> Result<Response, ApiError> {
    let table = state.data.standings(&league).await.map_err(|e| {
        warn!("Failed to load standings for {}: {}", league, e);
        ApiError::load_failed(e, TABLE_UNAVAILABLE)
    })?;
    let matches = state.data.matches(&league).await.map_err(|e| {
        warn!("Failed to load matches for {}: {}", league, e);
        ApiError::load_failed(e, MATCHES_UNAVAILABLE)
    })?;

    match plan_round(&table, &matches, Utc::now()) {
        RoundPlan::Upcoming {
            matchday,
            ranking,
            fixtures,
        } => {
            info!(
                "{}: matchday {} has {} top-vs-bottom fixture(s)",
                league,
                matchday,
                fixtures.len()
            );
            Ok(Json(TopVsBottomResponse {
                upcoming_matchday: matchday,
                ranking,
                matches: fixtures,
            })
            .into_response())
        }
        RoundPlan::NoUpcomingRound => {
            info!("{}: no upcoming matchday", league);
            Ok(Json(MessageResponse {
                message: format!("No upcoming matchday found for league {}.", league),
            })
            .into_response())
        }
    }
}
