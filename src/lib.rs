pub mod api;
pub mod cache;
pub mod charts;
pub mod config;
pub mod export;
pub mod models;
pub mod nav;
pub mod normalize;

use anyhow::{Context, Result};
use api::api_sports::ApiSportsClient;
use api::football_data::FootballDataClient;
use api::odds_api::{OddsApiClient, DEFAULT_MARKET, DEFAULT_REGION};
use api::{CachedFetcher, FetchError, HttpClient};
use chrono::{Datelike, Utc};
use config::Credentials;
use models::{MatchRow, OddsGame, PerformanceLookup, PlayerRow, StandingRow, TeamRow};
use std::sync::Arc;

/// The three provider clients sharing one TTL-cached fetcher.
pub struct DataHub {
    pub football: FootballDataClient,
    pub players: ApiSportsClient,
    pub odds: OddsApiClient,
}

impl DataHub {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let http = HttpClient::new(credentials).context("failed to build the HTTP client")?;
        let fetcher = Arc::new(CachedFetcher::new(http));
        Ok(Self {
            football: FootballDataClient::new(Arc::clone(&fetcher)),
            players: ApiSportsClient::new(Arc::clone(&fetcher)),
            odds: OddsApiClient::new(fetcher),
        })
    }
}

/// All the per-league tables one dashboard view needs, plus any warnings
/// collected while loading them. A failed fetch shows up as an empty table
/// and a warning, never as an error.
#[derive(Debug, Default)]
pub struct LeagueTables {
    pub teams: Vec<TeamRow>,
    pub standings: Vec<StandingRow>,
    pub matches: Vec<MatchRow>,
    pub warnings: Vec<String>,
}

impl LeagueTables {
    /// Team selector options derived from the team table.
    pub fn team_options(&self) -> Vec<(u64, String)> {
        self.teams.iter().map(|t| (t.id, t.name.clone())).collect()
    }
}

/// Load teams, standings, and matches for a league, sequentially through
/// the cache.
pub async fn load_league_tables(hub: &DataHub, league: &str) -> LeagueTables {
    let mut warnings = Vec::new();
    let teams = or_empty(
        hub.football.competition_teams(league).await,
        "team data",
        &mut warnings,
    );
    let standings = or_empty(
        hub.football.competition_standings(league).await,
        "standings",
        &mut warnings,
    );
    let matches = or_empty(
        hub.football.competition_matches(league).await,
        "match data",
        &mut warnings,
    );

    LeagueTables {
        teams,
        standings,
        matches,
        warnings,
    }
}

/// Squad of a team, ages derived against the current year.
pub async fn load_squad(hub: &DataHub, team_id: u64) -> (Vec<PlayerRow>, Vec<String>) {
    let mut warnings = Vec::new();
    let squad = or_empty(
        hub.football.team_squad(team_id, Utc::now().year()).await,
        "player data",
        &mut warnings,
    );
    (squad, warnings)
}

/// Season statistics looked up by player name.
pub async fn load_performance(hub: &DataHub, name: &str) -> (PerformanceLookup, Vec<String>) {
    match hub.players.player_performance(name).await {
        Ok(lookup) => (lookup, Vec::new()),
        Err(err) => {
            tracing::warn!(%err, "performance lookup failed");
            (
                PerformanceLookup::default(),
                vec![format!("player performance: {err}")],
            )
        }
    }
}

/// Current soccer odds (EU region, head-to-head market).
pub async fn load_odds(hub: &DataHub) -> (Vec<OddsGame>, Vec<String>) {
    let mut warnings = Vec::new();
    let games = or_empty(
        hub.odds.soccer_odds(DEFAULT_REGION, DEFAULT_MARKET).await,
        "odds data",
        &mut warnings,
    );
    (games, warnings)
}

fn or_empty<T>(
    result: Result<Vec<T>, FetchError>,
    what: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(%err, what, "fetch failed, showing empty table");
            warnings.push(format!("{what}: {err}"));
            Vec::new()
        }
    }
}
