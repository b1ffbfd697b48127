//! API credentials and the fixed set of supported leagues.

use anyhow::{Context, Result};
use std::env;

/// API keys for the three data providers, read from the environment
/// (a `.env` file is loaded by the binaries before this runs).
#[derive(Debug, Clone)]
pub struct Credentials {
    pub football_data: String,
    pub api_sports: String,
    pub odds: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            football_data: env::var("FOOTBALL_DATA_API_KEY")
                .context("FOOTBALL_DATA_API_KEY is not set")?,
            api_sports: env::var("API_SPORTS_KEY").context("API_SPORTS_KEY is not set")?,
            odds: env::var("ODDS_API_KEY").context("ODDS_API_KEY is not set")?,
        })
    }
}

/// Supported competitions as (display name, football-data.org code).
pub const LEAGUES: [(&str, &str); 8] = [
    ("Premier League", "PL"),
    ("La Liga", "PD"),
    ("Serie A", "SA"),
    ("Bundesliga", "BL1"),
    ("Ligue 1", "FL1"),
    ("Eredivisie", "DED"),
    ("Primeira Liga", "PPL"),
    ("Brasileirão Série A", "BSA"),
];

pub const DEFAULT_LEAGUE: &str = "PL";

pub fn league_name(code: &str) -> Option<&'static str> {
    LEAGUES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

pub fn is_known_league(code: &str) -> bool {
    league_name(code).is_some()
}
