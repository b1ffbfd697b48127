//! Matches normalizer for `competitions/{league}/matches` responses.

use super::parse_or_default;
use crate::models::{MatchRow, MatchStatus};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatch {
    #[serde(default)]
    home_team: Option<RawTeamRef>,
    #[serde(default)]
    away_team: Option<RawTeamRef>,
    #[serde(default)]
    score: Option<RawScore>,
    status: Option<MatchStatus>,
    utc_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTeamRef {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScore {
    #[serde(default)]
    full_time: Option<RawFullTime>,
}

// Both API vintages are accepted: v4 serves `home`/`away`, v2 served
// `homeTeam`/`awayTeam`.
#[derive(Debug, Default, Deserialize)]
struct RawFullTime {
    #[serde(alias = "homeTeam")]
    home: Option<u32>,
    #[serde(alias = "awayTeam")]
    away: Option<u32>,
}

/// Flatten a matches response. Scores stay `None` until the match has been
/// played; an unrecognized status maps to `UNKNOWN`.
pub fn match_table(raw: &Value) -> Vec<MatchRow> {
    let response: MatchesResponse = parse_or_default(raw);
    response
        .matches
        .into_iter()
        .map(|m| {
            let full_time = m.score.and_then(|s| s.full_time).unwrap_or_default();
            MatchRow {
                home_team: m.home_team.and_then(|t| t.name).unwrap_or_default(),
                away_team: m.away_team.and_then(|t| t.name).unwrap_or_default(),
                score_home: full_time.home,
                score_away: full_time.away,
                status: m.status.unwrap_or(MatchStatus::Unknown),
                date: m.utc_date,
            }
        })
        .collect()
}

/// The "Upcoming Matches" view: SCHEDULED matches only.
pub fn upcoming(matches: &[MatchRow]) -> Vec<MatchRow> {
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Scheduled)
        .cloned()
        .collect()
}
