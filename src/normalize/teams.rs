//! Teams normalizer for `competitions/{league}/teams` responses.
//!
//! Defaulting rules:
//!
//! | field              | missing/null           |
//! |--------------------|------------------------|
//! | coach_name         | "Unknown" (both names blank) |
//! | coach_nationality  | "Unknown"              |
//! | contract_start/until | "N/A"                |
//! | area_name          | "Unknown"              |
//! | area_code, venue, website | "N/A"           |
//! | founded, area_id   | left empty             |
//!
//! Names, nationalities and area names are title-cased when present.

use super::{parse_or_default, title_case, NOT_AVAILABLE, UNKNOWN};
use crate::models::TeamRow;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<RawTeam>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTeam {
    #[serde(default)]
    id: u64,
    name: Option<String>,
    founded: Option<u32>,
    venue: Option<String>,
    website: Option<String>,
    #[serde(default)]
    coach: Option<RawCoach>,
    #[serde(default)]
    area: Option<RawArea>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoach {
    first_name: Option<String>,
    last_name: Option<String>,
    nationality: Option<String>,
    #[serde(default)]
    contract: Option<RawContract>,
}

#[derive(Debug, Default, Deserialize)]
struct RawContract {
    start: Option<String>,
    until: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawArea {
    id: Option<u64>,
    name: Option<String>,
    code: Option<String>,
    flag: Option<String>,
}

/// Flatten a teams response into the team table. A payload without a
/// `teams` collection yields an empty table.
pub fn team_table(raw: &Value) -> Vec<TeamRow> {
    let response: TeamsResponse = parse_or_default(raw);
    response.teams.into_iter().map(normalize_team).collect()
}

fn normalize_team(team: RawTeam) -> TeamRow {
    let coach = team.coach.unwrap_or_default();
    let contract = coach.contract.unwrap_or_default();
    let area = team.area.unwrap_or_default();

    let full_name = format!(
        "{} {}",
        coach.first_name.unwrap_or_default(),
        coach.last_name.unwrap_or_default()
    );
    let full_name = full_name.trim();
    let coach_name = if full_name.is_empty() {
        UNKNOWN.to_string()
    } else {
        title_case(full_name)
    };

    TeamRow {
        id: team.id,
        name: team.name.unwrap_or_default(),
        founded: team.founded,
        venue: team.venue.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        website: team.website.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        coach_name,
        coach_nationality: coach
            .nationality
            .map(|n| title_case(&n))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        contract_start: contract.start.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        contract_until: contract.until.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        area_name: area
            .name
            .map(|n| title_case(&n))
            .unwrap_or_else(|| UNKNOWN.to_string()),
        area_code: area.code.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        area_flag: area.flag.unwrap_or_default(),
        area_id: area.id,
    }
}
