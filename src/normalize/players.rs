//! Squad normalizer for `teams/{id}` responses.

use super::{parse_or_default, UNKNOWN};
use crate::models::PlayerRow;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct TeamDetailResponse {
    #[serde(default)]
    squad: Vec<RawPlayer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayer {
    name: Option<String>,
    position: Option<String>,
    date_of_birth: Option<String>,
    nationality: Option<String>,
}

/// Flatten a team-detail response into the squad table. Age is derived as
/// `reference_year - birth year` and is `None` when the birth date is
/// missing or unparseable; the reference year is passed in so the
/// derivation is deterministic under test.
pub fn squad_table(raw: &Value, reference_year: i32) -> Vec<PlayerRow> {
    let response: TeamDetailResponse = parse_or_default(raw);
    response
        .squad
        .into_iter()
        .map(|player| {
            let date_of_birth = player
                .date_of_birth
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            let age = date_of_birth
                .map(|d| reference_year - d.year())
                .and_then(|years| u32::try_from(years).ok());

            PlayerRow {
                name: player.name.unwrap_or_default(),
                position: player.position.unwrap_or_else(|| UNKNOWN.to_string()),
                date_of_birth,
                nationality: player.nationality.unwrap_or_else(|| UNKNOWN.to_string()),
                age,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_squad_yields_empty_table() {
        assert!(squad_table(&json!({}), 2026).is_empty());
        assert!(squad_table(&json!({"squad": []}), 2026).is_empty());
        assert_eq!(
            PlayerRow::COLUMNS,
            &["name", "position", "date_of_birth", "nationality", "age"]
        );
    }

    #[test]
    fn age_is_reference_year_minus_birth_year() {
        let raw = json!({"squad": [{
            "name": "Bukayo Saka",
            "position": "Right Winger",
            "dateOfBirth": "2001-09-05",
            "nationality": "England"
        }]});

        let rows = squad_table(&raw, 2026);
        assert_eq!(rows[0].age, Some(25));
        assert_eq!(rows[0].age_display(), "25");
        assert_eq!(rows[0].birth_display(), "2001-09-05");
    }

    #[test]
    fn unparseable_birth_date_leaves_age_empty() {
        let raw = json!({"squad": [
            {"name": "A", "dateOfBirth": "not-a-date"},
            {"name": "B"}
        ]});

        let rows = squad_table(&raw, 2026);
        assert_eq!(rows[0].age, None);
        assert_eq!(rows[1].age, None);
        assert_eq!(rows[0].age_display(), "N/A");
        assert_eq!(rows[1].position, "Unknown");
        assert_eq!(rows[1].nationality, "Unknown");
    }
}
