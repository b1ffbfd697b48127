//! Standings normalizer for `competitions/{league}/standings` responses.
//!
//! Only the first standings group is surfaced. Competitions with several
//! groups (e.g. playoff splits) are a documented limitation; the extra
//! groups are dropped with a warning rather than merged.

use super::parse_or_default;
use crate::models::StandingRow;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    standings: Vec<RawGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGroup {
    #[serde(default)]
    table: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(default)]
    position: u32,
    #[serde(default)]
    team: Option<RawTeamRef>,
    #[serde(default)]
    played_games: u32,
    #[serde(default)]
    won: u32,
    #[serde(default)]
    draw: u32,
    #[serde(default)]
    lost: u32,
    #[serde(default)]
    points: i32,
}

#[derive(Debug, Default, Deserialize)]
struct RawTeamRef {
    name: Option<String>,
}

/// League table from the first standings group, in upstream order.
/// `won + draw + lost == playedGames` is upstream-guaranteed and not
/// re-checked here.
pub fn standings_table(raw: &Value) -> Vec<StandingRow> {
    let response: StandingsResponse = parse_or_default(raw);
    if response.standings.len() > 1 {
        tracing::warn!(
            groups = response.standings.len(),
            "multiple standings groups returned; only the first is shown"
        );
    }

    let Some(first) = response.standings.into_iter().next() else {
        return Vec::new();
    };

    first
        .table
        .into_iter()
        .map(|entry| StandingRow {
            position: entry.position,
            team: entry
                .team
                .and_then(|t| t.name)
                .unwrap_or_default(),
            played_games: entry.played_games,
            won: entry.won,
            draw: entry.draw,
            lost: entry.lost,
            points: entry.points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_or_missing_standings_yield_empty_table() {
        assert!(standings_table(&json!({})).is_empty());
        assert!(standings_table(&json!({"standings": []})).is_empty());
        assert_eq!(
            StandingRow::COLUMNS,
            &["position", "team", "playedGames", "won", "draw", "lost", "points"]
        );
    }

    #[test]
    fn single_group_with_three_teams() {
        let raw = json!({"standings": [{"table": [
            {"position": 1, "team": {"name": "Arsenal FC"}, "playedGames": 3, "won": 3, "draw": 0, "lost": 0, "points": 9},
            {"position": 2, "team": {"name": "Liverpool FC"}, "playedGames": 3, "won": 2, "draw": 0, "lost": 1, "points": 6},
            {"position": 3, "team": {"name": "Chelsea FC"}, "playedGames": 3, "won": 1, "draw": 0, "lost": 2, "points": 3}
        ]}]});

        let rows = standings_table(&raw);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.position).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            rows.iter().map(|r| r.points).collect::<Vec<_>>(),
            vec![9, 6, 3]
        );
        assert_eq!(rows[0].team, "Arsenal FC");
        assert_eq!(rows[0].played_games, 3);
    }

    #[test]
    fn only_the_first_group_is_used() {
        let raw = json!({"standings": [
            {"table": [{"position": 1, "team": {"name": "Ajax"}, "points": 10}]},
            {"table": [{"position": 1, "team": {"name": "PSV"}, "points": 8}]}
        ]});

        let rows = standings_table(&raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team, "Ajax");
    }
}
