//! Player-performance normalizer for API-Sports `players?search=` responses.
//!
//! Only the first search hit and its first statistics block are surfaced,
//! matching the upstream dashboard behavior. The full candidate name list
//! is returned alongside so an ambiguous lookup (several real players
//! sharing a name) is visible to the caller instead of silently resolved.

use super::{parse_or_default, UNKNOWN};
use crate::models::{PerformanceLookup, PlayerPerformance};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    response: Vec<RawHit>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHit {
    #[serde(default)]
    player: Option<RawPlayerInfo>,
    #[serde(default)]
    statistics: Vec<RawStats>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPlayerInfo {
    name: Option<String>,
    age: Option<u32>,
    nationality: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStats {
    #[serde(default)]
    team: Option<RawNameRef>,
    #[serde(default)]
    games: Option<RawGames>,
    #[serde(default)]
    goals: Option<RawGoals>,
    #[serde(default)]
    shots: Option<RawShots>,
    #[serde(default)]
    passes: Option<RawPasses>,
    #[serde(default)]
    cards: Option<RawCards>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNameRef {
    name: Option<String>,
}

// API-Sports spells the field `appearences`; the alias keeps the counter
// from silently reading as zero.
#[derive(Debug, Default, Deserialize)]
struct RawGames {
    position: Option<String>,
    #[serde(alias = "appearences")]
    appearances: Option<u32>,
    minutes: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGoals {
    total: Option<u32>,
    assists: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawShots {
    total: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPasses {
    total: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCards {
    yellow: Option<u32>,
    red: Option<u32>,
}

/// Build a performance lookup from a search response. Zero hits leave the
/// performance empty; every counter defaults to zero when absent or null.
pub fn performance_lookup(raw: &Value) -> PerformanceLookup {
    let response: SearchResponse = parse_or_default(raw);

    let candidates: Vec<String> = response
        .response
        .iter()
        .filter_map(|hit| hit.player.as_ref().and_then(|p| p.name.clone()))
        .collect();
    if candidates.len() > 1 {
        tracing::warn!(
            hits = candidates.len(),
            "ambiguous player search, statistics taken from the first hit"
        );
    }

    let Some(first) = response.response.into_iter().next() else {
        return PerformanceLookup::default();
    };

    let player = first.player.unwrap_or_default();
    let stats = first.statistics.into_iter().next().unwrap_or_default();
    let games = stats.games.unwrap_or_default();
    let goals = stats.goals.unwrap_or_default();

    let performance = PlayerPerformance {
        name: player.name.unwrap_or_else(|| UNKNOWN.to_string()),
        age: player.age,
        nationality: player.nationality.unwrap_or_else(|| UNKNOWN.to_string()),
        team: stats
            .team
            .and_then(|t| t.name)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        position: games.position.unwrap_or_else(|| UNKNOWN.to_string()),
        appearances: games.appearances.unwrap_or(0),
        minutes_played: games.minutes.unwrap_or(0),
        goals: goals.total.unwrap_or(0),
        assists: goals.assists.unwrap_or(0),
        shots_total: stats.shots.unwrap_or_default().total.unwrap_or(0),
        passes_total: stats.passes.unwrap_or_default().total.unwrap_or(0),
        yellow_cards: stats.cards.as_ref().and_then(|c| c.yellow).unwrap_or(0),
        red_cards: stats.cards.as_ref().and_then(|c| c.red).unwrap_or(0),
    };

    PerformanceLookup {
        performance: Some(performance),
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_hits_yield_empty_lookup() {
        let lookup = performance_lookup(&json!({"response": []}));
        assert!(lookup.is_empty());
        assert!(!lookup.is_ambiguous());
        assert!(lookup.candidates.is_empty());
    }

    #[test]
    fn first_hit_and_first_statistics_block_are_used() {
        let raw = json!({"response": [
            {
                "player": {"name": "B. Saka", "age": 24, "nationality": "England"},
                "statistics": [
                    {
                        "team": {"name": "Arsenal"},
                        "games": {"position": "Attacker", "appearences": 30, "minutes": 2520},
                        "goals": {"total": 14, "assists": 9},
                        "shots": {"total": 61},
                        "passes": {"total": 1204},
                        "cards": {"yellow": 3, "red": 0}
                    },
                    {"team": {"name": "England"}, "games": {"appearences": 5}}
                ]
            },
            {"player": {"name": "B. Saka Jr"}, "statistics": []}
        ]});

        let lookup = performance_lookup(&raw);
        assert!(lookup.is_ambiguous());
        assert_eq!(lookup.candidates, vec!["B. Saka", "B. Saka Jr"]);

        let perf = lookup.performance.unwrap();
        assert_eq!(perf.name, "B. Saka");
        assert_eq!(perf.team, "Arsenal");
        assert_eq!(perf.appearances, 30);
        assert_eq!(perf.goals, 14);
        assert_eq!(perf.yellow_cards, 3);
    }

    #[test]
    fn null_counters_default_to_zero() {
        let raw = json!({"response": [{
            "player": {"name": "A. Keeper"},
            "statistics": [{
                "games": {"position": "Goalkeeper", "appearences": null, "minutes": null},
                "goals": {"total": null, "assists": null},
                "shots": {"total": null},
                "passes": {"total": null},
                "cards": {"yellow": null, "red": null}
            }]
        }]});

        let perf = performance_lookup(&raw).performance.unwrap();
        assert_eq!(perf.appearances, 0);
        assert_eq!(perf.goals, 0);
        assert_eq!(perf.passes_total, 0);
        assert_eq!(perf.red_cards, 0);
        assert_eq!(perf.age, None);
    }

    #[test]
    fn hit_without_statistics_still_reports_identity() {
        let raw = json!({"response": [{
            "player": {"name": "New Signing", "age": 19, "nationality": "brazil"},
            "statistics": []
        }]});

        let perf = performance_lookup(&raw).performance.unwrap();
        assert_eq!(perf.name, "New Signing");
        assert_eq!(perf.team, "Unknown");
        assert_eq!(perf.appearances, 0);
    }
}
