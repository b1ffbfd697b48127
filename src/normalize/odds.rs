//! Odds normalizer for The Odds API `sports/{sport}/odds` responses.
//!
//! The nested game → bookmakers → outcomes shape is preserved for the
//! selection UI; `quote_rows` flattens it into the exportable table. No
//! arbitrage or implied-probability math happens here, display only.

use super::parse_or_default;
use crate::models::{BookmakerOdds, OddsGame, OddsQuoteRow, OutcomeQuote};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct RawGame {
    home_team: Option<String>,
    away_team: Option<String>,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBookmaker {
    title: Option<String>,
    #[serde(default)]
    markets: Vec<RawMarket>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMarket {
    #[serde(default)]
    outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutcome {
    name: Option<String>,
    price: Option<f64>,
}

/// Normalize an odds response. Outcomes from every market of a bookmaker
/// are grouped under that bookmaker; outcomes without a price are dropped.
pub fn odds_games(raw: &Value) -> Vec<OddsGame> {
    let games: Vec<RawGame> = parse_or_default(raw);
    games
        .into_iter()
        .map(|game| OddsGame {
            home_team: game.home_team.unwrap_or_default(),
            away_team: game.away_team.unwrap_or_default(),
            bookmakers: game
                .bookmakers
                .into_iter()
                .map(|bookmaker| BookmakerOdds {
                    title: bookmaker.title.unwrap_or_default(),
                    outcomes: bookmaker
                        .markets
                        .into_iter()
                        .flat_map(|market| market.outcomes)
                        .filter_map(|outcome| {
                            Some(OutcomeQuote {
                                name: outcome.name.unwrap_or_default(),
                                price: outcome.price?,
                            })
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Flat odds table: one row per (match, bookmaker, outcome).
pub fn quote_rows(games: &[OddsGame]) -> Vec<OddsQuoteRow> {
    games
        .iter()
        .flat_map(|game| {
            let label = game.label();
            game.bookmakers.iter().flat_map(move |bookmaker| {
                let label = label.clone();
                bookmaker.outcomes.iter().map(move |outcome| OddsQuoteRow {
                    match_label: label.clone(),
                    bookmaker: bookmaker.title.clone(),
                    outcome: outcome.name.clone(),
                    price: outcome.price,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_list_payload_yields_empty_table() {
        assert!(odds_games(&json!({})).is_empty());
        assert!(odds_games(&json!([])).is_empty());
        assert_eq!(
            OddsQuoteRow::COLUMNS,
            &["match", "bookmaker", "outcome", "price"]
        );
    }

    #[test]
    fn one_game_one_bookmaker_two_outcomes() {
        let raw = json!([{
            "home_team": "Arsenal",
            "away_team": "Chelsea",
            "bookmakers": [{
                "title": "Unibet",
                "markets": [{
                    "key": "h2h",
                    "outcomes": [
                        {"name": "Arsenal", "price": 1.80},
                        {"name": "Chelsea", "price": 2.10}
                    ]
                }]
            }]
        }]);

        let games = odds_games(&raw);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].label(), "Arsenal vs Chelsea");

        let bookmaker = &games[0].bookmakers[0];
        assert_eq!(bookmaker.title, "Unibet");
        assert_eq!(bookmaker.outcomes.len(), 2);
        assert_eq!(bookmaker.outcomes[0].price, 1.80);
        assert_eq!(bookmaker.outcomes[1].price, 2.10);
    }

    #[test]
    fn outcomes_across_markets_are_grouped_per_bookmaker() {
        let raw = json!([{
            "home_team": "Ajax",
            "away_team": "PSV",
            "bookmakers": [{
                "title": "Bet365",
                "markets": [
                    {"outcomes": [{"name": "Ajax", "price": 2.4}]},
                    {"outcomes": [{"name": "Draw", "price": 3.3}]}
                ]
            }]
        }]);

        let games = odds_games(&raw);
        assert_eq!(games[0].bookmakers[0].outcomes.len(), 2);
    }

    #[test]
    fn quote_rows_flatten_the_hierarchy() {
        let raw = json!([{
            "home_team": "Arsenal",
            "away_team": "Chelsea",
            "bookmakers": [
                {"title": "Unibet", "markets": [{"outcomes": [
                    {"name": "Arsenal", "price": 1.8},
                    {"name": "Chelsea", "price": 2.1}
                ]}]},
                {"title": "Bet365", "markets": [{"outcomes": [
                    {"name": "Arsenal", "price": 1.85}
                ]}]}
            ]
        }]);

        let rows = quote_rows(&odds_games(&raw));
        assert_eq!(rows.len(), 3);
        assert!(rows
            .iter()
            .all(|row| row.match_label == "Arsenal vs Chelsea"));
        assert_eq!(rows[2].bookmaker, "Bet365");
        assert_eq!(rows[2].price, 1.85);
    }

    #[test]
    fn priceless_outcomes_are_dropped() {
        let raw = json!([{
            "home_team": "A",
            "away_team": "B",
            "bookmakers": [{"title": "X", "markets": [{"outcomes": [
                {"name": "A", "price": null},
                {"name": "B", "price": 2.0}
            ]}]}]
        }]);

        let games = odds_games(&raw);
        assert_eq!(games[0].bookmakers[0].outcomes.len(), 1);
    }
}
