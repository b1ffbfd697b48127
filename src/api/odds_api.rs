//! Bookmaker odds from The Odds API.

use crate::api::{CachedFetcher, FetchError, Provider};
use crate::models::OddsGame;
use crate::normalize;
use std::sync::Arc;

const SPORT_KEY: &str = "soccer";

pub const DEFAULT_REGION: &str = "eu";
pub const DEFAULT_MARKET: &str = "h2h";

pub struct OddsApiClient {
    fetcher: Arc<CachedFetcher>,
}

impl OddsApiClient {
    pub fn new(fetcher: Arc<CachedFetcher>) -> Self {
        Self { fetcher }
    }

    /// Current soccer odds for the given region and market, grouped per
    /// game and bookmaker.
    pub async fn soccer_odds(
        &self,
        region: &str,
        market: &str,
    ) -> Result<Vec<OddsGame>, FetchError> {
        let endpoint = format!("sports/{SPORT_KEY}/odds");
        let params = [
            ("regions".to_string(), region.to_string()),
            ("markets".to_string(), market.to_string()),
        ];
        let raw = self.fetcher.fetch(Provider::OddsApi, &endpoint, &params).await?;
        Ok(normalize::odds::odds_games(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testutil::test_fetcher;
    use mockito::Matcher;

    #[tokio::test]
    async fn odds_request_carries_region_market_and_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/sports/soccer/odds")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiKey".into(), "odds-key".into()),
                Matcher::UrlEncoded("regions".into(), "eu".into()),
                Matcher::UrlEncoded("markets".into(), "h2h".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"home_team": "Arsenal", "away_team": "Chelsea",
                    "bookmakers": [{"title": "Unibet", "markets": [{"key": "h2h",
                    "outcomes": [{"name": "Arsenal", "price": 1.8},
                                 {"name": "Chelsea", "price": 2.1}]}]}]}]"#,
            )
            .create_async()
            .await;

        let client = OddsApiClient::new(test_fetcher(&server.url()));
        let games = client.soccer_odds(DEFAULT_REGION, DEFAULT_MARKET).await.unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].bookmakers[0].outcomes.len(), 2);
        mock.assert_async().await;
    }
}
