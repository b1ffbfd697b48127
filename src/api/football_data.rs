//! Typed operations against Football-Data.org (leagues, teams, standings,
//! matches, squads).

use crate::api::{CachedFetcher, FetchError, Provider};
use crate::models::{MatchRow, PlayerRow, StandingRow, TeamRow};
use crate::normalize;
use std::sync::Arc;

pub struct FootballDataClient {
    fetcher: Arc<CachedFetcher>,
}

impl FootballDataClient {
    pub fn new(fetcher: Arc<CachedFetcher>) -> Self {
        Self { fetcher }
    }

    /// Teams of a competition, normalized into the team table.
    pub async fn competition_teams(&self, league: &str) -> Result<Vec<TeamRow>, FetchError> {
        let raw = self
            .fetcher
            .fetch(
                Provider::FootballData,
                &format!("competitions/{league}/teams"),
                &[],
            )
            .await?;
        Ok(normalize::teams::team_table(&raw))
    }

    /// League table of a competition (first standings group only).
    pub async fn competition_standings(
        &self,
        league: &str,
    ) -> Result<Vec<StandingRow>, FetchError> {
        let raw = self
            .fetcher
            .fetch(
                Provider::FootballData,
                &format!("competitions/{league}/standings"),
                &[],
            )
            .await?;
        Ok(normalize::standings::standings_table(&raw))
    }

    /// All matches of a competition's current season.
    pub async fn competition_matches(&self, league: &str) -> Result<Vec<MatchRow>, FetchError> {
        let raw = self
            .fetcher
            .fetch(
                Provider::FootballData,
                &format!("competitions/{league}/matches"),
                &[],
            )
            .await?;
        Ok(normalize::matches::match_table(&raw))
    }

    /// Squad of a single team, with ages derived against `reference_year`.
    pub async fn team_squad(
        &self,
        team_id: u64,
        reference_year: i32,
    ) -> Result<Vec<PlayerRow>, FetchError> {
        let raw = self
            .fetcher
            .fetch(Provider::FootballData, &format!("teams/{team_id}"), &[])
            .await?;
        Ok(normalize::players::squad_table(&raw, reference_year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testutil::test_fetcher;

    #[tokio::test]
    async fn squad_request_hits_the_team_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams/57")
            .match_header("x-auth-token", "fd-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"squad": [{"name": "Bukayo Saka", "position": "Right Winger",
                    "dateOfBirth": "2001-09-05", "nationality": "England"}]}"#,
            )
            .create_async()
            .await;

        let client = FootballDataClient::new(test_fetcher(&server.url()));
        let squad = client.team_squad(57, 2026).await.unwrap();

        assert_eq!(squad.len(), 1);
        assert_eq!(squad[0].name, "Bukayo Saka");
        assert_eq!(squad[0].age, Some(25));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transport_errors_surface_as_fetch_errors() {
        // Bind a port and release it again so nothing is listening there.
        let url = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };

        let client = FootballDataClient::new(test_fetcher(&url));
        let result = client.competition_teams("PL").await;
        assert!(matches!(result, Err(FetchError::Transport { .. })));
    }
}
