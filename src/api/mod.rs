pub mod api_sports;
pub mod football_data;
pub mod odds_api;

use crate::cache::{CacheKey, TtlCache, DEFAULT_TTL};
use crate::config::Credentials;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const FOOTBALL_DATA_BASE_URL: &str = "https://api.football-data.org/v4";
const API_SPORTS_BASE_URL: &str = "https://v3.football.api-sports.io";
const ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";

/// Default timeout applied to every provider request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The three upstream data providers, each with its own auth mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Football-Data.org: leagues, teams, standings, matches, squads.
    FootballData,
    /// API-Sports: per-player season statistics.
    ApiSports,
    /// The Odds API: bookmaker odds.
    OddsApi,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::FootballData => "Football-Data.org",
            Provider::ApiSports => "API-Sports",
            Provider::OddsApi => "The Odds API",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned HTTP {status} for {endpoint}")]
    Status {
        provider: Provider,
        status: reqwest::StatusCode,
        endpoint: String,
    },
    #[error("could not decode {provider} response for {endpoint}: {source}")]
    Decode {
        provider: Provider,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Base URLs per provider, overridable so tests can point at a local server.
#[derive(Debug, Clone)]
pub struct BaseUrls {
    pub football_data: String,
    pub api_sports: String,
    pub odds: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            football_data: FOOTBALL_DATA_BASE_URL.to_string(),
            api_sports: API_SPORTS_BASE_URL.to_string(),
            odds: ODDS_API_BASE_URL.to_string(),
        }
    }
}

/// Thin reqwest wrapper that knows how each provider authenticates.
pub struct HttpClient {
    client: reqwest::Client,
    credentials: Credentials,
    bases: BaseUrls,
}

impl HttpClient {
    pub fn new(credentials: Credentials) -> Result<Self, reqwest::Error> {
        Self::with_bases(credentials, BaseUrls::default())
    }

    pub fn with_bases(credentials: Credentials, bases: BaseUrls) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            credentials,
            bases,
        })
    }

    fn base(&self, provider: Provider) -> &str {
        match provider {
            Provider::FootballData => &self.bases.football_data,
            Provider::ApiSports => &self.bases.api_sports,
            Provider::OddsApi => &self.bases.odds,
        }
    }

    /// Authenticated GET of `{base}/{endpoint}?{params}`, parsed as JSON.
    pub async fn get_json(
        &self,
        provider: Provider,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base(provider), endpoint);
        let mut request = self.client.get(&url);

        request = match provider {
            Provider::FootballData => {
                request.header("X-Auth-Token", &self.credentials.football_data)
            }
            Provider::ApiSports => request.header("x-apisports-key", &self.credentials.api_sports),
            Provider::OddsApi => request.query(&[("apiKey", self.credentials.odds.as_str())]),
        };
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request
            .send()
            .await
            .map_err(|source| FetchError::Transport { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                provider,
                status,
                endpoint: endpoint.to_string(),
            });
        }

        response.json().await.map_err(|source| FetchError::Decode {
            provider,
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// TTL-memoized fetch: identical (provider, endpoint, params) keys within
/// the TTL window are served from the cache without a network call. Only
/// successful payloads are stored, so a failed fetch is retried on the next
/// user-triggered request.
pub struct CachedFetcher {
    http: HttpClient,
    cache: TtlCache,
}

impl CachedFetcher {
    pub fn new(http: HttpClient) -> Self {
        Self::with_cache(http, TtlCache::new(DEFAULT_TTL))
    }

    pub fn with_cache(http: HttpClient, cache: TtlCache) -> Self {
        Self { http, cache }
    }

    pub async fn fetch(
        &self,
        provider: Provider,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Arc<Value>, FetchError> {
        let key = CacheKey::new(provider, endpoint, params);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(provider = provider.name(), endpoint, "cache hit");
            return Ok(hit);
        }

        tracing::debug!(provider = provider.name(), endpoint, "cache miss, fetching");
        let value = Arc::new(self.http.get_json(provider, endpoint, params).await?);
        self.cache.put(key, Arc::clone(&value));
        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub(crate) fn test_credentials() -> Credentials {
        Credentials {
            football_data: "fd-key".to_string(),
            api_sports: "as-key".to_string(),
            odds: "odds-key".to_string(),
        }
    }

    pub(crate) fn test_client(base: &str) -> HttpClient {
        HttpClient::with_bases(
            test_credentials(),
            BaseUrls {
                football_data: base.to_string(),
                api_sports: base.to_string(),
                odds: base.to_string(),
            },
        )
        .unwrap()
    }

    pub(crate) fn test_fetcher(base: &str) -> Arc<CachedFetcher> {
        Arc::new(CachedFetcher::new(test_client(base)))
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::test_client;
    use super::*;
    use crate::cache::Clock;
    use mockito::Matcher;
    use std::sync::Mutex;
    use std::time::Instant;

    struct FakeClock {
        now: Mutex<Instant>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn client_builds_with_the_request_timeout() {
        assert!(HttpClient::new(super::testutil::test_credentials()).is_ok());
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_makes_no_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/competitions/PL/teams")
            .match_header("x-auth-token", "fd-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"teams":[{"id":1,"name":"Arsenal FC"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let fetcher = CachedFetcher::new(test_client(&server.url()));
        let first = fetcher
            .fetch(Provider::FootballData, "competitions/PL/teams", &[])
            .await
            .unwrap();
        let second = fetcher
            .fetch(Provider::FootballData, "competitions/PL/teams", &[])
            .await
            .unwrap();

        assert_eq!(first, second);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_after_ttl_makes_a_new_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/competitions/PL/standings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"standings":[]}"#)
            .expect(2)
            .create_async()
            .await;

        let clock = Arc::new(FakeClock::new());
        let cache = TtlCache::with_clock(DEFAULT_TTL, Arc::clone(&clock) as _);
        let fetcher = CachedFetcher::with_cache(test_client(&server.url()), cache);

        fetcher
            .fetch(Provider::FootballData, "competitions/PL/standings", &[])
            .await
            .unwrap();
        clock.advance(DEFAULT_TTL);
        fetcher
            .fetch(Provider::FootballData, "competitions/PL/standings", &[])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn odds_api_authenticates_via_query_parameter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/sports/soccer/odds")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apiKey".into(), "odds-key".into()),
                Matcher::UrlEncoded("regions".into(), "eu".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let fetcher = CachedFetcher::new(test_client(&server.url()));
        let value = fetcher
            .fetch(
                Provider::OddsApi,
                "sports/soccer/odds",
                &[("regions".to_string(), "eu".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(*value, serde_json::json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/players")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let fetcher = CachedFetcher::new(test_client(&server.url()));
        let params = [("search".to_string(), "Saka".to_string())];

        let first = fetcher.fetch(Provider::ApiSports, "players", &params).await;
        assert!(matches!(first, Err(FetchError::Status { .. })));
        let second = fetcher.fetch(Provider::ApiSports, "players", &params).await;
        assert!(second.is_err());

        mock.assert_async().await;
    }
}
