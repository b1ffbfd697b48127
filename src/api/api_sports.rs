//! Player statistics lookup against API-Sports.

use crate::api::{CachedFetcher, FetchError, Provider};
use crate::models::PerformanceLookup;
use crate::normalize;
use std::sync::Arc;

pub struct ApiSportsClient {
    fetcher: Arc<CachedFetcher>,
}

impl ApiSportsClient {
    pub fn new(fetcher: Arc<CachedFetcher>) -> Self {
        Self { fetcher }
    }

    /// Free-text player search. The lookup carries the full candidate list;
    /// statistics come from the first hit only.
    pub async fn player_performance(&self, name: &str) -> Result<PerformanceLookup, FetchError> {
        let params = [("search".to_string(), name.to_string())];
        let raw = self
            .fetcher
            .fetch(Provider::ApiSports, "players", &params)
            .await?;
        Ok(normalize::performance::performance_lookup(&raw))
    }
}
