/*!
 * Mock provider implementation for testing.
 *
 * Simulates the episode database without network access:
 * - `MockProvider::with_series(...)` - serves a fixed series and episode list
 * - `MockProvider::failing()` - every call fails with a provider error
 *
 * The mock counts episode fetches so tests can assert the populate-once
 * semantics of the episode cache.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ProviderError;
use crate::providers::{EpisodeProvider, EpisodeRecord, SeriesRecord, SeriesSearchResult};

/// Mock episode provider for testing
#[derive(Debug)]
pub struct MockProvider {
    /// The series this mock knows about
    series: Option<SeriesRecord>,
    /// Its aired-order episode list
    episodes: Vec<EpisodeRecord>,
    /// Whether every call should fail
    failing: bool,
    /// Number of episode list fetches served
    fetch_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock serving the given series and episodes
    pub fn with_series(series: SeriesRecord, episodes: Vec<EpisodeRecord>) -> Self {
        Self {
            series: Some(series),
            episodes,
            failing: false,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock where every call fails
    pub fn failing() -> Self {
        Self {
            series: None,
            episodes: Vec::new(),
            failing: true,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the fetch counter, for populate-once assertions
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_count)
    }

    /// Build an episode record with the common fields filled in
    pub fn episode(id: u64, name: &str, season: u32, number: u32) -> EpisodeRecord {
        EpisodeRecord {
            id,
            name: name.to_string(),
            season_number: season,
            episode_number: number,
            absolute_number: None,
            aired: NaiveDate::from_ymd_opt(2022, 1, number.clamp(1, 28)),
        }
    }
}

#[async_trait]
impl EpisodeProvider for MockProvider {
    async fn search_series(&self, _query: &str) -> Result<Vec<SeriesSearchResult>, ProviderError> {
        if self.failing {
            return Err(ProviderError::RequestFailed("mock failure".to_string()));
        }
        Ok(self
            .series
            .iter()
            .map(|s| SeriesSearchResult {
                tvdb_id: s.id.to_string(),
                name: s.name.clone(),
                year: s.year.clone(),
            })
            .collect())
    }

    async fn series_details(&self, series_id: u64) -> Result<SeriesRecord, ProviderError> {
        if self.failing {
            return Err(ProviderError::RequestFailed("mock failure".to_string()));
        }
        self.series
            .clone()
            .filter(|s| s.id == series_id)
            .ok_or_else(|| ProviderError::SeriesNotFound(series_id.to_string()))
    }

    async fn episodes(&self, series_id: u64) -> Result<Vec<EpisodeRecord>, ProviderError> {
        if self.failing {
            return Err(ProviderError::RequestFailed("mock failure".to_string()));
        }
        if self.series.as_ref().map(|s| s.id) != Some(series_id) {
            return Err(ProviderError::SeriesNotFound(series_id.to_string()));
        }
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.episodes.clone())
    }
}
