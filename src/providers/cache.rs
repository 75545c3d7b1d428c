/*!
 * Per-run episode cache.
 *
 * Episode lists are fetched at most once per series per run. The cache is an
 * explicit object constructed by the controller and passed by reference into
 * the pipeline; its lifetime is the run, not the process.
 */

use std::collections::HashMap;

use log::{debug, info};

use crate::errors::ProviderError;
use crate::providers::{EpisodeProvider, EpisodeRecord};

/// Cache mapping a series id to its aired-order episode list
#[derive(Debug, Default)]
pub struct EpisodeCache {
    /// Internal cache storage
    entries: HashMap<u64, Vec<EpisodeRecord>>,
}

impl EpisodeCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached episode list for a series, fetching it on first use
    ///
    /// The fetch happens exactly once per series id; later calls return the
    /// cached list without touching the provider.
    pub async fn get_or_fetch(
        &mut self,
        provider: &dyn EpisodeProvider,
        series_id: u64,
    ) -> Result<&[EpisodeRecord], ProviderError> {
        if !self.entries.contains_key(&series_id) {
            let episodes = provider.episodes(series_id).await?;
            info!("Cached {} episodes for series {}", episodes.len(), series_id);
            self.entries.insert(series_id, episodes);
        } else {
            debug!("Episode cache hit for series {}", series_id);
        }

        Ok(self
            .entries
            .get(&series_id)
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    /// Number of series with a cached episode list
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
