/*!
 * Tests for provider implementations and the per-run episode cache
 */

use std::sync::atomic::Ordering;

use serename::errors::ProviderError;
use serename::providers::EpisodeProvider;
use serename::providers::cache::EpisodeCache;
use serename::providers::mock::MockProvider;

use crate::common;

/// The mock serves its configured series through the provider trait
#[tokio::test]
async fn test_mockProvider_withSeries_shouldServeRecords() {
    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());

    let hits = provider.search_series("Rosie's Rules").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].tvdb_id, "5");

    let series = provider.series_details(5).await.unwrap();
    assert_eq!(series.name, "Rosie's Rules");

    let episodes = provider.episodes(5).await.unwrap();
    assert_eq!(episodes.len(), 4);
}

/// Unknown series ids surface as SeriesNotFound
#[tokio::test]
async fn test_mockProvider_unknownSeries_shouldReturnNotFound() {
    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());

    let err = provider.series_details(999).await.unwrap_err();
    assert!(matches!(err, ProviderError::SeriesNotFound(_)));
}

/// A failing provider reports errors on every call
#[tokio::test]
async fn test_mockProvider_failing_shouldErrorOnEveryCall() {
    let provider = MockProvider::failing();

    assert!(provider.search_series("anything").await.is_err());
    assert!(provider.series_details(1).await.is_err());
    assert!(provider.episodes(1).await.is_err());
}

/// The cache fetches a series' episodes exactly once per run
#[tokio::test]
async fn test_episodeCache_repeatedAccess_shouldFetchOnce() {
    let provider = MockProvider::with_series(common::rosies_rules(), common::rosies_episodes());
    let counter = provider.fetch_counter();
    let mut cache = EpisodeCache::new();

    for _ in 0..3 {
        let episodes = cache.get_or_fetch(&provider, 5).await.unwrap();
        assert_eq!(episodes.len(), 4);
    }

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

/// A fetch failure leaves the cache unpopulated
#[tokio::test]
async fn test_episodeCache_fetchFailure_shouldStayEmpty() {
    let provider = MockProvider::failing();
    let mut cache = EpisodeCache::new();

    assert!(cache.get_or_fetch(&provider, 5).await.is_err());
    assert!(cache.is_empty());
}
