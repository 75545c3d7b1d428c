/*!
 * Episode database providers.
 *
 * This module defines the records the rest of the application works with
 * (series and episodes) and the provider trait the matching pipeline consumes,
 * plus client implementations:
 * - TheTVDB v4 API client
 * - Mock provider for testing
 */

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A series as validated for a run. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Opaque unique identifier assigned by the provider
    pub id: u64,
    /// Display name of the series
    pub name: String,
    /// Release year, when the provider knows it
    pub year: Option<String>,
}

/// A single episode in aired order. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Opaque unique identifier assigned by the provider
    pub id: u64,
    /// Episode title
    pub name: String,
    /// Season number (0 for specials)
    pub season_number: u32,
    /// Episode number within the season
    pub episode_number: u32,
    /// Absolute episode number across the whole series, when known
    pub absolute_number: Option<u32>,
    /// First-aired date, when known
    pub aired: Option<NaiveDate>,
}

/// An unvalidated series search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSearchResult {
    /// Provider identifier, numeric part only
    pub tvdb_id: String,
    /// Display name of the series
    pub name: String,
    /// Release year, when known
    pub year: Option<String>,
}

/// Common trait for episode database providers
///
/// This trait defines the interface the controller and matching pipeline
/// consume, allowing the real TVDB client and test mocks to be used
/// interchangeably.
#[async_trait]
pub trait EpisodeProvider: Send + Sync + Debug {
    /// Search for series matching a free-form query
    ///
    /// # Arguments
    /// * `query` - The series name to search for
    ///
    /// # Returns
    /// * `Result<Vec<SeriesSearchResult>, ProviderError>` - Candidate series, best first
    async fn search_series(&self, query: &str) -> Result<Vec<SeriesSearchResult>, ProviderError>;

    /// Fetch the validated record for a series
    ///
    /// # Arguments
    /// * `series_id` - Numeric series identifier
    async fn series_details(&self, series_id: u64) -> Result<SeriesRecord, ProviderError>;

    /// Fetch every episode of a series, in aired order
    ///
    /// Only episodes belonging to the canonical "Aired Order" season grouping
    /// are returned; alternate orderings (DVD order, absolute order) are
    /// excluded.
    async fn episodes(&self, series_id: u64) -> Result<Vec<EpisodeRecord>, ProviderError>;
}

pub mod cache;
pub mod mock;
pub mod tvdb;
