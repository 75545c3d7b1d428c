/*!
 * Common test utilities for the serename test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use serename::app_config::Config;
use serename::providers::mock::MockProvider;
use serename::providers::{EpisodeRecord, SeriesRecord};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A config that passes validation (the default one has no API key)
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.api.api_key = "test-api-key".to_string();
    config
}

/// The test series used across the suite
pub fn rosies_rules() -> SeriesRecord {
    SeriesRecord {
        id: 5,
        name: "Rosie's Rules".to_string(),
        year: Some("2022".to_string()),
    }
}

/// Aired-order episode list for the test series
pub fn rosies_episodes() -> Vec<EpisodeRecord> {
    vec![
        MockProvider::episode(11, "Abuela's Birthday", 1, 1),
        MockProvider::episode(12, "Cat Mail", 1, 2),
        MockProvider::episode(13, "The Art Show", 1, 3),
        MockProvider::episode(14, "Rosie the Reporter", 1, 4),
    ]
}

/// Daniel Tiger fixtures for the multi-episode scenarios
pub fn daniel_tigers() -> SeriesRecord {
    SeriesRecord {
        id: 7,
        name: "Daniel Tiger's Neighborhood".to_string(),
        year: Some("2012".to_string()),
    }
}

pub fn daniel_episodes() -> Vec<EpisodeRecord> {
    vec![
        MockProvider::episode(21, "Firefighters at School", 3, 2),
        MockProvider::episode(22, "Daniel's Doll", 3, 3),
        MockProvider::episode(23, "Daniel and Margaret Play School", 3, 5),
        MockProvider::episode(24, "Treasure Hunt at the Castle", 3, 6),
    ]
}
