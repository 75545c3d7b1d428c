use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::naming::NamingTemplate;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Episode database API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Matching engine settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Naming template applied to single-episode renames
    #[serde(default = "default_naming_template")]
    pub naming_template: String,

    /// File extensions considered video files
    #[serde(default = "default_valid_extensions")]
    pub valid_extensions: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// TheTVDB API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    // @field: TVDB v4 API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Matching engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchingConfig {
    /// Minimum fuzzy score for a candidate substring to count as a match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,

    /// Words stripped from candidates before scoring (rip/codec markers)
    #[serde(default = "default_quality_tags")]
    pub quality_tags: Vec<String>,

    /// Rename on a partial match when two or more episodes were identified.
    /// Trades false-positive renames for fewer skipped multi-episode files.
    #[serde(default = "default_true")]
    pub allow_partial_multi: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            quality_tags: default_quality_tags(),
            allow_partial_multi: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Config {
    /// Validate the configuration before any matching begins.
    ///
    /// A missing API key, an out-of-range threshold, an empty extension list
    /// or a malformed naming template are all fatal here rather than at
    /// first use.
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(anyhow!(
                "TVDB API key is missing; set api.api_key in the config file"
            ));
        }

        if self.matching.match_threshold == 0 || self.matching.match_threshold > 100 {
            return Err(anyhow!(
                "match_threshold must be in 1..=100, got {}",
                self.matching.match_threshold
            ));
        }

        if self.valid_extensions.is_empty() {
            return Err(anyhow!("valid_extensions must not be empty"));
        }

        NamingTemplate::parse(&self.naming_template)
            .map_err(|e| anyhow!("Invalid naming template: {}", e))?;

        Ok(())
    }

    /// The parsed naming template; call after [`validate`](Self::validate)
    pub fn naming_template(&self) -> Result<NamingTemplate> {
        NamingTemplate::parse(&self.naming_template)
            .map_err(|e| anyhow!("Invalid naming template: {}", e))
    }

    /// Whether a path extension (without dot) is a configured video extension
    pub fn is_valid_extension(&self, extension: &str) -> bool {
        self.valid_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            matching: MatchingConfig::default(),
            naming_template: default_naming_template(),
            valid_extensions: default_valid_extensions(),
            log_level: LogLevel::default(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api4.thetvdb.com/v4".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_match_threshold() -> u8 {
    85
}

fn default_true() -> bool {
    true
}

fn default_naming_template() -> String {
    "{series_name} - S{season_num}E{episode_num} - {episode_title}".to_string()
}

fn default_quality_tags() -> Vec<String> {
    [
        "480p", "720p", "1080p", "2160p", "4k", "x264", "x265", "h264", "h265", "hevc",
        "web", "webrip", "web-dl", "bluray", "brrip", "hdtv", "dvdrip", "xvid", "aac",
        "ac3", "proper", "repack",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_valid_extensions() -> Vec<String> {
    [
        ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg",
        ".ts",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
