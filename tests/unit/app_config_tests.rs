/*!
 * Tests for application configuration functionality
 */

use serename::app_config::{Config, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.api.endpoint, "https://api4.thetvdb.com/v4");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.matching.match_threshold, 85);
    assert!(config.matching.allow_partial_multi);
    assert!(config.matching.quality_tags.iter().any(|t| t == "1080p"));
    assert_eq!(
        config.naming_template,
        "{series_name} - S{season_num}E{episode_num} - {episode_title}"
    );
    assert!(config.valid_extensions.iter().any(|e| e == ".mkv"));
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    // The default config has no API key and must fail
    let config = Config::default();
    assert!(config.validate().is_err());

    // With a key it passes
    let mut config = common::test_config();
    assert!(config.validate().is_ok());

    // Threshold outside 1..=100
    config.matching.match_threshold = 0;
    assert!(config.validate().is_err());
    config.matching.match_threshold = 101;
    assert!(config.validate().is_err());
    config.matching.match_threshold = 85;
    assert!(config.validate().is_ok());

    // Empty extension list
    config.valid_extensions.clear();
    assert!(config.validate().is_err());
    config.valid_extensions = vec![".mkv".to_string()];
    assert!(config.validate().is_ok());

    // Unknown placeholder fails at validation, not at render time
    config.naming_template = "{series_name} - {nope}".to_string();
    assert!(config.validate().is_err());
}

/// Test that missing config fields fall back to defaults when deserializing
#[test]
fn test_config_deserialization_withPartialJson_shouldUseDefaults() {
    let json = r#"{ "api": { "api_key": "abc" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.api.api_key, "abc");
    assert_eq!(config.matching.match_threshold, 85);
    assert!(!config.valid_extensions.is_empty());
    assert!(config.validate().is_ok());
}

/// Test extension matching is case-insensitive and dot-agnostic
#[test]
fn test_isValidExtension_withMixedCase_shouldMatch() {
    let config = common::test_config();

    assert!(config.is_valid_extension("mkv"));
    assert!(config.is_valid_extension("MKV"));
    assert!(config.is_valid_extension("Mp4"));
    assert!(!config.is_valid_extension("srt"));
}

/// Test config serialization round-trip
#[test]
fn test_config_serialization_roundTrip_shouldPreserveValues() {
    let mut config = common::test_config();
    config.matching.match_threshold = 92;
    config.matching.allow_partial_multi = false;

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.api.api_key, "test-api-key");
    assert_eq!(restored.matching.match_threshold, 92);
    assert!(!restored.matching.allow_partial_multi);
}
