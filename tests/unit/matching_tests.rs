/*!
 * Tests for the title segmentation and fuzzy-matching engine
 */

use serename::matching::MatchEngine;
use serename::matching::extract::extract_title;
use serename::matching::normalize::normalize_stem;
use serename::naming::{NamingTemplate, proposed_file_name};

use crate::common;

fn engine() -> MatchEngine {
    MatchEngine::new(85, &[])
}

/// Underscore-delimited double feature resolves via the separator strategy
#[test]
fn test_matchTitle_underscoreDelimitedPair_shouldProduceBothEpisodes() {
    let result = engine().match_title("Abuela's Birthday_Cat Mail", &common::rosies_episodes());

    assert!(result.complete);
    let ids: Vec<u64> = result.episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![11, 12]);
}

/// Plus-delimited, lower-cased double feature at the default threshold
#[test]
fn test_matchTitle_plusDelimitedLowercase_shouldProduceBothEpisodes() {
    let result = engine().match_title(
        "daniel and margaret play school + treasure hunt at the castle",
        &common::daniel_episodes(),
    );

    assert!(result.complete);
    let names: Vec<&str> = result.episodes.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Daniel and Margaret Play School", "Treasure Hunt at the Castle"]
    );
}

/// The short-title guard refuses two-character titles outright
#[test]
fn test_matchTitle_twoCharacterTitle_shouldMatchNothing() {
    let result = engine().match_title("le", &common::rosies_episodes());
    assert!(result.is_empty());
}

/// Accepted decompositions never carry duplicate episode ids
#[test]
fn test_matchTitle_repeatedEpisodeInTitle_shouldNotDuplicate() {
    let result = engine().match_title("Cat Mail + Cat Mail", &common::rosies_episodes());

    let mut ids: Vec<u64> = result.episodes.iter().map(|e| e.id).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

/// An undelimited multi-episode run falls through to iterative segmentation
#[test]
fn test_matchTitle_undelimitedPair_shouldUseIterativeStrategy() {
    let result = engine().match_title("Abuela's Birthday Cat Mail", &common::rosies_episodes());

    assert!(result.complete);
    assert_eq!(result.episode_count(), 2);
}

/// Quality tags in the candidate are invisible to the scorer
#[test]
fn test_matchTitle_withQualityTags_shouldStillMatch() {
    let engine = MatchEngine::new(85, &["1080p".to_string(), "WEBRip".to_string()]);
    let result = engine.match_title("Cat Mail 1080p WEBRip", &common::rosies_episodes());

    assert_eq!(result.episode_count(), 1);
    assert_eq!(result.episodes[0].id, 12);
}

/// Round-trip: a formatted multi-episode name re-segments to the same set
#[test]
fn test_roundTrip_formattedName_shouldReproduceEpisodeSet() {
    let series = common::rosies_rules();
    let episodes = common::rosies_episodes();
    let matched = vec![episodes[0].clone(), episodes[1].clone()];

    let template =
        NamingTemplate::parse("{series_name} - S{season_num}E{episode_num} - {episode_title}")
            .unwrap();
    let name = proposed_file_name(&template, &series, &matched, ".mp4");
    assert_eq!(name, "Rosie's Rules - S01E01E02 - Abuela's Birthday + Cat Mail.mp4");

    // Re-run the front of the pipeline on the produced name
    let stem = name.strip_suffix(".mp4").unwrap();
    let title = extract_title(&normalize_stem(stem)).expect("tagged name should extract");
    assert_eq!(title, "Abuela's Birthday + Cat Mail");

    let result = engine().match_title(&title, &episodes);
    assert!(result.complete);
    let ids: Vec<u64> = result.episodes.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![11, 12]);
}

/// A best score just below the threshold is reported, not matched
#[test]
fn test_matchTitle_scoreJustBelowThreshold_shouldReportScore() {
    use serename::providers::mock::MockProvider;

    // 4 edits across 25 characters: exactly 84 against the 85 threshold
    let episodes = vec![MockProvider::episode(31, "ABCDEFGHIJKLMNOPQRSTUVWXY", 1, 1)];
    let result = engine().match_title("ABCDEFGHIJKLMNOPQRSTU1234", &episodes);

    assert!(result.is_empty());
    assert_eq!(result.best_score, 84);
}

/// Scoring is insensitive to the case of either side
#[test]
fn test_matchTitle_caseFolding_shouldNotChangeOutcome() {
    let episodes = common::rosies_episodes();
    let upper = engine().match_title("CAT MAIL", &episodes);
    let lower = engine().match_title("cat mail", &episodes);

    assert_eq!(upper.episode_count(), lower.episode_count());
    assert_eq!(upper.best_score, lower.best_score);
}
