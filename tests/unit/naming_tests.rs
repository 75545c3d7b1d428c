/*!
 * Tests for naming templates and multi-episode name assembly
 */

use serename::errors::TemplateError;
use serename::naming::{NamingTemplate, proposed_file_name, sanitize_filename};
use serename::providers::mock::MockProvider;

use crate::common;

/// Every recognized placeholder renders
#[test]
fn test_render_allPlaceholders_shouldSubstitute() {
    let template = NamingTemplate::parse(
        "{series_name} ({series_year}) S{season_num}E{episode_num} A{absolute_num} {aired_date} - {episode_title}",
    )
    .unwrap();

    let mut episode = MockProvider::episode(11, "Abuela's Birthday", 1, 1);
    episode.absolute_number = Some(1);

    let rendered = template.render(&common::rosies_rules(), &episode);
    assert_eq!(
        rendered,
        "Rosie's Rules (2022) S01E01 A01 2022-01-01 - Abuela's Birthday"
    );
}

/// Unknown placeholders are a parse error, not a runtime surprise
#[test]
fn test_parse_unknownPlaceholder_shouldFailLoudly() {
    let err = NamingTemplate::parse("{episode_titel}").unwrap_err();
    assert_eq!(err, TemplateError::UnknownPlaceholder("episode_titel".to_string()));
}

/// Multi-episode names sort by episode number regardless of match order
#[test]
fn test_proposedFileName_unorderedMatches_shouldSortByEpisodeNumber() {
    let episodes = vec![
        MockProvider::episode(12, "Cat Mail", 1, 2),
        MockProvider::episode(11, "Abuela's Birthday", 1, 1),
    ];
    let template = NamingTemplate::parse("{episode_title}").unwrap();

    let name = proposed_file_name(&template, &common::rosies_rules(), &episodes, ".mp4");
    assert_eq!(
        name,
        "Rosie's Rules - S01E01E02 - Abuela's Birthday + Cat Mail.mp4"
    );
}

/// Three-episode runs extend the tag with one E-part per episode
#[test]
fn test_proposedFileName_threeEpisodes_shouldExtendTag() {
    let episodes = vec![
        MockProvider::episode(13, "The Art Show", 1, 3),
        MockProvider::episode(11, "Abuela's Birthday", 1, 1),
        MockProvider::episode(12, "Cat Mail", 1, 2),
    ];
    let template = NamingTemplate::parse("{episode_title}").unwrap();

    let name = proposed_file_name(&template, &common::rosies_rules(), &episodes, ".mkv");
    assert!(name.starts_with("Rosie's Rules - S01E01E02E03 - "));
}

/// The first sorted episode's season is authoritative for the tag
#[test]
fn test_proposedFileName_seasonFromFirstEpisode_shouldBeUsed() {
    let episodes = vec![
        MockProvider::episode(23, "Daniel and Margaret Play School", 3, 5),
        MockProvider::episode(24, "Treasure Hunt at the Castle", 3, 6),
    ];
    let template = NamingTemplate::parse("{episode_title}").unwrap();

    let name = proposed_file_name(&template, &common::daniel_tigers(), &episodes, ".mp4");
    assert_eq!(
        name,
        "Daniel Tiger's Neighborhood - S03E05E06 - Daniel and Margaret Play School + Treasure Hunt at the Castle.mp4"
    );
}

/// Produced names never carry filesystem-illegal characters
#[test]
fn test_proposedFileName_illegalCharsInTitle_shouldBeSanitized() {
    let episodes = vec![MockProvider::episode(41, "Who? What: Where*", 2, 7)];
    let template =
        NamingTemplate::parse("{series_name} - S{season_num}E{episode_num} - {episode_title}")
            .unwrap();

    let name = proposed_file_name(&template, &common::rosies_rules(), &episodes, ".mp4");
    assert_eq!(name, "Rosie's Rules - S02E07 - Who What Where.mp4");
}

/// Sanitizer strips exactly the path-illegal set
#[test]
fn test_sanitizeFilename_withIllegalChars_shouldStripThem() {
    assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    assert_eq!(sanitize_filename("untouched name.mp4"), "untouched name.mp4");
}
