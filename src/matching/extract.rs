/*!
 * Title extraction from already-tagged filenames.
 *
 * Recognizes the common `Series - S01E02 - Title` shapes, including
 * multi-episode tags (`S01E01E02`) and ranges (`S01E01-E02`), and falls back
 * to stripping the known series name and any leading episode digits when no
 * pattern applies. Interior separators are preserved for the segmenter.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matching::normalize::collapse_whitespace;

/// Episode tag: one season number followed by one or more episode numbers,
/// optionally dash-joined (S01E01, S01E01E02, S01E01-E02)
const EPISODE_TAG: &str = r"[sS]\d{1,2}(?:[eE]\d{2,3})+(?:-[eE]\d{2,3})?";

static TAGGED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "Series - S01E02 - Title"
        format!(r"^.*? - {EPISODE_TAG} - (?P<title>.+)$"),
        // "Series. - S01E02.Title" and dotted variants
        format!(r"^.*?[. ]-[. ]?{EPISODE_TAG}[. ](?P<title>.+)$"),
        // "Series S01E02 Title"
        format!(r"^.*? {EPISODE_TAG} (?P<title>.+)$"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("tagged filename pattern"))
    .collect()
});

static LEADING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[\s._\-]*").unwrap());

/// Extract the episode-title part of a tagged filename stem.
///
/// Returns None when no tag pattern matches; the caller then falls back to
/// [`fallback_title`].
pub fn extract_title(stem: &str) -> Option<String> {
    for pattern in TAGGED_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(stem) {
            let title = captures.name("title")?.as_str();
            return Some(collapse_whitespace(&title.replace(['.', '_'], " ")));
        }
    }
    None
}

/// Derive a candidate title from an untagged stem.
///
/// Removes the known series name case-insensitively, trims separator runs at
/// the edges, and strips leading digits (stray episode numbers). Interior
/// separators survive so the segmenter can still split on them.
pub fn fallback_title(stem: &str, series_name: &str) -> String {
    let without_series = if series_name.is_empty() {
        stem.to_string()
    } else {
        let pattern = format!("(?i){}", regex::escape(series_name));
        // Escaped literal, cannot fail to compile
        Regex::new(&pattern)
            .expect("escaped series name pattern")
            .replace_all(stem, "")
            .into_owned()
    };

    let trimmed = without_series.trim_matches(|c: char| {
        c.is_whitespace() || c == '.' || c == '_' || c == '-'
    });
    LEADING_DIGITS.replace(trimmed, "").to_string()
}
