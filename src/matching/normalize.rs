/*!
 * Filename and title normalization.
 *
 * Two distinct layers, applied at different points of the pipeline:
 *
 * - [`normalize_stem`] cleans a raw filename stem ahead of title extraction.
 *   It flattens dots into spaces but leaves `_`, `-` and `+` alone, because
 *   those are exactly the separators the segmenter still needs to inspect.
 * - [`sanitize_for_scoring`] prepares a candidate substring for fuzzy
 *   comparison: quality tags are stripped and separator runs collapse into
 *   spaces. Applied per candidate, never to the segmenter's input.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\-]+").unwrap());
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_+\s\-]+").unwrap());

/// Canonicalize a raw filename stem for title extraction.
///
/// Dots become spaces unless they sit between two digits (protecting
/// decimal-like tokens such as "v1.2"); repeated whitespace collapses; the
/// result is trimmed. Underscores, hyphens and pluses survive untouched.
pub fn normalize_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let mut out = String::with_capacity(stem.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '.' {
            let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
            let next_digit = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if prev_digit && next_digit {
                out.push('.');
            } else {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }

    collapse_whitespace(&out)
}

/// Collapse runs of whitespace into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compile the configured quality tags into a whole-word, case-insensitive
/// matcher. Returns None when the tag list is empty.
pub fn quality_tag_pattern(tags: &[String]) -> Option<Regex> {
    if tags.is_empty() {
        return None;
    }
    let escaped: Vec<String> = tags.iter().map(|t| regex::escape(t)).collect();
    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    // The pattern is built from escaped literals; compilation cannot fail
    Some(Regex::new(&pattern).expect("escaped quality tag pattern"))
}

/// Prepare a candidate substring for fuzzy comparison.
///
/// Strips quality-tag words, collapses `.`/`_`/`-` runs into spaces and trims.
pub fn sanitize_for_scoring(text: &str, quality_tags: Option<&Regex>) -> String {
    let stripped = match quality_tags {
        Some(re) => re.replace_all(text, "").into_owned(),
        None => text.to_string(),
    };
    let flattened = SEPARATOR_RUN.replace_all(&stripped, " ");
    collapse_whitespace(&flattened)
}

/// Split a title into words on separator runs, dropping empty tokens
pub fn tokenize(title: &str) -> Vec<&str> {
    TOKEN_SPLIT.split(title).filter(|t| !t.is_empty()).collect()
}
