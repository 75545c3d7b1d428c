/*!
 * Coverage validation: does a set of matched episode names account for the
 * whole input title?
 */

use crate::matching::normalize::tokenize;

/// Check that every significant token of the original title is accounted for
/// by at least one token drawn from the matched episode names.
///
/// Significant tokens are longer than 2 characters, compared lowercased. A
/// title token is accounted for when it is a substring of, or a superstring
/// of, some episode-name token — containment rather than equality, to
/// tolerate minor wording differences. An unaccounted significant token
/// downgrades the result from complete to partial.
pub fn covers_title(title: &str, matched_names: &[&str]) -> bool {
    let matched_words: Vec<String> = matched_names
        .iter()
        .flat_map(|name| tokenize(name))
        .map(str::to_lowercase)
        .collect();

    tokenize(title)
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| t.chars().count() > 2)
        .all(|token| {
            matched_words
                .iter()
                .any(|word| word.contains(&token) || token.contains(word.as_str()))
        })
}
