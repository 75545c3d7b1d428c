/*!
 * Fuzzy scoring of candidate substrings against episode titles.
 *
 * Provides Levenshtein distance-based similarity so episode titles are found
 * even when the filename carries typos or minor wording variations.
 */

use log::debug;
use regex::Regex;

use crate::matching::normalize::{quality_tag_pattern, sanitize_for_scoring};
use crate::providers::EpisodeRecord;

/// The best-scoring episode for one candidate substring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredEpisode {
    /// Index into the episode slice the candidate was scored against
    pub episode_index: usize,
    /// Similarity score, 0..=100
    pub score: u8,
}

/// Fuzzy scorer with quality-tag stripping and a short-title guard
#[derive(Debug)]
pub struct FuzzyScorer {
    /// Minimum score for a candidate to count as a match
    threshold: u8,
    /// Compiled quality-tag matcher, None when no tags are configured
    quality_tags: Option<Regex>,
}

impl FuzzyScorer {
    /// Create a scorer with the given threshold and quality-tag list
    pub fn new(threshold: u8, quality_tags: &[String]) -> Self {
        Self {
            threshold,
            quality_tags: quality_tag_pattern(quality_tags),
        }
    }

    /// The configured match threshold
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Similarity between two strings as an integer in [0,100].
    ///
    /// Case-insensitive normalized Levenshtein ratio: equal strings score 100,
    /// completely dissimilar strings score near 0.
    pub fn score(&self, a: &str, b: &str) -> u8 {
        ratio(a, b)
    }

    /// Score a candidate substring against every episode and return the best,
    /// regardless of threshold.
    ///
    /// Returns None when the candidate is empty after sanitization, when the
    /// episode list is empty, or when the short-title guard refuses: a
    /// sanitized candidate under 3 characters whose raw form is under 5
    /// characters matches nothing, to avoid spurious hits on connective words.
    ///
    /// Ties at equal score resolve to the episode with the lower
    /// (season, episode) pair, so the outcome does not depend on the order
    /// the provider returned the list in.
    pub fn best_match(&self, candidate: &str, episodes: &[EpisodeRecord]) -> Option<ScoredEpisode> {
        let sanitized = sanitize_for_scoring(candidate, self.quality_tags.as_ref());
        if sanitized.is_empty() || episodes.is_empty() {
            return None;
        }

        if sanitized.chars().count() < 3 && candidate.chars().count() < 5 {
            debug!("Refusing to match very short title: '{}'", sanitized);
            return None;
        }

        let mut best: Option<(usize, u8)> = None;
        for (index, episode) in episodes.iter().enumerate() {
            let score = ratio(&episode.name, &sanitized);
            let better = match best {
                None => true,
                Some((best_index, best_score)) => {
                    score > best_score
                        || (score == best_score && episode_order(episode) < episode_order(&episodes[best_index]))
                }
            };
            if better {
                best = Some((index, score));
            }
        }

        best.map(|(episode_index, score)| ScoredEpisode { episode_index, score })
    }

    /// Like [`best_match`](Self::best_match), but only when the best score
    /// reaches the threshold.
    pub fn find_match(&self, candidate: &str, episodes: &[EpisodeRecord]) -> Option<ScoredEpisode> {
        self.best_match(candidate, episodes)
            .filter(|m| m.score >= self.threshold)
    }
}

fn episode_order(episode: &EpisodeRecord) -> (u32, u32) {
    (episode.season_number, episode.episode_number)
}

/// Normalized similarity ratio in [0,100], case-insensitive
fn ratio(a: &str, b: &str) -> u8 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    if a_lower.is_empty() && b_lower.is_empty() {
        return 100;
    }
    if a_lower.is_empty() || b_lower.is_empty() {
        return 0;
    }

    let distance = levenshtein_distance(&a_lower, &b_lower);
    let max_len = a_lower.chars().count().max(b_lower.chars().count());

    (100.0 * (1.0 - distance as f64 / max_len as f64)).round() as u8
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Use two-row optimization for space efficiency
    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr_row[0] = i;

        for j in 1..=b_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1)                  // deletion
                .min(curr_row[j - 1] + 1)                    // insertion
                .min(prev_row[j - 1] + cost);                // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
