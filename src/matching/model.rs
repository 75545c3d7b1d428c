/*!
 * Data model for the title matching pipeline.
 */

use crate::providers::EpisodeRecord;

/// A scored, contiguous token range judged to correspond to one episode.
///
/// Produced and consumed within a single segmentation attempt; `start` and
/// `end` are inclusive indices into the tokenized title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCandidate {
    /// First token index of the range
    pub start: usize,
    /// Last token index of the range, inclusive
    pub end: usize,
    /// Index into the episode slice this range matched
    pub episode_index: usize,
    /// Fuzzy score of the match, 0..=100
    pub score: u8,
}

impl MatchCandidate {
    /// Number of tokens the range spans
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the range shares any token index with another candidate
    pub fn overlaps(&self, other: &MatchCandidate) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// The decomposition of one title into episodes.
///
/// Episodes are ordered as they appear in the title and unique by id; an
/// episode is never double-counted even when two strategies both matched it.
#[derive(Debug, Clone, Default)]
pub struct SegmentationResult {
    /// Matched episodes, in title order, duplicate-free by id
    pub episodes: Vec<EpisodeRecord>,
    /// Whether the matches account for every significant token of the title
    pub complete: bool,
    /// Highest fuzzy score observed during the attempt, for skip reporting
    pub best_score: u8,
}

impl SegmentationResult {
    /// An attempt that matched nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append an episode unless its id is already present
    pub fn push_unique(&mut self, episode: EpisodeRecord) {
        if !self.episodes.iter().any(|e| e.id == episode.id) {
            self.episodes.push(episode);
        }
    }

    /// Number of distinct matched episodes
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Whether the attempt matched nothing at all
    pub fn is_empty(&self) -> bool {
        self.episodes.is_empty()
    }

    /// Ordering between strategy outcomes: more distinct episodes wins, and at
    /// equal count a complete decomposition beats an incomplete one.
    pub fn better_than(&self, other: &SegmentationResult) -> bool {
        if self.episode_count() != other.episode_count() {
            return self.episode_count() > other.episode_count();
        }
        self.complete && !other.complete
    }

    /// Record a score observation, keeping the maximum
    pub fn observe_score(&mut self, score: u8) {
        self.best_score = self.best_score.max(score);
    }
}
