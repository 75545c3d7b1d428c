/*!
 * Title segmentation strategies.
 *
 * Three ways of decomposing a title into per-episode substrings:
 *
 * - **Separator mode**: split on a fixed delimiter list, most explicit first.
 * - **Iterative mode**: enumerate every contiguous token range and let the
 *   interval selector untangle the overlaps. Used when delimiters are absent
 *   or unreliable.
 * - **Per-token mode**: last resort, match each word on its own.
 */

use log::debug;

use crate::matching::fuzzy::FuzzyScorer;
use crate::matching::model::{MatchCandidate, SegmentationResult};
use crate::matching::normalize::tokenize;
use crate::providers::EpisodeRecord;

/// Delimiters tried by separator mode, in priority order. The bare "+" is
/// always attempted; the rest only when they occur in the title.
const SEPARATORS: [&str; 6] = ["+", " - ", " + ", " _ ", " ", "_"];

/// Segmenter binding the strategies to one scorer
#[derive(Debug)]
pub struct Segmenter<'a> {
    scorer: &'a FuzzyScorer,
}

impl<'a> Segmenter<'a> {
    pub fn new(scorer: &'a FuzzyScorer) -> Self {
        Self { scorer }
    }

    /// Separator mode: try each delimiter, match every part independently.
    ///
    /// A delimiter achieves full coverage when every non-empty part matches
    /// and the matched ids are unique (a duplicate id collapses the count and
    /// fails completeness). Among full-coverage delimiters the one yielding
    /// the most distinct episodes wins, earlier delimiter on ties; when none
    /// is full, the largest partial match count is retained.
    pub fn separator_pass(
        &self,
        title: &str,
        episodes: &[EpisodeRecord],
    ) -> SegmentationResult {
        let mut best = SegmentationResult::empty();

        for (priority, separator) in SEPARATORS.iter().enumerate() {
            if priority > 0 && !title.contains(separator) {
                continue;
            }

            let result = self.split_and_match(title, separator, episodes);
            best.observe_score(result.best_score);

            let wins = if result.complete && best.complete {
                result.episode_count() > best.episode_count()
            } else if result.complete != best.complete {
                result.complete
            } else {
                result.episode_count() > best.episode_count()
            };
            if wins {
                debug!(
                    "Separator {:?} matched {} episode(s), complete={}",
                    separator,
                    result.episode_count(),
                    result.complete
                );
                let best_seen = best.best_score;
                best = result;
                best.observe_score(best_seen);
            }
        }

        best
    }

    /// Match each part produced by one delimiter against the episode list
    fn split_and_match(
        &self,
        title: &str,
        separator: &str,
        episodes: &[EpisodeRecord],
    ) -> SegmentationResult {
        let mut result = SegmentationResult::empty();
        let mut part_count = 0usize;
        let mut all_matched = true;

        for part in title.split(separator).map(str::trim).filter(|p| !p.is_empty()) {
            part_count += 1;
            match self.scorer.best_match(part, episodes) {
                Some(best) => {
                    result.observe_score(best.score);
                    if best.score >= self.scorer.threshold() {
                        result.push_unique(episodes[best.episode_index].clone());
                    } else {
                        all_matched = false;
                    }
                }
                None => all_matched = false,
            }
        }

        // A duplicate id collapses the episode list below the part count
        result.complete =
            all_matched && part_count > 0 && result.episode_count() == part_count;
        result
    }

    /// Iterative mode: every contiguous token range is a candidate.
    ///
    /// O(n²) in the token count, acceptable because titles are short. Returns
    /// the thresholded candidates plus the best score observed anywhere.
    pub fn iterative_candidates(
        &self,
        title: &str,
        episodes: &[EpisodeRecord],
    ) -> (Vec<MatchCandidate>, u8) {
        let tokens = tokenize(title);
        let mut candidates = Vec::new();
        let mut best_seen = 0u8;

        for start in 0..tokens.len() {
            for end in start..tokens.len() {
                let joined = tokens[start..=end].join(" ");
                if let Some(best) = self.scorer.best_match(&joined, episodes) {
                    best_seen = best_seen.max(best.score);
                    if best.score >= self.scorer.threshold() {
                        candidates.push(MatchCandidate {
                            start,
                            end,
                            episode_index: best.episode_index,
                            score: best.score,
                        });
                    }
                }
            }
        }

        (candidates, best_seen)
    }

    /// Per-token mode: match each word longer than one character on its own
    pub fn per_token_pass(
        &self,
        title: &str,
        episodes: &[EpisodeRecord],
    ) -> SegmentationResult {
        let mut result = SegmentationResult::empty();

        for token in tokenize(title).iter().filter(|t| t.chars().count() > 1) {
            if let Some(best) = self.scorer.best_match(token, episodes) {
                result.observe_score(best.score);
                if best.score >= self.scorer.threshold() {
                    result.push_unique(episodes[best.episode_index].clone());
                }
            }
        }

        result
    }
}
