/*!
 * Title segmentation and fuzzy-matching engine.
 *
 * Given an extracted title string and the episode list of a series, decide
 * which contiguous parts of the title correspond to which episodes, resolve
 * disagreements between segmentation strategies deterministically, and verify
 * that the decomposition accounts for the whole input.
 *
 * The strategies form an ordered list walked by [`MatchEngine::match_title`]:
 * separator splitting first, exhaustive token-range enumeration second,
 * per-token matching as the last resort. The walk stops at the first complete
 * decomposition, with one exception: a complete single-episode result over a
 * long title may actually be an undelimited multi-episode run, so iterative
 * mode still gets a chance to find more episodes.
 */

use log::debug;

use crate::matching::coverage::covers_title;
use crate::matching::fuzzy::FuzzyScorer;
use crate::matching::model::SegmentationResult;
use crate::matching::normalize::tokenize;
use crate::matching::segment::Segmenter;
use crate::matching::select::select_non_overlapping;
use crate::providers::EpisodeRecord;

pub mod coverage;
pub mod extract;
pub mod fuzzy;
pub mod model;
pub mod normalize;
pub mod segment;
pub mod select;

/// The ordered strategy list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Separator,
    Iterative,
    PerToken,
}

/// Matching engine for one run: a scorer plus the strategy walk
#[derive(Debug)]
pub struct MatchEngine {
    scorer: FuzzyScorer,
}

impl MatchEngine {
    /// Create an engine with the given threshold and quality-tag list
    pub fn new(threshold: u8, quality_tags: &[String]) -> Self {
        Self {
            scorer: FuzzyScorer::new(threshold, quality_tags),
        }
    }

    /// The scorer backing this engine
    pub fn scorer(&self) -> &FuzzyScorer {
        &self.scorer
    }

    /// Decompose a title into the episodes it names.
    ///
    /// Walks the strategy list, keeping the best decomposition seen (more
    /// distinct episodes wins; at equal count completeness wins) and stopping
    /// at the first complete result that is not suspicious. Iterative mode
    /// only runs when nothing matched yet or when a lone match spans a title
    /// of more than two tokens; per-token mode only when nothing matched.
    pub fn match_title(
        &self,
        title: &str,
        episodes: &[EpisodeRecord],
    ) -> SegmentationResult {
        let token_count = tokenize(title).len();
        let segmenter = Segmenter::new(&self.scorer);
        let mut best = SegmentationResult::empty();

        for strategy in [Strategy::Separator, Strategy::Iterative, Strategy::PerToken] {
            if !applicable(strategy, &best, token_count) {
                continue;
            }

            let mut result = match strategy {
                Strategy::Separator => segmenter.separator_pass(title, episodes),
                Strategy::Iterative => {
                    let (candidates, best_seen) =
                        segmenter.iterative_candidates(title, episodes);
                    let mut result = SegmentationResult::empty();
                    for candidate in select_non_overlapping(candidates) {
                        result.observe_score(candidate.score);
                        result.push_unique(episodes[candidate.episode_index].clone());
                    }
                    result.observe_score(best_seen);
                    result
                }
                Strategy::PerToken => segmenter.per_token_pass(title, episodes),
            };

            // Separator mode derives completeness from its own all-parts
            // check; the other strategies use the coverage validator
            if strategy != Strategy::Separator && !result.is_empty() {
                let names: Vec<&str> =
                    result.episodes.iter().map(|e| e.name.as_str()).collect();
                result.complete = covers_title(title, &names);
            }

            debug!(
                "Strategy {:?} on '{}': {} episode(s), complete={}, best score {}",
                strategy,
                title,
                result.episode_count(),
                result.complete,
                result.best_score
            );

            let best_seen = best.best_score;
            if result.better_than(&best) {
                best = result;
            } else {
                best.observe_score(result.best_score);
            }
            best.observe_score(best_seen);

            if best.complete && !suspicious(&best, token_count) {
                break;
            }
        }

        best
    }
}

/// Whether a strategy should run given what earlier strategies found
fn applicable(strategy: Strategy, best: &SegmentationResult, token_count: usize) -> bool {
    match strategy {
        Strategy::Separator => true,
        Strategy::Iterative => best.is_empty() || suspicious(best, token_count),
        Strategy::PerToken => best.is_empty(),
    }
}

/// A lone matched episode over a long title suggests an undelimited
/// multi-episode run and keeps the strategy walk going
fn suspicious(result: &SegmentationResult, token_count: usize) -> bool {
    result.episode_count() == 1 && token_count > 2
}
