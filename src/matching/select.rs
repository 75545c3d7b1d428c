/*!
 * Greedy selection of non-overlapping match candidates.
 */

use std::collections::HashSet;

use crate::matching::model::MatchCandidate;

/// Pick a maximal-score, non-overlapping subset of candidates.
///
/// Candidates are ranked descending by score, then by range length (a longer
/// match consumes more of the ambiguous input and leaves fewer residual
/// tokens). The ranked list is walked greedily: a candidate is accepted only
/// when none of its token indices has been claimed by an earlier accepted
/// candidate. The accepted set is returned in ascending start order.
pub fn select_non_overlapping(mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut accepted: Vec<MatchCandidate> = Vec::new();

    for candidate in candidates {
        let overlaps = (candidate.start..=candidate.end).any(|i| claimed.contains(&i));
        if overlaps {
            continue;
        }
        claimed.extend(candidate.start..=candidate.end);
        accepted.push(candidate);
    }

    accepted.sort_by_key(|c| c.start);
    accepted
}
