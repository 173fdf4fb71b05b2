//! Pick the candidate with the fewest nearby incidents.

use thiserror::Error;

use crate::{RouteCandidate, ScoredRoute};

/// Errors from [`select_safest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No candidates were supplied.
    #[error("no candidate routes to select from")]
    EmptyCandidateList,
    /// Candidates and scores were not positionally aligned.
    #[error("received {candidates} candidates but {scores} scores")]
    LengthMismatch {
        /// Number of candidates.
        candidates: usize,
        /// Number of scores.
        scores: usize,
    },
}

/// Return the candidate with the lowest score.
///
/// Ties resolve to the earliest candidate, so the provider's ordering acts as
/// the tie-breaker.
///
/// # Errors
///
/// Returns [`SelectionError::EmptyCandidateList`] when `candidates` is empty
/// and [`SelectionError::LengthMismatch`] when `scores` does not have one
/// entry per candidate.
///
/// # Examples
///
/// ```
/// use saferoute_core::{RouteCandidate, select_safest};
///
/// let candidates: Vec<RouteCandidate> = ["A", "B", "C"]
///     .into_iter()
///     .map(|name| RouteCandidate::new(Vec::new(), serde_json::json!(name)))
///     .collect();
/// let safest = select_safest(candidates, &[2, 2, 5]).expect("non-empty");
/// assert_eq!(safest.route.raw, serde_json::json!("A"));
/// assert_eq!(safest.incident_count, 2);
/// ```
pub fn select_safest(
    candidates: Vec<RouteCandidate>,
    scores: &[usize],
) -> Result<ScoredRoute, SelectionError> {
    if candidates.len() != scores.len() {
        return Err(SelectionError::LengthMismatch {
            candidates: candidates.len(),
            scores: scores.len(),
        });
    }

    let mut best: Option<(usize, usize)> = None;
    for (position, &score) in scores.iter().enumerate() {
        match best {
            Some((_, lowest)) if score >= lowest => {}
            _ => best = Some((position, score)),
        }
    }

    let (position, incident_count) = best.ok_or(SelectionError::EmptyCandidateList)?;
    candidates
        .into_iter()
        .nth(position)
        .map(|route| ScoredRoute {
            route,
            incident_count,
        })
        .ok_or(SelectionError::EmptyCandidateList)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn named(names: &[&str]) -> Vec<RouteCandidate> {
        names
            .iter()
            .map(|name| RouteCandidate::new(Vec::new(), serde_json::json!(name)))
            .collect()
    }

    #[rstest]
    #[case(&[3, 1, 2], "B", 1)]
    #[case(&[2, 2, 5], "A", 2)]
    #[case(&[4, 0, 0], "B", 0)]
    #[case(&[7], "A", 7)]
    fn picks_first_minimum(
        #[case] scores: &[usize],
        #[case] expected: &str,
        #[case] expected_count: usize,
    ) {
        let candidates = named(&["A", "B", "C"][..scores.len()]);
        let safest = select_safest(candidates, scores).expect("candidates present");
        assert_eq!(safest.route.raw, serde_json::json!(expected));
        assert_eq!(safest.incident_count, expected_count);
    }

    #[rstest]
    fn empty_input_is_rejected() {
        assert_eq!(
            select_safest(Vec::new(), &[]),
            Err(SelectionError::EmptyCandidateList)
        );
    }

    #[rstest]
    fn misaligned_scores_are_rejected() {
        let err = select_safest(named(&["A", "B"]), &[1]).expect_err("lengths differ");
        assert_eq!(
            err,
            SelectionError::LengthMismatch {
                candidates: 2,
                scores: 1
            }
        );
    }
}
