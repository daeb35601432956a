//! Weighted random choice among ranked candidates.

use courier_core::CustomerId;
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, RngCore};

use crate::attractiveness::ScoredCandidate;

/// Pick one candidate with probability proportional to its score.
///
/// Returns `None` only for an empty ranking. When any score is negative or
/// non-finite, or all scores are zero, the draw falls back to a uniform
/// choice and logs a warning.
///
/// # Examples
///
/// ```rust
/// use courier_core::CustomerId;
/// use courier_solver::{ScoredCandidate, draw};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let ranked = [ScoredCandidate { customer: CustomerId::new(3), score: 1.0 }];
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// assert_eq!(draw(&ranked, &mut rng), Some(CustomerId::new(3)));
/// ```
pub fn draw(ranked: &[ScoredCandidate], rng: &mut dyn RngCore) -> Option<CustomerId> {
    if ranked.is_empty() {
        return None;
    }
    let usable = ranked
        .iter()
        .all(|candidate| candidate.score.is_finite() && candidate.score >= 0.0);
    let weighted = usable
        .then(|| WeightedIndex::new(ranked.iter().map(|candidate| candidate.score)).ok())
        .flatten();
    if let Some(distribution) = weighted {
        return ranked
            .get(distribution.sample(rng))
            .map(|candidate| candidate.customer);
    }
    log::warn!(
        "degenerate attractiveness weights across {} candidates; drawing uniformly",
        ranked.len()
    );
    ranked
        .get(rng.gen_range(0..ranked.len()))
        .map(|candidate| candidate.customer)
}
