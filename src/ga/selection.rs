//! Survivor selection.
//!
//! The GA keeps its population size fixed by running repeated tournaments
//! over the parent + offspring pool. A candidate that wins a tournament is
//! removed from the pool, so every survivor is distinct.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::seq::index;
use rand::Rng;

/// Number of contestants per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Selects `count` distinct candidate indices by tournament without replacement.
///
/// Each tournament samples `tournament_size` distinct candidates that have
/// not won yet (or all remaining ones if fewer are left). The highest
/// fitness wins; on ties the first sampled contestant wins. Winners are
/// returned in selection order.
///
/// # Panics
/// Panics if `count > fitnesses.len()`.
pub fn tournament_without_replacement<R: Rng + ?Sized>(
    fitnesses: &[usize],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    assert!(
        count <= fitnesses.len(),
        "cannot select {count} survivors from {} candidates",
        fitnesses.len()
    );

    let mut available: Vec<usize> = (0..fitnesses.len()).collect();
    let mut winners = Vec::with_capacity(count);

    for _ in 0..count {
        let k = tournament_size.clamp(1, available.len());
        let contestants = index::sample(rng, available.len(), k);

        let mut best_pos = contestants.index(0);
        for pos in contestants.iter().skip(1) {
            if fitnesses[available[pos]] > fitnesses[available[best_pos]] {
                best_pos = pos;
            }
        }
        winners.push(available.swap_remove(best_pos));
    }

    winners
}
