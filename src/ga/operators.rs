//! Bit-set genetic operators.
//!
//! All operators work on the first `n` positions of an [`Individual`], where
//! `n` is the number of vertices of the graph. They do not repair their
//! output; the runner repairs every child before it joins the pool.
//!
//! - [`random_genes`]: Bernoulli(0.5) per position
//! - [`crossover`] / [`crossover_at`]: single-point crossover, two children
//! - [`mutate`]: flip exactly one position

use rand::Rng;

use super::individual::Individual;

/// Random individual over `[0, n)`, each vertex selected with probability 0.5.
///
/// The result is usually not a clique.
pub fn random_genes<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Individual {
    let mut ind = Individual::with_capacity(n);
    for v in 0..n {
        if rng.random_bool(0.5) {
            ind.set(v, true);
        }
    }
    ind
}

/// Single-point crossover at a fixed cut.
///
/// `child1 = p1[0..cut] ++ p2[cut..n]`, `child2 = p2[0..cut] ++ p1[cut..n]`.
pub fn crossover_at(
    parent1: &Individual,
    parent2: &Individual,
    cut: usize,
    n: usize,
) -> (Individual, Individual) {
    let mut child1 = Individual::with_capacity(n);
    let mut child2 = Individual::with_capacity(n);
    for v in 0..n {
        let (from1, from2) = if v < cut {
            (parent1, parent2)
        } else {
            (parent2, parent1)
        };
        child1.set(v, from1.contains(v));
        child2.set(v, from2.contains(v));
    }
    (child1, child2)
}

/// Single-point crossover with a uniformly random cut in `[0, n)`.
///
/// With `n == 0` the parents are returned unchanged.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Individual,
    parent2: &Individual,
    n: usize,
    rng: &mut R,
) -> (Individual, Individual) {
    if n == 0 {
        return (parent1.clone(), parent2.clone());
    }
    let cut = rng.random_range(0..n);
    crossover_at(parent1, parent2, cut, n)
}

/// Flips exactly one uniformly random position in `[0, n)`.
pub fn mutate<R: Rng + ?Sized>(individual: &mut Individual, n: usize, rng: &mut R) {
    if n == 0 {
        return;
    }
    let v = rng.random_range(0..n);
    individual.flip(v);
}
