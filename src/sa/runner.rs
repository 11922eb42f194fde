//! SA execution loop.
//!
//! The search state is a permutation of all vertices. Its first `m`
//! entries form the candidate window; the cost of a state is the number of
//! non-adjacent pairs inside the window, so cost 0 means the window is a
//! clique of size `m`. A move swaps one window vertex with one pool vertex.
//!
//! [`SaRunner::maximum_clique`] anneals at a fixed `m`;
//! [`SaRunner::run`] deepens `m` until an annealing run fails.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use super::config::SaConfig;
use crate::error::{CliqueError, CliqueResult};
use crate::graph::Graph;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best clique found.
    pub clique: Vec<usize>,

    /// Size of `clique`.
    pub size: usize,

    /// Window size of the last annealing run (the first failing target, or
    /// the vertex count if every target succeeded).
    pub final_target: usize,

    /// Number of annealing runs performed.
    pub attempts: usize,

    /// Temperature when the last annealing run stopped.
    pub final_temperature: f64,
}

/// Executes clique Simulated Annealing.
///
/// # Usage
///
/// ```
/// use clique_metaheur::graph::Graph;
/// use clique_metaheur::sa::{SaConfig, SaRunner};
///
/// let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
/// let config = SaConfig::new(10.0, 0.01, 0.99, 1).with_seed(42);
/// let result = SaRunner::new(&graph, config).unwrap().run();
/// assert_eq!(result.size, 3);
/// ```
#[derive(Debug)]
pub struct SaRunner<'g> {
    graph: &'g Graph,
    config: SaConfig,
    n: usize,
    /// Current window size.
    m: usize,
    permutation: Vec<usize>,
    vertex_degrees: Vec<usize>,
    /// Caller-supplied seed list, kept as fallback when it is a clique.
    seed_clique: Option<Vec<usize>>,
    /// Last window that reached zero cost.
    last_clique: Option<Vec<usize>>,
    temperature: f64,
    current_f: usize,
    attempts: usize,
    rng: StdRng,
}

impl<'g> SaRunner<'g> {
    /// Creates a runner whose permutation is a uniform random shuffle.
    pub fn new(graph: &'g Graph, config: SaConfig) -> CliqueResult<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        let mut permutation: Vec<usize> = (0..graph.number_of_vertices()).collect();
        permutation.shuffle(&mut rng);
        Ok(Self::with_permutation(graph, config, permutation, None, rng))
    }

    /// Creates a runner whose permutation starts with `seed`, followed by
    /// every other vertex in ascending order.
    ///
    /// If `seed` is a non-empty clique it is also the fallback result when
    /// the first annealing run fails.
    pub fn with_seed_clique(graph: &'g Graph, config: SaConfig, seed: &[usize]) -> CliqueResult<Self> {
        config.validate()?;
        let n = graph.number_of_vertices();

        let mut used = HashSet::with_capacity(seed.len());
        for &v in seed {
            if v >= n {
                return Err(CliqueError::VertexOutOfRange { vertex: v, vertices: n });
            }
            if !used.insert(v) {
                return Err(CliqueError::DuplicateVertex(v));
            }
        }

        let mut permutation = seed.to_vec();
        permutation.extend((0..n).filter(|v| !used.contains(v)));

        let seed_clique =
            (!seed.is_empty() && graph.is_clique(seed)).then(|| seed.to_vec());
        let rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self::with_permutation(graph, config, permutation, seed_clique, rng))
    }

    fn with_permutation(
        graph: &'g Graph,
        config: SaConfig,
        permutation: Vec<usize>,
        seed_clique: Option<Vec<usize>>,
        rng: StdRng,
    ) -> Self {
        let n = graph.number_of_vertices();
        let vertex_degrees = (0..n).map(|v| graph.degree(v)).collect();
        Self {
            graph,
            m: config.initial_clique_size.clamp(1, n.max(1)),
            temperature: config.initial_temperature,
            config,
            n,
            permutation,
            vertex_degrees,
            seed_clique,
            last_clique: None,
            current_f: 0,
            attempts: 0,
            rng,
        }
    }

    /// The full permutation.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The candidate window `permutation[0..m]`.
    pub fn window(&self) -> &[usize] {
        &self.permutation[..self.m.min(self.n)]
    }

    /// Current target clique size.
    pub fn target_size(&self) -> usize {
        self.m
    }

    /// Degree of each vertex, computed once at construction.
    pub fn vertex_degrees(&self) -> &[usize] {
        &self.vertex_degrees
    }

    /// Last window that reached zero cost, if any.
    pub fn last_clique(&self) -> Option<&[usize]> {
        self.last_clique.as_deref()
    }

    /// Number of window members (other than position `i`) adjacent to
    /// `permutation[i]`.
    pub fn partial_objective(&self, i: usize) -> usize {
        let u = self.permutation[i];
        self.permutation[..self.m]
            .iter()
            .enumerate()
            .filter(|&(j, &v)| j != i && self.graph.is_edge(u, v))
            .count()
    }

    /// Picks a window position `u` and a pool position `w`.
    ///
    /// Pairs are sampled until the window vertex has no more window
    /// neighbors than the pool vertex would have, or `8n` pairs were tried,
    /// in which case the last pair is used.
    ///
    /// # Panics
    /// Panics if the pool is empty (`m == n`).
    pub fn select_vertices(&mut self) -> (usize, usize) {
        assert!(self.m < self.n, "select_vertices needs a non-empty pool");
        let limit = 8 * self.n;
        let mut attempts = 0;
        loop {
            let u = self.rng.random_range(0..self.m);
            let w = self.rng.random_range(self.m..self.n);
            attempts += 1;
            if self.partial_objective(u) <= self.partial_objective(w) || attempts >= limit {
                return (u, w);
            }
        }
    }

    /// Swaps positions `u` and `w`. Applying it twice restores the state.
    pub fn perform_state_transition(&mut self, u: usize, w: usize) {
        self.permutation.swap(u, w);
    }

    /// Number of non-adjacent pairs in the window.
    pub fn objective(&self) -> usize {
        let window = &self.permutation[..self.m];
        window
            .iter()
            .enumerate()
            .map(|(i, &u)| {
                window[i + 1..]
                    .iter()
                    .filter(|&&v| !self.graph.is_edge(u, v))
                    .count()
            })
            .sum()
    }

    /// Metropolis criterion at the current temperature.
    pub fn accept_new_state(&mut self, delta: f64) -> bool {
        if delta <= 0.0 {
            return true;
        }
        let probability = (-delta / self.temperature).exp();
        self.rng.random_range(0.0..1.0) < probability
    }

    /// One annealing run at the current target size.
    ///
    /// Returns the window if it became a clique, `None` if the temperature
    /// ran out first. With `m == n` no move exists and the window is only
    /// evaluated.
    pub fn maximum_clique(&mut self) -> Option<Vec<usize>> {
        self.attempts += 1;
        self.temperature = self.config.initial_temperature;
        self.current_f = self.objective();

        if self.m < self.n {
            while self.temperature > self.config.end_temperature {
                if self.current_f == 0 {
                    break;
                }
                let (u, w) = self.select_vertices();
                self.perform_state_transition(u, w);

                let new_f = self.objective();
                let delta = new_f as f64 - self.current_f as f64;
                if self.accept_new_state(delta) {
                    self.current_f = new_f;
                } else {
                    self.perform_state_transition(u, w);
                }

                self.temperature *= self.config.cooling_coefficient;
            }
        }

        if self.current_f == 0 {
            let clique = self.window().to_vec();
            self.last_clique = Some(clique.clone());
            Some(clique)
        } else {
            None
        }
    }

    /// Highest-degree vertex; lowest index on ties.
    fn highest_degree_vertex(&self) -> Option<usize> {
        (0..self.n).fold(None, |best, v| match best {
            Some(b) if self.vertex_degrees[b] >= self.vertex_degrees[v] => Some(b),
            _ => Some(v),
        })
    }

    /// Iterative deepening: anneal at growing target sizes until a run
    /// fails, and return the last clique found.
    ///
    /// If the first run already fails, the seed list (when it is a clique)
    /// or else the single highest-degree vertex is returned.
    #[instrument(skip_all, fields(vertices = self.n, start = self.m))]
    pub fn run(&mut self) -> SaResult {
        let mut best: Option<Vec<usize>> = None;

        if self.n > 0 {
            while let Some(clique) = self.maximum_clique() {
                debug!(size = clique.len(), attempts = self.attempts, "sa target reached");
                best = Some(clique);
                if self.m == self.n {
                    break;
                }
                self.m += 1;
            }
        }

        let clique = match (best, self.seed_clique.as_ref()) {
            (Some(found), Some(seed)) if seed.len() > found.len() => seed.clone(),
            (Some(found), _) => found,
            (None, Some(seed)) => seed.clone(),
            (None, None) => self.highest_degree_vertex().into_iter().collect(),
        };
        let size = clique.len();
        info!(size, final_target = self.m, attempts = self.attempts, "sa finished");

        SaResult {
            clique,
            size,
            final_target: self.m,
            attempts: self.attempts,
            final_temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        Graph::from_edges(n, &edges).unwrap()
    }

    fn path4() -> Graph {
        Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap()
    }

    fn fast_config() -> SaConfig {
        SaConfig::new(100.0, 0.001, 0.99, 1).with_seed(42)
    }

    fn is_permutation(perm: &[usize], n: usize) -> bool {
        let mut sorted = perm.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_complete_graph() {
        let g = complete(5);
        let result = SaRunner::new(&g, fast_config()).unwrap().run();
        assert_eq!(result.size, 5);
        assert!(g.is_clique(&result.clique));
        assert_eq!(result.final_target, 5);
    }

    #[test]
    fn test_path_finds_edge_only() {
        let g = path4();
        let mut runner = SaRunner::new(&g, fast_config()).unwrap();
        let result = runner.run();
        assert_eq!(result.size, 2);
        assert!(g.is_clique(&result.clique));
        assert_eq!(result.final_target, 3);
        assert!(is_permutation(runner.permutation(), 4));
    }

    #[test]
    fn test_edgeless_graph() {
        let g = Graph::from_edges(5, &[]).unwrap();
        let result = SaRunner::new(&g, fast_config()).unwrap().run();
        assert_eq!(result.size, 1);
        assert_eq!(result.final_target, 2);
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::from_edges(0, &[]).unwrap();
        let result = SaRunner::new(&g, fast_config()).unwrap().run();
        assert!(result.clique.is_empty());
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn test_fallback_single_vertex() {
        // First target 3 already fails on an edgeless graph.
        let g = Graph::from_edges(5, &[]).unwrap();
        let config = fast_config().with_initial_clique_size(3);
        let result = SaRunner::new(&g, config).unwrap().run();
        assert_eq!(result.clique, vec![0]);
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn test_fallback_seed_clique() {
        let g = path4();
        let a = g.index_of_label(2).unwrap();
        let b = g.index_of_label(3).unwrap();
        let config = fast_config().with_initial_clique_size(3);
        let result = SaRunner::with_seed_clique(&g, config, &[a, b])
            .unwrap()
            .run();
        assert_eq!(result.clique, vec![a, b]);
    }

    #[test]
    fn test_seed_permutation_layout() {
        let g = complete(6);
        let runner = SaRunner::with_seed_clique(&g, fast_config(), &[4, 1]).unwrap();
        assert_eq!(runner.permutation(), &[4, 1, 0, 2, 3, 5]);
    }

    #[test]
    fn test_seed_grows_from_seed() {
        let g = complete(6);
        let config = fast_config().with_initial_clique_size(2);
        let result = SaRunner::with_seed_clique(&g, config, &[5, 3])
            .unwrap()
            .run();
        assert_eq!(result.size, 6);
        assert_eq!(&result.clique[..2], &[5, 3]);
    }

    #[test]
    fn test_seed_validation() {
        let g = path4();
        let err = SaRunner::with_seed_clique(&g, fast_config(), &[0, 9]).unwrap_err();
        assert!(matches!(err, CliqueError::VertexOutOfRange { vertex: 9, .. }));
        let err = SaRunner::with_seed_clique(&g, fast_config(), &[1, 1]).unwrap_err();
        assert!(matches!(err, CliqueError::DuplicateVertex(1)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let g = path4();
        assert!(SaRunner::new(&g, SaConfig::new(1.0, 2.0, 0.9, 1)).is_err());
    }

    #[test]
    fn test_state_transition_involution() {
        let g = complete(7);
        let mut runner = SaRunner::new(&g, fast_config()).unwrap();
        let before = runner.permutation().to_vec();
        for (u, w) in [(0, 6), (0, 1), (3, 3), (2, 5)] {
            runner.perform_state_transition(u, w);
            runner.perform_state_transition(u, w);
            assert_eq!(runner.permutation(), before.as_slice());
        }
    }

    #[test]
    fn test_objective_counts_non_edges() {
        let g = path4();
        // Window of the whole path: 6 pairs, 3 edges.
        let config = fast_config().with_initial_clique_size(4);
        let runner = SaRunner::new(&g, config).unwrap();
        assert_eq!(runner.objective(), 3);

        let config = fast_config().with_initial_clique_size(2);
        let a = g.index_of_label(1).unwrap();
        let b = g.index_of_label(2).unwrap();
        let runner = SaRunner::with_seed_clique(&g, config, &[a, b]).unwrap();
        assert_eq!(runner.objective(), 0);
        assert_eq!(runner.partial_objective(0), 1);
    }

    #[test]
    fn test_partial_objective_for_pool_vertex() {
        let g = complete(5);
        let config = fast_config().with_initial_clique_size(3);
        let runner = SaRunner::new(&g, config).unwrap();
        // Pool vertices see every window member; window members see m - 1.
        assert_eq!(runner.partial_objective(4), 3);
        assert_eq!(runner.partial_objective(0), 2);
    }

    #[test]
    fn test_select_vertices_ranges() {
        let g = path4();
        let config = fast_config().with_initial_clique_size(2);
        let mut runner = SaRunner::new(&g, config).unwrap();
        for _ in 0..100 {
            let (u, w) = runner.select_vertices();
            assert!(u < 2);
            assert!((2..4).contains(&w));
        }
    }

    #[test]
    fn test_select_vertices_falls_back_after_limit() {
        // One edge plus isolated vertices, window = the edge: every window
        // vertex has one window neighbor and every pool vertex has none, so
        // no sampled pair ever passes the test and the 8n limit decides.
        let g = Graph::from_edges(5, &[(0, 1)]).unwrap();
        let a = g.index_of_label(1).unwrap();
        let b = g.index_of_label(2).unwrap();
        let config = fast_config().with_initial_clique_size(2);
        let mut runner = SaRunner::with_seed_clique(&g, config, &[a, b]).unwrap();

        for u in 0..2 {
            for w in 2..5 {
                assert!(runner.partial_objective(u) > runner.partial_objective(w));
            }
        }

        for _ in 0..50 {
            let (u, w) = runner.select_vertices();
            assert!(u < 2, "window index {u} out of range");
            assert!((2..5).contains(&w), "pool index {w} out of range");
        }
        assert_eq!(&runner.permutation()[..2], &[a, b]);
    }

    #[test]
    fn test_accept_new_state() {
        let g = path4();
        let mut runner = SaRunner::new(&g, fast_config()).unwrap();
        assert!(runner.accept_new_state(0.0));
        assert!(runner.accept_new_state(-3.0));

        runner.temperature = 1e-9;
        for _ in 0..100 {
            assert!(!runner.accept_new_state(1.0));
        }
    }

    #[test]
    fn test_maximum_clique_restarts_from_initial_temperature() {
        // Window = two non-adjacent path vertices. A run that kept the cold
        // temperature would stop at once without moving.
        let g = path4();
        let a = g.index_of_label(1).unwrap();
        let b = g.index_of_label(3).unwrap();
        let config = fast_config().with_initial_clique_size(2);
        let mut runner = SaRunner::with_seed_clique(&g, config, &[a, b]).unwrap();
        assert_eq!(runner.objective(), 1);

        runner.temperature = 1e-9;
        let clique = runner.maximum_clique().expect("full schedule finds an edge");
        assert_eq!(clique.len(), 2);
        assert!(g.is_clique(&clique));
    }

    #[test]
    fn test_accept_rate_follows_metropolis() {
        let g = path4();
        let mut runner = SaRunner::new(&g, fast_config()).unwrap();
        runner.temperature = 1.0;

        let trials = 10_000;
        let accepted = (0..trials).filter(|_| runner.accept_new_state(1.0)).count();
        let rate = accepted as f64 / trials as f64;
        let expected = (-1.0f64).exp();
        assert!(
            (rate - expected).abs() < 0.03,
            "acceptance rate {rate:.4}, expected about {expected:.4}"
        );
    }

    #[test]
    fn test_maximum_clique_full_window() {
        let g = complete(3);
        let config = fast_config().with_initial_clique_size(3);
        let mut runner = SaRunner::new(&g, config).unwrap();
        let clique = runner.maximum_clique().unwrap();
        assert_eq!(clique.len(), 3);
        assert_eq!(runner.last_clique(), Some(clique.as_slice()));

        let g = path4();
        let config = fast_config().with_initial_clique_size(4);
        let mut runner = SaRunner::new(&g, config).unwrap();
        assert!(runner.maximum_clique().is_none());
    }

    #[test]
    fn test_permutation_invariant_after_run() {
        let g = Graph::from_edges(
            9,
            &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 5), (3, 5), (6, 7), (7, 8)],
        )
        .unwrap();
        let mut runner = SaRunner::new(&g, fast_config()).unwrap();
        let result = runner.run();
        assert!(is_permutation(runner.permutation(), 9));
        assert!(g.is_clique(&result.clique));
        assert_eq!(result.size, 3);
    }

    #[test]
    fn test_target_capped_at_vertex_count() {
        let g = complete(3);
        let config = fast_config().with_initial_clique_size(10);
        let runner = SaRunner::new(&g, config).unwrap();
        assert_eq!(runner.target_size(), 3);
        assert_eq!(runner.vertex_degrees(), &[2, 2, 2]);
    }
}
