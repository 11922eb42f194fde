//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from a caller-supplied clique
//! 2. At each iteration:
//!    a. Generate every clique reachable by adding or removing one vertex,
//!       skipping solutions in the tabu list (adds that beat the best
//!       size so far are allowed anyway)
//!    b. Move to the largest neighbor, even if it is smaller
//!    c. Push the new solution onto the tabu list
//!    d. Update the global best if improved
//! 3. Terminate after max iterations or on an empty neighborhood
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, instrument};

use super::config::TabuConfig;
use crate::error::{CliqueError, CliqueResult};
use crate::graph::Graph;

/// Result of a Tabu Search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuResult {
    /// Best clique found, ascending.
    pub clique: Vec<usize>,
    /// Size of `clique`.
    pub size: usize,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best clique was found (0 = the start).
    pub best_iteration: usize,
    /// Best size after each iteration.
    pub size_history: Vec<usize>,
}

/// Tabu Search over explicit vertex sets.
///
/// Solutions are kept sorted so that two solutions with the same vertices
/// compare equal in the tabu list.
///
/// # Examples
///
/// ```
/// use clique_metaheur::graph::Graph;
/// use clique_metaheur::tabu::{TabuConfig, TabuRunner};
///
/// let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
/// let mut runner = TabuRunner::new(&graph, &[], TabuConfig::new(5, 20)).unwrap();
/// let result = runner.run();
/// assert_eq!(result.size, 3);
/// assert_eq!(runner.best_clique_size(), 3);
/// ```
#[derive(Debug)]
pub struct TabuRunner<'g> {
    graph: &'g Graph,
    config: TabuConfig,
    initial: Vec<usize>,
    tabu_list: VecDeque<Vec<usize>>,
    best: Vec<usize>,
}

impl<'g> TabuRunner<'g> {
    /// Creates a runner starting from `initial`.
    ///
    /// Fails if `initial` names a vertex outside the graph, repeats a
    /// vertex, or is not a clique.
    pub fn new(graph: &'g Graph, initial: &[usize], config: TabuConfig) -> CliqueResult<Self> {
        config.validate()?;
        let n = graph.number_of_vertices();
        let mut seen = HashSet::with_capacity(initial.len());
        for &v in initial {
            if v >= n {
                return Err(CliqueError::VertexOutOfRange { vertex: v, vertices: n });
            }
            if !seen.insert(v) {
                return Err(CliqueError::DuplicateVertex(v));
            }
        }
        if !graph.is_clique(initial) {
            return Err(CliqueError::NotAClique);
        }

        let mut initial = initial.to_vec();
        initial.sort_unstable();
        Ok(Self {
            graph,
            config,
            best: initial.clone(),
            initial,
            tabu_list: VecDeque::new(),
        })
    }

    /// Size of the best clique found so far (the start before [`run`](Self::run)).
    pub fn best_clique_size(&self) -> usize {
        self.best.len()
    }

    /// Best clique found so far.
    pub fn best_clique(&self) -> &[usize] {
        &self.best
    }

    /// Recently visited solutions, oldest first.
    pub fn tabu_list(&self) -> &VecDeque<Vec<usize>> {
        &self.tabu_list
    }

    pub fn is_clique(&self, solution: &[usize]) -> bool {
        self.graph.is_clique(solution)
    }

    /// Clique size.
    ///
    /// # Panics
    /// Panics if `solution` is not a clique.
    pub fn objective(&self, solution: &[usize]) -> usize {
        assert!(
            self.graph.is_clique(solution),
            "objective evaluated on a non-clique solution"
        );
        solution.len()
    }

    fn is_tabu(&self, solution: &[usize]) -> bool {
        self.tabu_list.iter().any(|s| s.as_slice() == solution)
    }

    /// All admissible add and remove moves from `solution`.
    ///
    /// `solution` must be sorted; every neighbor is sorted as well. Add
    /// moves come first, in ascending order of the added vertex.
    pub fn generate_neighborhood(&self, solution: &[usize]) -> Vec<Vec<usize>> {
        let mut neighborhood = Vec::new();

        for v in 0..self.graph.number_of_vertices() {
            let Err(pos) = solution.binary_search(&v) else {
                continue;
            };
            if !solution.iter().all(|&u| self.graph.is_edge(u, v)) {
                continue;
            }
            let mut candidate = Vec::with_capacity(solution.len() + 1);
            candidate.extend_from_slice(&solution[..pos]);
            candidate.push(v);
            candidate.extend_from_slice(&solution[pos..]);
            if !self.is_tabu(&candidate) || candidate.len() > self.best.len() {
                neighborhood.push(candidate);
            }
        }

        for i in 0..solution.len() {
            let mut candidate = solution.to_vec();
            candidate.remove(i);
            if !self.is_tabu(&candidate) {
                neighborhood.push(candidate);
            }
        }

        neighborhood
    }

    /// Index of the largest neighbor; the first one wins ties.
    ///
    /// Returns `None` for an empty neighborhood.
    pub fn select_best_neighbor(&self, neighborhood: &[Vec<usize>]) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, s) in neighborhood.iter().enumerate() {
            let value = self.objective(s);
            if best.is_none_or(|(_, b)| value > b) {
                best = Some((i, value));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Runs the search from the initial solution.
    ///
    /// The tabu list and the best clique are reset first, so repeated calls
    /// give the same result.
    #[instrument(skip_all, fields(start = self.initial.len(), max_iterations = self.config.max_iterations))]
    pub fn run(&mut self) -> TabuResult {
        self.tabu_list.clear();
        self.best = self.initial.clone();

        let mut current = self.initial.clone();
        let mut best_iteration = 0;
        let mut size_history = Vec::with_capacity(self.config.max_iterations);

        for iteration in 1..=self.config.max_iterations {
            let mut neighborhood = self.generate_neighborhood(&current);
            let Some(index) = self.select_best_neighbor(&neighborhood) else {
                debug!(iteration, "empty neighborhood");
                break;
            };
            current = neighborhood.swap_remove(index);

            if current.len() > self.best.len() {
                self.best = current.clone();
                best_iteration = iteration;
                debug!(iteration, size = self.best.len(), "tabu improved");
            }

            self.tabu_list.push_back(current.clone());
            while self.tabu_list.len() > self.config.max_tabu_size {
                self.tabu_list.pop_front();
            }

            size_history.push(self.best.len());
        }

        info!(
            size = self.best.len(),
            iterations = size_history.len(),
            best_iteration,
            "tabu finished"
        );

        TabuResult {
            clique: self.best.clone(),
            size: self.best.len(),
            iterations: size_history.len(),
            best_iteration,
            size_history,
        }
    }
}
