//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → offspring → repair → tournament selection → repeat.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use super::config::GaConfig;
use super::individual::Individual;
use super::operators;
use super::repair::CliqueRepair;
use super::selection::{tournament_without_replacement, TOURNAMENT_SIZE};
use crate::error::CliqueResult;
use crate::graph::Graph;

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Vertices of the best clique in the final population, ascending.
    pub clique: Vec<usize>,

    /// Size of `clique`.
    pub size: usize,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness of the population after initialization and after each
    /// generation.
    pub fitness_history: Vec<usize>,
}

/// Clique size of a repaired individual.
///
/// # Panics
/// Panics if the selected vertices do not form a clique. Every individual
/// in the population is repaired, so this only fires if repair is broken.
pub fn fitness(graph: &Graph, individual: &Individual) -> usize {
    let vertices = individual.vertices();
    assert!(
        graph.is_clique(&vertices),
        "fitness evaluated on a non-clique individual {vertices:?}"
    );
    vertices.len()
}

/// Executes the clique GA.
///
/// The runner owns its population, its repair buffers and its random
/// source; the graph is borrowed read-only.
///
/// # Usage
///
/// ```
/// use clique_metaheur::ga::{GaConfig, GaRunner};
/// use clique_metaheur::graph::Graph;
///
/// let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
/// let config = GaConfig::new(20, 0.9, 0.1, 20).with_seed(42);
/// let result = GaRunner::new(&graph, config).unwrap().run();
/// assert_eq!(result.size, 3);
/// ```
#[derive(Debug)]
pub struct GaRunner<'g> {
    graph: &'g Graph,
    config: GaConfig,
    population: Vec<Individual>,
    repair: CliqueRepair,
    rng: StdRng,
}

impl<'g> GaRunner<'g> {
    /// Creates a runner after validating `config`.
    pub fn new(graph: &'g Graph, config: GaConfig) -> CliqueResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            graph,
            repair: CliqueRepair::new(graph.number_of_vertices()),
            population: Vec::with_capacity(2 * config.population_size),
            config,
            rng,
        })
    }

    /// The current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// A random repaired individual.
    pub fn random_individual(&mut self) -> Individual {
        let mut ind = operators::random_genes(self.graph.number_of_vertices(), &mut self.rng);
        self.repair.repair(self.graph, &mut ind);
        ind
    }

    /// Clique size of a repaired individual. See [`fitness`].
    pub fn fitness(&self, individual: &Individual) -> usize {
        fitness(self.graph, individual)
    }

    /// Pairwise edge check over `vertices`.
    pub fn is_clique(&self, vertices: &[usize]) -> bool {
        self.graph.is_clique(vertices)
    }

    /// Single-point crossover with a random cut.
    pub fn crossover(
        &mut self,
        parent1: &Individual,
        parent2: &Individual,
    ) -> (Individual, Individual) {
        operators::crossover(parent1, parent2, self.graph.number_of_vertices(), &mut self.rng)
    }

    /// Flips one random bit.
    pub fn mutate(&mut self, individual: &mut Individual) {
        operators::mutate(individual, self.graph.number_of_vertices(), &mut self.rng);
    }

    /// Greedy repair into a clique; returns the number of dropped vertices.
    pub fn repair_clique(&mut self, individual: &mut Individual) -> usize {
        self.repair.repair(self.graph, individual)
    }

    /// Replaces the population with `population_size` random repaired
    /// individuals.
    ///
    /// One seed per individual is drawn from the runner's RNG up front, so
    /// the parallel and sequential paths build the same population.
    pub fn initialize_population(&mut self) {
        let n = self.graph.number_of_vertices();
        let graph = self.graph;
        let seeds: Vec<u64> = (0..self.config.population_size)
            .map(|_| self.rng.random())
            .collect();

        let build = |repair: &mut CliqueRepair, seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ind = operators::random_genes(n, &mut rng);
            repair.repair(graph, &mut ind);
            ind
        };

        self.population = if self.config.parallel {
            seeds
                .par_iter()
                .map_init(|| CliqueRepair::new(n), |repair, &seed| build(repair, seed))
                .collect()
        } else {
            seeds
                .iter()
                .map(|&seed| build(&mut self.repair, seed))
                .collect()
        };
    }

    /// Appends repaired offspring to `pool` until it holds
    /// `2 * population_size` individuals.
    ///
    /// Parents are drawn uniformly with replacement from the current
    /// population.
    pub fn generate_offspring(&mut self, pool: &mut Vec<Individual>) {
        let target = 2 * self.config.population_size;
        let n = self.graph.number_of_vertices();
        let parents = self.population.len();
        if parents == 0 {
            return;
        }

        while pool.len() < target {
            let p1 = &self.population[self.rng.random_range(0..parents)];
            let p2 = &self.population[self.rng.random_range(0..parents)];

            let (mut child1, mut child2) =
                if self.rng.random_bool(self.config.crossover_probability) {
                    operators::crossover(p1, p2, n, &mut self.rng)
                } else {
                    (p1.clone(), p2.clone())
                };

            if self.rng.random_bool(self.config.mutation_probability) {
                operators::mutate(&mut child1, n, &mut self.rng);
            }
            if self.rng.random_bool(self.config.mutation_probability) {
                operators::mutate(&mut child2, n, &mut self.rng);
            }

            self.repair.repair(self.graph, &mut child1);
            self.repair.repair(self.graph, &mut child2);

            pool.push(child1);
            if pool.len() < target {
                pool.push(child2);
            }
        }
    }

    /// Fitness of every candidate, in order.
    fn evaluate(&self, candidates: &[Individual]) -> Vec<usize> {
        let graph = self.graph;
        if self.config.parallel {
            candidates.par_iter().map(|ind| fitness(graph, ind)).collect()
        } else {
            candidates.iter().map(|ind| fitness(graph, ind)).collect()
        }
    }

    /// Replaces the population with tournament winners from `candidates`.
    ///
    /// Returns the winning candidate indices in selection order.
    ///
    /// # Panics
    /// Panics if `candidates` holds fewer than `population_size` individuals.
    pub fn select_new_population(&mut self, candidates: Vec<Individual>) -> Vec<usize> {
        let fitnesses = self.evaluate(&candidates);
        let winners = tournament_without_replacement(
            &fitnesses,
            self.config.population_size,
            TOURNAMENT_SIZE,
            &mut self.rng,
        );

        let mut slots: Vec<Option<Individual>> = candidates.into_iter().map(Some).collect();
        self.population = winners
            .iter()
            .map(|&i| slots[i].take().expect("tournament winners are distinct"))
            .collect();
        winners
    }

    /// One generation: parents + offspring, then tournament selection.
    pub fn next_generation(&mut self) {
        let mut pool = Vec::with_capacity(2 * self.config.population_size);
        pool.extend(self.population.iter().cloned());
        self.generate_offspring(&mut pool);
        self.select_new_population(pool);
    }

    /// Index and fitness of the fittest individual; first-seen on ties.
    fn best(&self) -> Option<(usize, usize)> {
        self.evaluate(&self.population)
            .into_iter()
            .enumerate()
            .fold(None, |best, (i, f)| match best {
                Some((_, bf)) if bf >= f => best,
                _ => Some((i, f)),
            })
    }

    /// Runs the GA and returns the best clique of the final population.
    #[instrument(
        skip_all,
        fields(
            vertices = self.graph.number_of_vertices(),
            population = self.config.population_size,
            generations = self.config.generations
        )
    )]
    pub fn run(&mut self) -> GaResult {
        if self.graph.number_of_vertices() == 0 {
            return GaResult {
                clique: Vec::new(),
                size: 0,
                generations: 0,
                fitness_history: Vec::new(),
            };
        }

        self.initialize_population();

        let mut fitness_history = Vec::with_capacity(self.config.generations + 1);
        fitness_history.push(self.best().map_or(0, |(_, f)| f));

        for generation in 0..self.config.generations {
            if generation % 10 == 0 {
                debug!(
                    generation,
                    best = fitness_history.last().copied().unwrap_or(0),
                    "ga progress"
                );
            }
            self.next_generation();
            fitness_history.push(self.best().map_or(0, |(_, f)| f));
        }

        let clique = self
            .best()
            .map(|(i, _)| self.population[i].vertices())
            .unwrap_or_default();
        let size = clique.len();
        info!(size, "ga finished");

        GaResult {
            clique,
            size,
            generations: self.config.generations,
            fitness_history,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
