//! Genetic Algorithm for maximum clique.
//!
//! Individuals are bit-sets over the vertex indices of a [`Graph`](crate::graph::Graph).
//! Every individual that enters the population is first passed through the
//! greedy [`repair`] operator, so the whole population always consists of
//! valid cliques and fitness is simply the clique size.
//!
//! # Generation step
//!
//! 1. Parents are drawn uniformly with replacement from the population.
//! 2. Single-point [`crossover`](operators::crossover) with probability
//!    `crossover_probability`, otherwise the parents are cloned.
//! 3. Each child flips one random bit with probability `mutation_probability`.
//! 4. Children are repaired and appended until the pool holds twice the
//!    population size.
//! 5. The next population is chosen by tournaments of 3 without replacement.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, operator probabilities, generation count
//! - [`GaRunner`]: Owns the population and the random source, runs the loop
//! - [`GaResult`]: Best clique found with per-generation statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Marchiori (1998), "A Simple Heuristic Based Genetic Algorithm for the
//!   Maximum Clique Problem"

mod config;
mod individual;
pub mod operators;
pub mod repair;
mod runner;
pub mod selection;

pub use config::GaConfig;
pub use individual::Individual;
pub use runner::{fitness, GaResult, GaRunner};
