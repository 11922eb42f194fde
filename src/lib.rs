//! Maximum clique search with metaheuristics.
//!
//! Finds large cliques in undirected graphs with three independent
//! searches that can run standalone or be chained:
//!
//! - **Genetic Algorithm (GA)**: bit-set individuals, one-point crossover,
//!   single-bit mutation, and a greedy repair that turns every individual
//!   back into a clique.
//! - **Simulated Annealing (SA)**: a permutation whose leading window is
//!   annealed toward zero missing edges, with iterative deepening of the
//!   window size.
//! - **Tabu Search (TS)**: add/remove moves over explicit vertex sets with
//!   a bounded list of recently visited solutions.
//!
//! All three borrow a shared, degree-sorted [`graph::Graph`].
//! [`pipeline::Pipeline`] chains them GA → SA → TS.
//!
//! # Example
//!
//! ```
//! use clique_metaheur::ga::{GaConfig, GaRunner};
//! use clique_metaheur::graph::Graph;
//! use clique_metaheur::tabu::{TabuConfig, TabuRunner};
//!
//! let text = "c triangle with a tail\np edge 4 4\ne 1 2\ne 2 3\ne 1 3\ne 3 4\n";
//! let graph: Graph = text.parse().unwrap();
//!
//! let ga = GaRunner::new(&graph, GaConfig::new(10, 0.9, 0.1, 10).with_seed(3))
//!     .unwrap()
//!     .run();
//! let ts = TabuRunner::new(&graph, &ga.clique, TabuConfig::new(5, 20))
//!     .unwrap()
//!     .run();
//! assert_eq!(ts.size, 3);
//! ```

pub mod error;
pub mod ga;
pub mod graph;
pub mod pipeline;
pub mod sa;
pub mod tabu;

pub use error::{CliqueError, CliqueResult};
