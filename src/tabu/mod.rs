//! Tabu Search (TS) for maximum clique.
//!
//! A single-solution trajectory search over explicit vertex sets. Each
//! move adds or removes one vertex while keeping the set a clique, and a
//! bounded FIFO list of recently visited solutions prevents cycling.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;

pub use config::TabuConfig;
pub use runner::{TabuResult, TabuRunner};
