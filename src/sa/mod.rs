//! Simulated Annealing (SA) for maximum clique.
//!
//! A single-solution trajectory search over a vertex permutation. The first
//! `m` positions are the candidate clique; annealing minimizes the number of
//! missing edges among them. Worsening swaps are accepted with a probability
//! that shrinks as the temperature cools, so the search can leave local
//! optima early on.
//!
//! An outer loop deepens the target: after a run reaches cost 0 the window
//! grows by one and annealing restarts, until a run fails.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{SaResult, SaRunner};
