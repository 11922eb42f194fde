//! Tabu Search configuration.

use crate::error::{CliqueError, CliqueResult};

/// Configuration parameters for clique Tabu Search.
///
/// # Examples
///
/// ```
/// use clique_metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::new(10, 100);
/// assert_eq!(config.max_tabu_size, 10);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// How many recently visited solutions stay forbidden.
    pub max_tabu_size: usize,
    /// Maximum number of iterations.
    pub max_iterations: usize,
}

impl TabuConfig {
    pub fn new(max_tabu_size: usize, max_iterations: usize) -> Self {
        Self {
            max_tabu_size,
            max_iterations,
        }
    }

    /// Parameters used by the reference GA → SA → TS driver: a tabu list
    /// of 10 solutions and 100 iterations.
    pub fn reference() -> Self {
        Self::new(10, 100)
    }

    /// Sets the tabu list capacity.
    pub fn with_max_tabu_size(mut self, n: usize) -> Self {
        self.max_tabu_size = n;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliqueResult<()> {
        if self.max_tabu_size == 0 {
            return Err(CliqueError::Config(
                "max_tabu_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
