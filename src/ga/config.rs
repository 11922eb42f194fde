//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{CliqueError, CliqueResult};

/// Configuration for the clique Genetic Algorithm.
///
/// The four search parameters have no defaults and must be chosen by the
/// caller; [`GaConfig::reference`] provides a known-good starting point.
///
/// # Examples
///
/// ```
/// use clique_metaheur::ga::GaConfig;
///
/// let config = GaConfig::new(100, 0.9, 0.1, 100)
///     .with_parallel(false)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals kept after each generation.
    pub population_size: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are cloned.
    pub crossover_probability: f64,

    /// Probability of flipping one bit of each child (0.0–1.0).
    pub mutation_probability: f64,

    /// Number of generations to run.
    pub generations: usize,

    /// Whether to build the initial population and evaluate fitness in
    /// parallel using rayon.
    ///
    /// Results are identical either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Creates a configuration with parallel evaluation and a random seed.
    pub fn new(
        population_size: usize,
        crossover_probability: f64,
        mutation_probability: f64,
        generations: usize,
    ) -> Self {
        Self {
            population_size,
            crossover_probability,
            mutation_probability,
            generations,
            parallel: true,
            seed: None,
        }
    }

    /// Parameters used by the reference GA → SA → TS driver.
    ///
    /// - Population: 100, Generations: 100
    /// - Crossover: 0.9, Mutation: 0.1
    pub fn reference() -> Self {
        Self::new(100, 0.9, 0.1, 100)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Probabilities are not clamped; out-of-range values are rejected.
    pub fn validate(&self) -> CliqueResult<()> {
        if self.population_size == 0 {
            return Err(CliqueError::Config(
                "population_size must be at least 1".into(),
            ));
        }
        for (name, p) in [
            ("crossover_probability", self.crossover_probability),
            ("mutation_probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CliqueError::Config(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = GaConfig::new(50, 0.8, 0.2, 30);
        assert_eq!(config.population_size, 50);
        assert!((config.crossover_probability - 0.8).abs() < 1e-10);
        assert!((config.mutation_probability - 0.2).abs() < 1e-10);
        assert_eq!(config.generations, 30);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_reference_preset() {
        let config = GaConfig::reference();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert!((config.crossover_probability - 0.9).abs() < 1e-10);
        assert!((config.mutation_probability - 0.1).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::reference()
            .with_population_size(20)
            .with_crossover_probability(0.5)
            .with_mutation_probability(0.05)
            .with_generations(7)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 20);
        assert!((config.crossover_probability - 0.5).abs() < 1e-10);
        assert!((config.mutation_probability - 0.05).abs() < 1e-10);
        assert_eq!(config.generations, 7);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_population_zero() {
        let config = GaConfig::reference().with_population_size(0);
        assert!(matches!(config.validate(), Err(CliqueError::Config(_))));
    }

    #[test]
    fn test_validate_probability_range() {
        assert!(GaConfig::reference()
            .with_crossover_probability(1.5)
            .validate()
            .is_err());
        assert!(GaConfig::reference()
            .with_mutation_probability(-0.1)
            .validate()
            .is_err());
        assert!(GaConfig::reference()
            .with_mutation_probability(f64::NAN)
            .validate()
            .is_err());
        assert!(GaConfig::new(1, 0.0, 1.0, 0).validate().is_ok());
    }
}
