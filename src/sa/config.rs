//! SA configuration.

use crate::error::{CliqueError, CliqueResult};

/// Configuration for clique Simulated Annealing.
///
/// Cooling is geometric: after every proposed move the temperature is
/// multiplied by `cooling_coefficient`. Each annealing run at a fixed
/// target size starts again from `initial_temperature`, so every deepening
/// step gets a full cooling schedule. Runs therefore take longer than a
/// schedule that keeps cooling across target sizes.
///
/// # Examples
///
/// ```
/// use clique_metaheur::sa::SaConfig;
///
/// let config = SaConfig::new(100.0, 0.001, 0.9995, 1).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Temperature at the start of each annealing run.
    pub initial_temperature: f64,

    /// A run stops once the temperature is no longer above this value.
    pub end_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_coefficient: f64,

    /// Clique size targeted by the first annealing run.
    ///
    /// Values below 1 are treated as 1 and values above the vertex count
    /// are capped to it.
    pub initial_clique_size: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl SaConfig {
    /// Creates a configuration with a random seed.
    pub fn new(
        initial_temperature: f64,
        end_temperature: f64,
        cooling_coefficient: f64,
        initial_clique_size: usize,
    ) -> Self {
        Self {
            initial_temperature,
            end_temperature,
            cooling_coefficient,
            initial_clique_size,
            seed: None,
        }
    }

    /// Schedule used by the reference GA → SA → TS driver:
    /// `T0 = 100`, `T_end = 0.001`, `alpha = 0.9995`, first target 1.
    pub fn reference() -> Self {
        Self::new(100.0, 0.001, 0.9995, 1)
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_end_temperature(mut self, t: f64) -> Self {
        self.end_temperature = t;
        self
    }

    pub fn with_cooling_coefficient(mut self, alpha: f64) -> Self {
        self.cooling_coefficient = alpha;
        self
    }

    pub fn with_initial_clique_size(mut self, m: usize) -> Self {
        self.initial_clique_size = m;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliqueResult<()> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err(CliqueError::Config(
                "initial_temperature must be positive and finite".into(),
            ));
        }
        if !(self.end_temperature > 0.0) {
            return Err(CliqueError::Config("end_temperature must be positive".into()));
        }
        if self.end_temperature >= self.initial_temperature {
            return Err(CliqueError::Config(
                "end_temperature must be less than initial_temperature".into(),
            ));
        }
        let alpha = self.cooling_coefficient;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(CliqueError::Config(format!(
                "cooling_coefficient must be in (0, 1), got {alpha}"
            )));
        }
        Ok(())
    }
}
