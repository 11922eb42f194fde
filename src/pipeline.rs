//! GA → SA → TS chaining.
//!
//! Each execution runs the three searches in sequence on the same graph:
//! the GA clique seeds the SA permutation, and the SA clique is the TS
//! starting solution. The best TS result over all executions is kept.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::error::{CliqueError, CliqueResult};
use crate::ga::{GaConfig, GaRunner};
use crate::graph::Graph;
use crate::sa::{SaConfig, SaRunner};
use crate::tabu::{TabuConfig, TabuRunner};

/// Parameters for all three stages plus the number of executions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    pub ga: GaConfig,
    pub sa: SaConfig,
    pub tabu: TabuConfig,
    /// Number of independent GA → SA → TS executions.
    pub executions: usize,
}

impl PipelineConfig {
    /// One execution with the given stage configurations.
    pub fn new(ga: GaConfig, sa: SaConfig, tabu: TabuConfig) -> Self {
        Self {
            ga,
            sa,
            tabu,
            executions: 1,
        }
    }

    /// GA(100, 0.9, 0.1, 100), SA(100.0, 0.001, 0.9995, target 34),
    /// TS(10, 100), repeated 20 times.
    pub fn reference() -> Self {
        Self {
            ga: GaConfig::reference(),
            sa: SaConfig::reference().with_initial_clique_size(34),
            tabu: TabuConfig::reference(),
            executions: 20,
        }
    }

    pub fn with_executions(mut self, executions: usize) -> Self {
        self.executions = executions;
        self
    }

    /// Seeds every stage. Execution `i` uses `seed + i`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.ga.seed = Some(seed);
        self.sa.seed = Some(seed);
        self
    }

    /// Validates the stage configurations and the execution count.
    pub fn validate(&self) -> CliqueResult<()> {
        self.ga.validate()?;
        self.sa.validate()?;
        self.tabu.validate()?;
        if self.executions == 0 {
            return Err(CliqueError::Config("executions must be at least 1".into()));
        }
        Ok(())
    }

    fn for_execution(&self, execution: usize) -> (GaConfig, SaConfig) {
        let offset = execution as u64;
        let mut ga = self.ga.clone();
        ga.seed = ga.seed.map(|s| s.wrapping_add(offset));
        let mut sa = self.sa.clone();
        sa.seed = sa.seed.map(|s| s.wrapping_add(offset));
        (ga, sa)
    }
}

/// Clique sizes reached by each stage of one execution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionReport {
    pub ga_size: usize,
    pub sa_size: usize,
    pub tabu_size: usize,
    /// Wall time of the whole execution.
    pub elapsed: Duration,
}

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineResult {
    /// Best clique over all executions, as graph indices.
    pub clique: Vec<usize>,
    /// The same clique as original 1-based labels.
    pub labels: Vec<usize>,
    pub size: usize,
    /// Execution that produced `clique`.
    pub best_execution: usize,
    pub executions: Vec<ExecutionReport>,
    pub mean_elapsed: Duration,
}

/// Runs the chained searches.
///
/// # Examples
///
/// ```
/// use clique_metaheur::ga::GaConfig;
/// use clique_metaheur::graph::Graph;
/// use clique_metaheur::pipeline::{Pipeline, PipelineConfig};
/// use clique_metaheur::sa::SaConfig;
/// use clique_metaheur::tabu::TabuConfig;
///
/// let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
/// let config = PipelineConfig::new(
///     GaConfig::new(10, 0.9, 0.1, 10),
///     SaConfig::new(10.0, 0.01, 0.99, 2),
///     TabuConfig::new(5, 20),
/// )
/// .with_executions(2)
/// .with_seed(1);
/// let result = Pipeline::run(&graph, &config).unwrap();
/// assert_eq!(result.size, 3);
/// ```
pub struct Pipeline;

impl Pipeline {
    /// Runs `config.executions` executions and keeps the largest clique;
    /// the earliest execution wins ties.
    #[instrument(skip_all, fields(vertices = graph.number_of_vertices(), executions = config.executions))]
    pub fn run(graph: &Graph, config: &PipelineConfig) -> CliqueResult<PipelineResult> {
        config.validate()?;

        let mut reports = Vec::with_capacity(config.executions);
        let mut best: Vec<usize> = Vec::new();
        let mut best_execution = 0;

        for execution in 0..config.executions {
            let (clique, report) = Self::run_once(graph, config, execution)?;
            debug!(
                execution,
                ga = report.ga_size,
                sa = report.sa_size,
                tabu = report.tabu_size,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "execution finished"
            );
            if execution == 0 || clique.len() > best.len() {
                best = clique;
                best_execution = execution;
            }
            reports.push(report);
        }

        let total: Duration = reports.iter().map(|r| r.elapsed).sum();
        let mean_elapsed = total / reports.len() as u32;
        info!(
            size = best.len(),
            best_execution,
            mean_elapsed_ms = mean_elapsed.as_millis() as u64,
            "pipeline finished"
        );

        Ok(PipelineResult {
            labels: graph.labels_of(&best),
            size: best.len(),
            clique: best,
            best_execution,
            executions: reports,
            mean_elapsed,
        })
    }

    /// A single GA → SA → TS execution; `execution` offsets the seeds.
    pub fn run_once(
        graph: &Graph,
        config: &PipelineConfig,
        execution: usize,
    ) -> CliqueResult<(Vec<usize>, ExecutionReport)> {
        let start = Instant::now();
        let (ga_config, sa_config) = config.for_execution(execution);

        let ga = GaRunner::new(graph, ga_config)?.run();
        let sa = SaRunner::with_seed_clique(graph, sa_config, &ga.clique)?.run();
        let tabu = TabuRunner::new(graph, &sa.clique, config.tabu.clone())?.run();

        let report = ExecutionReport {
            ga_size: ga.size,
            sa_size: sa.size,
            tabu_size: tabu.size,
            elapsed: start.elapsed(),
        };
        Ok((tabu.clique, report))
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

    fn small_config() -> PipelineConfig {
        PipelineConfig::new(
            GaConfig::new(10, 0.9, 0.2, 10),
            SaConfig::new(10.0, 0.01, 0.99, 1),
            TabuConfig::new(5, 30),
        )
        .with_seed(9)
    }

    #[test]
    fn test_reference_config() {
        let config = PipelineConfig::reference();
        assert_eq!(config.executions, 20);
        assert_eq!(config.ga, GaConfig::reference());
        assert_eq!(config.sa.initial_clique_size, 34);
        assert_eq!(config.tabu, TabuConfig::new(10, 100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_offset_per_execution() {
        let config = small_config();
        let (ga, sa) = config.for_execution(3);
        assert_eq!(ga.seed, Some(12));
        assert_eq!(sa.seed, Some(12));

        let unseeded = PipelineConfig::reference();
        let (ga, _) = unseeded.for_execution(3);
        assert!(ga.seed.is_none());
    }

    #[test]
    fn test_zero_executions_rejected() {
        let config = small_config().with_executions(0);
        assert!(matches!(config.validate(), Err(CliqueError::Config(_))));
    }

    #[test]
    fn test_complete_graph() {
        let g = complete(5);
        let result = Pipeline::run(&g, &small_config().with_executions(3)).unwrap();
        assert_eq!(result.size, 5);
        assert_eq!(result.executions.len(), 3);
        let mut labels = result.labels.clone();
        labels.sort_unstable();
        assert_eq!(labels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_stages_never_shrink() {
        let g = Graph::from_edges(
            8,
            &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 5), (3, 5), (3, 6), (4, 6), (5, 6), (6, 7)],
        )
        .unwrap();
        let result = Pipeline::run(&g, &small_config().with_executions(4)).unwrap();
        for report in &result.executions {
            assert!(report.sa_size >= report.ga_size);
            assert!(report.tabu_size >= report.sa_size);
        }
        assert!(g.is_clique(&result.clique));
        assert_eq!(result.size, 4);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let g = complete(6);
        let a = Pipeline::run(&g, &small_config().with_executions(2)).unwrap();
        let b = Pipeline::run(&g, &small_config().with_executions(2)).unwrap();
        assert_eq!(a.clique, b.clique);
        assert_eq!(a.best_execution, b.best_execution);
    }
}
