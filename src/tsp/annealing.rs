//! Simulated annealing solver for the TSP.

use super::distance::{DistanceModel, Route};
use super::problem::{StartPolicy, TspProblem};
use crate::error::{Error, Result};
use crate::sa::{SaConfig, SaResult, SaRunner};
use rand::Rng;

/// Best tour found by an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingOutcome {
    stats: SaResult<Route>,
}

impl AnnealingOutcome {
    /// Best route seen during the run.
    pub fn route(&self) -> &[usize] {
        &self.stats.best
    }

    /// Cost of [`route`](Self::route).
    pub fn cost(&self) -> f64 {
        self.stats.best_cost
    }

    /// Cost of the start route.
    pub fn initial_cost(&self) -> f64 {
        self.stats.initial_cost
    }

    /// Full run statistics.
    pub fn stats(&self) -> &SaResult<Route> {
        &self.stats
    }

    pub fn into_route(self) -> Route {
        self.stats.best
    }
}

impl From<SaResult<Route>> for AnnealingOutcome {
    fn from(stats: SaResult<Route>) -> Self {
        Self { stats }
    }
}

/// Minimizes tour cost with swap-neighborhood simulated annealing.
///
/// Defaults follow the classic textbook setup: start temperature 10 000,
/// geometric cooling at 0.995 per iteration, a 1e-8 floor, at most
/// 100 000 iterations, and the route anchored at location 0.
///
/// # Examples
///
/// ```
/// use u_tourgame::tsp::{sample, AnnealingSolver};
///
/// let model = sample::namibian_towns().unwrap();
/// let outcome = AnnealingSolver::default().with_seed(42).solve(&model).unwrap();
/// assert_eq!(outcome.route()[0], 0);
/// assert!(outcome.cost() <= outcome.initial_cost());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnealingSolver {
    config: SaConfig,
    start: StartPolicy,
}

impl AnnealingSolver {
    pub fn new(config: SaConfig, start: StartPolicy) -> Self {
        Self { config, start }
    }

    pub fn with_config(mut self, config: SaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_start(mut self, start: StartPolicy) -> Self {
        self.start = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    pub fn start(&self) -> StartPolicy {
        self.start
    }

    /// Runs one annealing pass seeded from the configuration.
    pub fn solve(&self, model: &DistanceModel) -> Result<AnnealingOutcome> {
        let problem = self.problem(model)?;
        SaRunner::run(&problem, &self.config).map(Into::into)
    }

    /// Runs one annealing pass drawing randomness from `rng`.
    pub fn solve_with_rng<R: Rng>(
        &self,
        model: &DistanceModel,
        rng: &mut R,
    ) -> Result<AnnealingOutcome> {
        let problem = self.problem(model)?;
        SaRunner::run_with_rng(&problem, &self.config, rng).map(Into::into)
    }

    /// Runs `restarts` independent passes and keeps the cheapest tour.
    pub fn solve_restarts(&self, model: &DistanceModel, restarts: usize) -> Result<AnnealingOutcome> {
        let problem = self.problem(model)?;
        SaRunner::run_restarts(&problem, &self.config, restarts).map(Into::into)
    }

    fn problem<'a>(&self, model: &'a DistanceModel) -> Result<TspProblem<'a>> {
        if let StartPolicy::Anchored(anchor) = self.start {
            if anchor >= model.len() {
                return Err(Error::invalid_route(format!("unknown anchor location {anchor}")));
            }
        }
        Ok(TspProblem::new(model, self.start))
    }
}
