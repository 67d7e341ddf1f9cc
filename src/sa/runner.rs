//! SA execution loop.
//!
//! A run moves through three phases: the start solution is built and
//! evaluated, neighbors are explored under the Metropolis criterion while
//! the temperature cools, and the run terminates at the iteration budget or
//! the temperature floor.

use super::config::{CoolingSchedule, SaConfig};
use super::types::SaProblem;
use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Why an annealing run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `max_iterations` neighbor evaluations were performed.
    IterationLimit,
    /// The temperature was no longer above `min_temperature`.
    TemperatureFloor,
}

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Cost of the start solution.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Which bound ended the run.
    pub termination: Termination,

    /// Best cost sampled at regular intervals. Non-increasing.
    pub cost_history: Vec<f64>,
}

/// Search state owned by a single run.
struct AnnealingState<S> {
    current: S,
    current_cost: f64,
    best: S,
    best_cost: f64,
    temperature: f64,
    iteration: usize,
    accepted_moves: usize,
    improving_moves: usize,
}

impl<S: Clone> AnnealingState<S> {
    fn initialize<P, R>(problem: &P, temperature: f64, rng: &mut R) -> Self
    where
        P: SaProblem<Solution = S>,
        R: Rng,
    {
        let current = problem.initial_solution(rng);
        let current_cost = problem.cost(&current);
        Self {
            best: current.clone(),
            best_cost: current_cost,
            current,
            current_cost,
            temperature,
            iteration: 0,
            accepted_moves: 0,
            improving_moves: 0,
        }
    }

    /// One neighbor evaluation under the Metropolis criterion.
    ///
    /// Callers guarantee `temperature > 0`.
    fn explore<P, R>(&mut self, problem: &P, rng: &mut R)
    where
        P: SaProblem<Solution = S>,
        R: Rng,
    {
        let candidate = problem.neighbor(&self.current, rng);
        let candidate_cost = problem.cost(&candidate);

        let accept = if candidate_cost < self.current_cost {
            self.improving_moves += 1;
            true
        } else {
            let probability = ((self.current_cost - candidate_cost) / self.temperature).exp();
            rng.random::<f64>() < probability
        };

        if accept {
            self.current = candidate;
            self.current_cost = candidate_cost;
            self.accepted_moves += 1;

            if self.current_cost < self.best_cost {
                trace!(
                    iteration = self.iteration,
                    cost = self.current_cost,
                    "new best"
                );
                self.best = self.current.clone();
                self.best_cost = self.current_cost;
            }
        }

        self.iteration += 1;
    }
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with a generator seeded from `config.seed` (or from entropy
    /// when no seed is set).
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs SA drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<P::Solution>> {
        config.validate()?;

        let mut state = AnnealingState::initialize(problem, config.initial_temperature, rng);
        let initial_cost = state.current_cost;
        debug!(
            initial_cost,
            temperature = config.initial_temperature,
            "annealing started"
        );

        let linear_max_steps = compute_linear_steps(config);
        let history_interval = 100.max(config.iterations_per_temperature);
        let mut cost_history = vec![state.best_cost];
        let mut step = 0usize;

        let termination = loop {
            if config.max_iterations > 0 && state.iteration >= config.max_iterations {
                break Termination::IterationLimit;
            }
            if state.temperature <= config.min_temperature {
                break Termination::TemperatureFloor;
            }

            state.explore(problem, rng);

            if state.iteration.is_multiple_of(history_interval) {
                cost_history.push(state.best_cost);
            }

            if state
                .iteration
                .is_multiple_of(config.iterations_per_temperature)
            {
                state.temperature = cool(state.temperature, config, step, linear_max_steps);
                step += 1;
            }
        };

        if cost_history
            .last()
            .is_none_or(|&last| (last - state.best_cost).abs() > 1e-15)
        {
            cost_history.push(state.best_cost);
        }

        debug!(
            best_cost = state.best_cost,
            iterations = state.iteration,
            accepted = state.accepted_moves,
            ?termination,
            "annealing finished"
        );

        Ok(SaResult {
            best: state.best,
            best_cost: state.best_cost,
            initial_cost,
            iterations: state.iteration,
            final_temperature: state.temperature,
            accepted_moves: state.accepted_moves,
            improving_moves: state.improving_moves,
            termination,
            cost_history,
        })
    }

    /// Runs `restarts` independent annealing runs and keeps the best.
    ///
    /// Restart `i` is seeded with `base.wrapping_add(i)`, where `base` is
    /// `config.seed` or a random value. With the `parallel` feature the
    /// restarts run on the rayon pool. Ties on best cost go to the lowest
    /// restart index, so the outcome does not depend on scheduling.
    pub fn run_restarts<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
        restarts: usize,
    ) -> Result<SaResult<P::Solution>> {
        if restarts == 0 {
            return Err(Error::invalid_config("restarts must be at least 1"));
        }
        config.validate()?;
        let base = config.seed.unwrap_or_else(rand::random);
        let run_one = |i: usize| {
            let seeded = config.clone().with_seed(base.wrapping_add(i as u64));
            Self::run(problem, &seeded)
        };

        #[cfg(feature = "parallel")]
        let results: Vec<SaResult<P::Solution>> = (0..restarts)
            .into_par_iter()
            .map(run_one)
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let results: Vec<SaResult<P::Solution>> =
            (0..restarts).map(run_one).collect::<Result<_>>()?;

        results
            .into_iter()
            .reduce(|best, next| if next.best_cost < best.best_cost { next } else { best })
            .ok_or_else(|| Error::invalid_config("restarts must be at least 1"))
    }
}

/// Apply the cooling schedule to compute the next temperature.
fn cool(temperature: f64, config: &SaConfig, step: usize, linear_max_steps: usize) -> f64 {
    match config.cooling {
        CoolingSchedule::Geometric { alpha } => temperature * alpha,

        CoolingSchedule::Linear => {
            let t = config.initial_temperature
                - (step + 1) as f64 * (config.initial_temperature - config.min_temperature)
                    / linear_max_steps as f64;
            t.max(config.min_temperature)
        }
    }
}

/// Number of temperature steps for linear cooling.
fn compute_linear_steps(config: &SaConfig) -> usize {
    match config.cooling {
        CoolingSchedule::Linear => (config.max_iterations / config.iterations_per_temperature).max(1),
        CoolingSchedule::Geometric { .. } => 0,
    }
}
