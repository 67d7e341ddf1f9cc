//! SA configuration and cooling schedules.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cooling schedule for temperature reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from `initial_temperature` down to `min_temperature`
    /// over `max_iterations / iterations_per_temperature` steps.
    ///
    /// Requires a non-zero `max_iterations`.
    Linear,
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.995 }
    }
}

/// Configuration for the Simulated Annealing loop.
///
/// The run stops at whichever bound triggers first: the iteration budget
/// (when non-zero) or the temperature dropping to `min_temperature`.
///
/// # Examples
///
/// ```
/// use u_tourgame::sa::{CoolingSchedule, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10_000.0)
///     .with_min_temperature(1e-8)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.995 })
///     .with_max_iterations(100_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature floor. Must be positive; the loop exits once the
    /// temperature is no longer above it.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of neighbor evaluations between two cooling steps.
    pub iterations_per_temperature: usize,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            min_temperature: 1e-8,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 1,
            max_iterations: 100_000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err(Error::invalid_config(
                "initial_temperature must be positive and finite",
            ));
        }
        if !(self.min_temperature > 0.0) {
            return Err(Error::invalid_config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(Error::invalid_config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::invalid_config(
                "iterations_per_temperature must be at least 1",
            ));
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(Error::invalid_config(format!(
                        "geometric alpha must be in (0, 1), got {alpha}"
                    )));
                }
            }
            CoolingSchedule::Linear => {
                if self.max_iterations == 0 {
                    return Err(Error::invalid_config(
                        "linear cooling needs a non-zero max_iterations",
                    ));
                }
            }
        }
        Ok(())
    }
}
