//! Traveling Salesperson Problem over a fixed distance matrix.
//!
//! [`DistanceModel`] evaluates cyclic tours. [`AnnealingSolver`] searches
//! for a cheap tour with simulated annealing on top of [`crate::sa`];
//! [`BruteForceSolver`] finds the exact optimum of small instances and
//! serves as the correctness oracle for the annealer.

mod annealing;
mod brute_force;
mod distance;
mod problem;
pub mod sample;

pub use annealing::{AnnealingOutcome, AnnealingSolver};
pub use brute_force::{BruteForceResult, BruteForceSolver, DEFAULT_MAX_LOCATIONS};
pub use distance::{DistanceModel, Route};
pub use problem::{StartPolicy, TspProblem};
