//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The implementor supplies the start solution, neighbor generation and
/// cost evaluation. [`SaRunner`](super::SaRunner) handles temperature
/// management, the Metropolis acceptance criterion and cooling.
///
/// SA minimizes the cost function. For maximization, negate the cost.
///
/// `Send + Sync` lets independent restarts share one problem across
/// threads.
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution.
    ///
    /// The neighbor should be a small perturbation, and the neighborhood
    /// must be connected (any solution reachable from any other via a
    /// sequence of moves).
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}
