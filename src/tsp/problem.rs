//! TSP as an annealing problem: swap neighborhood over routes.

use super::distance::{DistanceModel, Route};
use crate::sa::SaProblem;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the start route is built and which positions moves may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StartPolicy {
    /// Uniformly random permutation of all locations; every position is
    /// movable.
    Shuffled,
    /// The given location is pinned at position 0, followed by a random
    /// permutation of the rest. Position 0 is never swapped.
    Anchored(usize),
}

impl Default for StartPolicy {
    fn default() -> Self {
        StartPolicy::Anchored(0)
    }
}

/// Route optimization over a [`DistanceModel`].
///
/// Neighbors differ from their parent by one transposition of two distinct
/// movable positions.
#[derive(Debug, Clone, Copy)]
pub struct TspProblem<'a> {
    model: &'a DistanceModel,
    start: StartPolicy,
}

impl<'a> TspProblem<'a> {
    /// The anchor in `start` must be a valid index of `model`; callers
    /// validate it first (see [`AnnealingSolver`](super::AnnealingSolver)).
    pub fn new(model: &'a DistanceModel, start: StartPolicy) -> Self {
        Self { model, start }
    }

    /// First position that swaps may touch.
    fn first_movable(&self) -> usize {
        match self.start {
            StartPolicy::Shuffled => 0,
            StartPolicy::Anchored(_) => 1,
        }
    }
}

impl SaProblem for TspProblem<'_> {
    type Solution = Route;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Route {
        let n = self.model.len();
        match self.start {
            StartPolicy::Shuffled => {
                let mut route: Route = (0..n).collect();
                route.shuffle(rng);
                route
            }
            StartPolicy::Anchored(anchor) => {
                let mut route = Vec::with_capacity(n);
                route.push(anchor);
                route.extend((0..n).filter(|&i| i != anchor));
                route[1..].shuffle(rng);
                route
            }
        }
    }

    fn cost(&self, route: &Route) -> f64 {
        self.model.tour_length(route)
    }

    fn neighbor<R: Rng>(&self, route: &Route, rng: &mut R) -> Route {
        let mut next = route.clone();
        let lo = self.first_movable();
        let movable = route.len().saturating_sub(lo);
        if movable < 2 {
            return next;
        }
        // Two distinct positions, uniformly.
        let a = rng.random_range(0..movable);
        let mut b = rng.random_range(0..movable - 1);
        if b >= a {
            b += 1;
        }
        next.swap(lo + a, lo + b);
        next
    }
}
