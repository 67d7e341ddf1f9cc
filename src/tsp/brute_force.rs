//! Exhaustive TSP baseline for small instances.
//!
//! Enumerates all `(n - 1)!` orderings of the locations behind a fixed
//! anchor. Ten locations means 362 880 tours; every extra location
//! multiplies the work by `n`, so the solver refuses instances above
//! [`BruteForceSolver::max_locations`].

use super::distance::{DistanceModel, Route};
use crate::error::{Error, Result};
use itertools::Itertools;
use tracing::{debug, warn};

/// Default refusal threshold.
pub const DEFAULT_MAX_LOCATIONS: usize = 10;

/// Optimal tour of a small instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BruteForceResult {
    /// Cheapest route, starting at the anchor.
    pub route: Route,
    /// Cost of `route`.
    pub cost: f64,
    /// Number of tours evaluated.
    pub evaluated: usize,
}

/// Correctness oracle: the exact optimum by full enumeration.
#[derive(Debug, Clone, Copy)]
pub struct BruteForceSolver {
    max_locations: usize,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self {
            max_locations: DEFAULT_MAX_LOCATIONS,
        }
    }
}

impl BruteForceSolver {
    /// Sets the largest instance the solver will enumerate.
    pub fn with_max_locations(mut self, n: usize) -> Self {
        self.max_locations = n;
        self
    }

    pub fn max_locations(&self) -> usize {
        self.max_locations
    }

    /// Optimal tour anchored at location 0.
    pub fn optimal(&self, model: &DistanceModel) -> Result<BruteForceResult> {
        self.optimal_from(model, 0)
    }

    /// Optimal tour starting at `anchor`.
    ///
    /// Remaining locations are permuted in lexicographic index order; among
    /// equal-cost tours the first one enumerated wins.
    pub fn optimal_from(&self, model: &DistanceModel, anchor: usize) -> Result<BruteForceResult> {
        let n = model.len();
        if anchor >= n {
            return Err(Error::invalid_route(format!("unknown anchor location {anchor}")));
        }
        if n > self.max_locations {
            warn!(
                locations = n,
                limit = self.max_locations,
                "refusing brute-force enumeration"
            );
            return Err(Error::InstanceTooLarge {
                locations: n,
                limit: self.max_locations,
            });
        }

        let rest: Vec<usize> = (0..n).filter(|&i| i != anchor).collect();
        let mut best: Option<(Route, f64)> = None;
        let mut evaluated = 0usize;
        let mut route = Vec::with_capacity(n);

        for perm in rest.iter().copied().permutations(rest.len()) {
            route.clear();
            route.push(anchor);
            route.extend(perm);
            let cost = model.tour_length(&route);
            evaluated += 1;
            if best.as_ref().is_none_or(|(_, c)| cost < *c) {
                best = Some((route.clone(), cost));
            }
        }

        // `permutations(0)` yields one empty permutation, so `best` is set.
        let (route, cost) = best.unwrap_or_else(|| (vec![anchor], 0.0));
        debug!(locations = n, evaluated, cost, "brute-force optimum");
        Ok(BruteForceResult {
            route,
            cost,
            evaluated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::sample::namibian_towns;
    use proptest::prelude::*;

    fn first_five() -> DistanceModel {
        namibian_towns().unwrap().restrict(&[0, 1, 2, 3, 4]).unwrap()
    }

    #[test]
    fn test_first_five_towns_optimum() {
        // Windhoek -> Walvis Bay -> Swakopmund -> Tsumeb -> Otjiwarongo -> Windhoek
        // 395 + 35.5 + 562 + 260 + 249 = 1501.5; the reversed tour ties and
        // is enumerated later.
        let result = BruteForceSolver::default().optimal(&first_five()).unwrap();
        assert!((result.cost - 1501.5).abs() < 1e-9);
        assert_eq!(result.route, vec![0, 2, 1, 4, 3]);
        assert_eq!(result.evaluated, 24);
    }

    #[test]
    fn test_ties_keep_first_enumerated() {
        // Every tour of a 4-location uniform instance costs the same.
        let matrix = (0..4)
            .map(|i| (0..4).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
            .collect();
        let model = DistanceModel::new(["a", "b", "c", "d"], matrix).unwrap();
        let result = BruteForceSolver::default().optimal(&model).unwrap();
        assert_eq!(result.route, vec![0, 1, 2, 3]);
        assert_eq!(result.cost, 4.0);
    }

    #[test]
    fn test_explicit_anchor() {
        let model = first_five();
        let anchored = BruteForceSolver::default().optimal_from(&model, 3).unwrap();
        let default = BruteForceSolver::default().optimal(&model).unwrap();
        assert_eq!(anchored.route[0], 3);
        assert!((anchored.cost - default.cost).abs() < 1e-9);
    }

    #[test]
    fn test_single_location() {
        let model = namibian_towns().unwrap().restrict(&[6]).unwrap();
        let result = BruteForceSolver::default().optimal(&model).unwrap();
        assert_eq!(result.route, vec![0]);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.evaluated, 1);
    }

    #[test]
    fn test_refuses_large_instances() {
        let model = namibian_towns().unwrap();
        let solver = BruteForceSolver::default().with_max_locations(8);
        assert_eq!(
            solver.optimal(&model),
            Err(Error::InstanceTooLarge {
                locations: 10,
                limit: 8
            })
        );
    }

    #[test]
    fn test_unknown_anchor() {
        let model = first_five();
        assert!(matches!(
            BruteForceSolver::default().optimal_from(&model, 5),
            Err(Error::InvalidRoute { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn optimum_is_no_worse_than_any_tour(
            towns in proptest::sample::subsequence((0..10usize).collect::<Vec<_>>(), 5),
            tour in Just((0..5usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let model = namibian_towns().unwrap().restrict(&towns).unwrap();
            let optimum = BruteForceSolver::default().optimal(&model).unwrap();
            prop_assert!(optimum.cost <= model.cost(&tour).unwrap() + 1e-9);
            prop_assert!((model.cost(&optimum.route).unwrap() - optimum.cost).abs() < 1e-9);
        }
    }
}
