//! Symmetric distance matrix over a fixed set of named locations.

use crate::error::{Error, Result};

/// An ordered visiting sequence of location indices, read as a cycle.
pub type Route = Vec<usize>;

/// Relative tolerance for the symmetry check.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Immutable distance model for a TSP instance.
///
/// Locations are addressed by index `0..len()`; each carries a name for
/// reporting. The matrix is square, symmetric, non-negative and zero on the
/// diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceModel {
    names: Vec<String>,
    /// Row-major `n * n`.
    distances: Vec<f64>,
}

impl DistanceModel {
    /// Builds a model from location names and a square distance matrix.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMatrix`] if there are no locations, the matrix is
    /// not `n × n`, an entry is negative or not finite, the diagonal is not
    /// zero, or the matrix is not symmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tourgame::tsp::DistanceModel;
    ///
    /// let model = DistanceModel::new(
    ///     ["A", "B", "C"],
    ///     vec![
    ///         vec![0.0, 1.0, 2.0],
    ///         vec![1.0, 0.0, 3.0],
    ///         vec![2.0, 3.0, 0.0],
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(model.cost(&[0, 1, 2]).unwrap(), 6.0);
    /// ```
    pub fn new<I, S>(locations: I, matrix: Vec<Vec<f64>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = locations.into_iter().map(Into::into).collect();
        let n = names.len();
        if n == 0 {
            return Err(Error::invalid_matrix("no locations"));
        }
        if matrix.len() != n {
            return Err(Error::invalid_matrix(format!(
                "expected {n} rows, got {}",
                matrix.len()
            )));
        }

        let mut distances = Vec::with_capacity(n * n);
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_matrix(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::invalid_matrix(format!(
                        "entry ({i}, {j}) = {d} is not a non-negative finite distance"
                    )));
                }
            }
            if row[i] != 0.0 {
                return Err(Error::invalid_matrix(format!(
                    "diagonal entry ({i}, {i}) = {} is not zero",
                    row[i]
                )));
            }
            distances.extend_from_slice(row);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (matrix[i][j], matrix[j][i]);
                let scale = a.abs().max(b.abs()).max(1.0);
                if (a - b).abs() > SYMMETRY_TOLERANCE * scale {
                    return Err(Error::invalid_matrix(format!(
                        "asymmetric: d({i}, {j}) = {a} but d({j}, {i}) = {b}"
                    )));
                }
            }
        }

        Ok(Self { names, distances })
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; construction rejects empty models.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Location names in index order.
    pub fn locations(&self) -> &[String] {
        &self.names
    }

    /// Name of the location at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of the location called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Distance between two locations, or `None` if either index is out of
    /// range.
    pub fn distance(&self, from: usize, to: usize) -> Option<f64> {
        let n = self.len();
        (from < n && to < n).then(|| self.leg(from, to))
    }

    /// Total cost of the cyclic tour `route`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRoute`] unless `route` visits every location exactly
    /// once.
    pub fn cost(&self, route: &[usize]) -> Result<f64> {
        self.check_route(route)?;
        Ok(self.tour_length(route))
    }

    /// Running cost at each stop: `0.0` at the start, then the distance
    /// travelled on arrival at each following stop, and finally the full
    /// cycle cost after returning to the start. `len() + 1` entries.
    pub fn cumulative_costs(&self, route: &[usize]) -> Result<Vec<f64>> {
        self.check_route(route)?;
        let mut totals = Vec::with_capacity(route.len() + 1);
        let mut running = 0.0;
        totals.push(running);
        for (i, &from) in route.iter().enumerate() {
            let to = route[(i + 1) % route.len()];
            running += self.leg(from, to);
            totals.push(running);
        }
        Ok(totals)
    }

    /// Names of the stops along `route`.
    pub fn route_names(&self, route: &[usize]) -> Result<Vec<&str>> {
        self.check_route(route)?;
        Ok(route.iter().map(|&i| self.names[i].as_str()).collect())
    }

    /// Sub-instance over `indices`, in that order. Index `k` of the new
    /// model is `indices[k]` of this one.
    pub fn restrict(&self, indices: &[usize]) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::invalid_matrix("no locations"));
        }
        let mut seen = vec![false; self.len()];
        for &i in indices {
            if i >= self.len() {
                return Err(Error::invalid_route(format!("unknown location {i}")));
            }
            if std::mem::replace(&mut seen[i], true) {
                return Err(Error::invalid_route(format!("location {i} repeated")));
            }
        }

        let names = indices.iter().map(|&i| self.names[i].clone()).collect();
        let distances = indices
            .iter()
            .flat_map(|&i| indices.iter().map(move |&j| (i, j)))
            .map(|(i, j)| self.leg(i, j))
            .collect();
        Ok(Self { names, distances })
    }

    /// Cycle length without validation. `route` must be a permutation.
    pub(crate) fn tour_length(&self, route: &[usize]) -> f64 {
        debug_assert!(self.check_route(route).is_ok());
        let n = route.len();
        (0..n)
            .map(|i| self.leg(route[i], route[(i + 1) % n]))
            .sum()
    }

    /// Unchecked lookup. Both indices must be below `len()`.
    pub(crate) fn leg(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.len() + to]
    }

    fn check_route(&self, route: &[usize]) -> Result<()> {
        if route.len() != self.len() {
            return Err(Error::invalid_route(format!(
                "expected {} locations, got {}",
                self.len(),
                route.len()
            )));
        }
        let mut seen = vec![false; self.len()];
        for &i in route {
            if i >= self.len() {
                return Err(Error::invalid_route(format!("unknown location {i}")));
            }
            if std::mem::replace(&mut seen[i], true) {
                return Err(Error::invalid_route(format!("location {i} repeated")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::sample::namibian_towns;
    use proptest::prelude::*;

    fn square() -> DistanceModel {
        // Unit square corners, diagonals sqrt(2).
        let d = 2f64.sqrt();
        DistanceModel::new(
            ["a", "b", "c", "d"],
            vec![
                vec![0.0, 1.0, d, 1.0],
                vec![1.0, 0.0, 1.0, d],
                vec![d, 1.0, 0.0, 1.0],
                vec![1.0, d, 1.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_cost_includes_return_edge() {
        let model = square();
        assert!((model.cost(&[0, 1, 2, 3]).unwrap() - 4.0).abs() < 1e-12);
        let crossing = model.cost(&[0, 2, 1, 3]).unwrap();
        assert!((crossing - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_single_location_costs_nothing() {
        let model = DistanceModel::new(["only"], vec![vec![0.0]]).unwrap();
        assert_eq!(model.cost(&[0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cost_rejects_bad_routes() {
        let model = square();
        for route in [vec![0, 1, 2], vec![0, 1, 2, 2], vec![0, 1, 2, 4], vec![]] {
            assert!(
                matches!(model.cost(&route), Err(Error::InvalidRoute { .. })),
                "accepted {route:?}"
            );
        }
    }

    #[test]
    fn test_rejects_malformed_matrices() {
        let bad = [
            (vec!["a", "b"], vec![vec![0.0, 1.0]]),
            (vec!["a", "b"], vec![vec![0.0, 1.0], vec![1.0]]),
            (vec!["a", "b"], vec![vec![0.0, 1.0], vec![2.0, 0.0]]),
            (vec!["a", "b"], vec![vec![1.0, 1.0], vec![1.0, 0.0]]),
            (vec!["a", "b"], vec![vec![0.0, -1.0], vec![-1.0, 0.0]]),
            (vec!["a", "b"], vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]]),
            (vec![], vec![]),
        ];
        for (names, matrix) in bad {
            assert!(matches!(
                DistanceModel::new(names, matrix),
                Err(Error::InvalidMatrix { .. })
            ));
        }
    }

    #[test]
    fn test_symmetry_within_tolerance() {
        let model = DistanceModel::new(
            ["a", "b"],
            vec![vec![0.0, 1000.0], vec![1000.0 + 1e-9, 0.0]],
        );
        assert!(model.is_ok());
    }

    #[test]
    fn test_cumulative_costs() {
        let model = square();
        let totals = model.cumulative_costs(&[0, 1, 2, 3]).unwrap();
        assert_eq!(totals, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_names_and_lookup() {
        let model = namibian_towns().unwrap();
        assert_eq!(model.len(), 10);
        assert_eq!(model.name(0), Some("Windhoek"));
        assert_eq!(model.index_of("Oshakati"), Some(9));
        assert_eq!(model.index_of("Lüderitz"), None);
        assert_eq!(model.distance(1, 2), Some(35.5));
        assert_eq!(
            model.route_names(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap()[2],
            "Walvis Bay"
        );
    }

    #[test]
    fn test_distance_out_of_range_is_none() {
        let model = square();
        assert_eq!(model.distance(3, 0), Some(1.0));
        assert_eq!(model.distance(4, 0), None);
        assert_eq!(model.distance(0, 4), None);
    }

    #[test]
    fn test_restrict_reindexes() {
        let model = namibian_towns().unwrap();
        let sub = model.restrict(&[9, 0, 8]).unwrap();
        assert_eq!(sub.locations(), ["Oshakati", "Windhoek", "Ondangwa"]);
        assert_eq!(sub.distance(0, 2), Some(30.0));
        assert_eq!(sub.distance(1, 0), Some(712.0));
        assert!(model.restrict(&[0, 0]).is_err());
        assert!(model.restrict(&[10]).is_err());
        assert!(model.restrict(&[]).is_err());
    }

    proptest! {
        #[test]
        fn reversed_tour_costs_the_same(
            route in Just((0..10usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let model = namibian_towns().unwrap();
            let forward = model.cost(&route).unwrap();
            let mut reversed = route.clone();
            reversed.reverse();
            prop_assert!((forward - model.cost(&reversed).unwrap()).abs() < 1e-9);
        }

        #[test]
        fn rotated_tour_costs_the_same(
            route in Just((0..10usize).collect::<Vec<_>>()).prop_shuffle(),
            shift in 0..10usize
        ) {
            let model = namibian_towns().unwrap();
            let mut rotated = route.clone();
            rotated.rotate_left(shift);
            prop_assert!(
                (model.cost(&route).unwrap() - model.cost(&rotated).unwrap()).abs() < 1e-9
            );
        }

        #[test]
        fn cumulative_total_matches_cost(
            route in Just((0..10usize).collect::<Vec<_>>()).prop_shuffle()
        ) {
            let model = namibian_towns().unwrap();
            let totals = model.cumulative_costs(&route).unwrap();
            prop_assert_eq!(totals.len(), 11);
            prop_assert!((totals[10] - model.cost(&route).unwrap()).abs() < 1e-9);
        }
    }
}
