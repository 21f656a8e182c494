//! Tour value type.

use std::fmt;

use crate::matrix::DistanceMatrix;

/// A closed tour over location indices.
///
/// Stores the visiting order with every index appearing exactly once; the
/// return edge back to the first stop is implicit. Solvers canonicalise
/// tours to start at the depot (index 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    order: Vec<usize>,
}

/// The index sequence does not form a valid tour.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRouteError(pub String);

impl fmt::Display for InvalidRouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid route: {}", self.0)
    }
}

impl std::error::Error for InvalidRouteError {}

impl Route {
    /// Builds a route, checking that `order` is a permutation of `0..n`.
    pub fn new(order: Vec<usize>) -> Result<Self, InvalidRouteError> {
        let n = order.len();
        if n < 2 {
            return Err(InvalidRouteError(format!("{} stops, need at least 2", n)));
        }
        let mut seen = vec![false; n];
        for &index in &order {
            if index >= n {
                return Err(InvalidRouteError(format!(
                    "index {} out of range for {} stops",
                    index, n
                )));
            }
            if seen[index] {
                return Err(InvalidRouteError(format!("index {} visited twice", index)));
            }
            seen[index] = true;
        }
        Ok(Self { order })
    }

    /// Visiting order, excluding the implicit return to the first stop.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visiting order with the closing return stop appended.
    pub fn closed_order(&self) -> Vec<usize> {
        let mut closed = self.order.clone();
        closed.push(self.order[0]);
        closed
    }

    /// Total tour length per `matrix`, including the closing edge.
    pub fn total_distance(&self, matrix: &DistanceMatrix) -> f64 {
        let n = self.order.len();
        let mut total = 0.0;
        for i in 0..n {
            total += matrix.get(self.order[i], self.order[(i + 1) % n]);
        }
        total
    }

    /// Rotates the tour so it starts at `depot`. The cycle is unchanged.
    pub fn rotate_to_depot(mut self, depot: usize) -> Self {
        if let Some(pos) = self.order.iter().position(|&index| index == depot) {
            self.order.rotate_left(pos);
        }
        self
    }
}
