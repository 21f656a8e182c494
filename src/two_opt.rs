//! 2-opt tour refinement, shared by the heuristic solvers.
//!
//! Repeatedly scans pairs of non-adjacent edges; if reversing the segment
//! between them strictly shortens the tour, the reversal is applied.
//! First-improvement strategy: a pass restarts scanning after each applied
//! reversal. Terminates when a full pass finds no improvement or the pass
//! cap is hit, so total distance is monotone non-increasing.

use tracing::trace;

use crate::matrix::DistanceMatrix;
use crate::route::Route;

/// Refines `route` with 2-opt passes, keeping the depot fixed at position 0.
pub fn refine(route: Route, matrix: &DistanceMatrix, max_passes: usize) -> Route {
    let n = route.len();
    if n < 4 {
        // With fewer than four stops every segment reversal yields the
        // same cycle or swaps two adjacent stops to no effect.
        return route;
    }

    let symmetric = matrix.is_symmetric(1e-9);
    let mut order = route.order().to_vec();

    for pass in 0..max_passes {
        let mut improved = false;

        for i in 1..n - 1 {
            for j in (i + 1)..n {
                if accepts_reversal(&order, matrix, symmetric, i, j) {
                    order[i..=j].reverse();
                    improved = true;
                }
            }
        }

        if !improved {
            trace!(passes = pass + 1, "2-opt converged");
            break;
        }
    }

    // The reversal loop permutes positions 1..n only, so the permutation
    // property is preserved.
    Route::new(order).unwrap_or(route)
}

/// Whether reversing `order[i..=j]` strictly shortens the tour.
///
/// Old and new edge costs are compared as sums rather than as a delta so
/// infinite (unreachable) entries never produce a NaN comparison.
fn accepts_reversal(
    order: &[usize],
    matrix: &DistanceMatrix,
    symmetric: bool,
    i: usize,
    j: usize,
) -> bool {
    let n = order.len();
    let prev = order[i - 1];
    let next = order[(j + 1) % n];

    let mut old_cost = matrix.get(prev, order[i]) + matrix.get(order[j], next);
    let mut new_cost = matrix.get(prev, order[j]) + matrix.get(order[i], next);

    // Reversal flips the direction of every edge inside the segment; only
    // asymmetric matrices notice.
    if !symmetric {
        for k in i..j {
            old_cost += matrix.get(order[k], order[k + 1]);
            new_cost += matrix.get(order[k + 1], order[k]);
        }
    }

    new_cost < old_cost
}
