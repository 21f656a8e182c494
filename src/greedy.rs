//! Nearest-neighbour construction followed by 2-opt refinement.

use tracing::debug;

use crate::matrix::DistanceMatrix;
use crate::route::Route;
use crate::solver::{Algorithm, SolveOptions, SolverError, SolverErrorKind};
use crate::two_opt;

/// Builds a tour greedily from the depot, then refines it.
pub fn solve(matrix: &DistanceMatrix, options: &SolveOptions) -> Result<Route, SolverError> {
    let initial = nearest_neighbour(matrix, Algorithm::Greedy2Opt)?;
    let refined = two_opt::refine(initial, matrix, options.two_opt_max_passes);
    debug!(
        n = matrix.dim(),
        distance = refined.total_distance(matrix),
        "greedy2opt finished"
    );
    Ok(refined)
}

/// Nearest-neighbour tour starting at the depot (index 0).
///
/// Fails when the only remaining arcs out of the current stop are
/// unreachable (infinite), since no closed tour can pass through them.
pub(crate) fn nearest_neighbour(
    matrix: &DistanceMatrix,
    algorithm: Algorithm,
) -> Result<Route, SolverError> {
    let n = matrix.dim();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = 0;
    visited[0] = true;
    order.push(0);

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let d = matrix.get(current, candidate);
            if d.is_finite() && best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }

        let (next, _) = best.ok_or(SolverError {
            algorithm,
            kind: SolverErrorKind::Unreachable { from: current },
        })?;
        visited[next] = true;
        order.push(next);
        current = next;
    }

    // order is a permutation of 0..n by construction
    Route::new(order).map_err(|_| SolverError {
        algorithm,
        kind: SolverErrorKind::Unreachable { from: current },
    })
}
