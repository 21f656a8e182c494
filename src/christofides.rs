//! Christofides construction followed by 2-opt refinement.
//!
//! Minimum spanning tree, minimum-weight matching on the odd-degree
//! vertices, Eulerian circuit over the merged multigraph, then shortcut
//! repeated stops into a Hamiltonian cycle. The 1.5-approximation bound
//! only holds for metrics with the triangle inequality (haversine
//! qualifies); on other symmetric inputs the algorithm still terminates
//! with a valid tour. Asymmetric matrices are rejected outright since the
//! construction works on an undirected graph.

use tracing::debug;

use crate::matrix::DistanceMatrix;
use crate::route::Route;
use crate::solver::{Algorithm, SolveOptions, SolverError, SolverErrorKind};
use crate::two_opt;

const SYMMETRY_EPSILON: f64 = 1e-6;

pub fn solve(matrix: &DistanceMatrix, options: &SolveOptions) -> Result<Route, SolverError> {
    if !matrix.is_symmetric(SYMMETRY_EPSILON) {
        return Err(SolverError {
            algorithm: Algorithm::Christofides2Opt,
            kind: SolverErrorKind::AsymmetricMatrix,
        });
    }

    let n = matrix.dim();
    let mst = minimum_spanning_tree(matrix)?;

    let mut multigraph = vec![Vec::new(); n];
    for &(u, v) in &mst {
        multigraph[u].push(v);
        multigraph[v].push(u);
    }

    let odd: Vec<usize> = (0..n)
        .filter(|&v| multigraph[v].len() % 2 == 1)
        .collect();
    for (u, v) in greedy_matching(&odd, matrix) {
        multigraph[u].push(v);
        multigraph[v].push(u);
    }

    let circuit = eulerian_circuit(multigraph);
    let order = shortcut(&circuit, n);

    // shortcut keeps the first occurrence of every vertex, so this is a
    // permutation of 0..n
    let initial = Route::new(order)
        .map_err(|_| SolverError {
            algorithm: Algorithm::Christofides2Opt,
            kind: SolverErrorKind::Unreachable { from: 0 },
        })?
        .rotate_to_depot(0);

    let refined = two_opt::refine(initial, matrix, options.two_opt_max_passes);
    debug!(
        n,
        distance = refined.total_distance(matrix),
        "christofides2opt finished"
    );
    Ok(refined)
}

/// Prim's algorithm. Fails if an infinite edge is the only way to reach a
/// vertex (the underlying graph is disconnected).
fn minimum_spanning_tree(matrix: &DistanceMatrix) -> Result<Vec<(usize, usize)>, SolverError> {
    let n = matrix.dim();
    let mut in_tree = vec![false; n];
    let mut best_cost = vec![f64::INFINITY; n];
    let mut best_parent = vec![0usize; n];
    let mut edges = Vec::with_capacity(n - 1);

    in_tree[0] = true;
    for v in 1..n {
        best_cost[v] = matrix.get(0, v);
    }

    for _ in 1..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if !in_tree[v]
                && best_cost[v].is_finite()
                && next.map_or(true, |u| best_cost[v] < best_cost[u])
            {
                next = Some(v);
            }
        }

        let v = next.ok_or(SolverError {
            algorithm: Algorithm::Christofides2Opt,
            kind: SolverErrorKind::Unreachable { from: 0 },
        })?;
        in_tree[v] = true;
        edges.push((best_parent[v], v));

        for u in 0..n {
            if !in_tree[u] && matrix.get(v, u) < best_cost[u] {
                best_cost[u] = matrix.get(v, u);
                best_parent[u] = v;
            }
        }
    }

    Ok(edges)
}

/// Greedy minimum-weight perfect matching over the odd-degree vertices.
///
/// The textbook construction uses an exact matching; the greedy pairing is
/// the standard practical substitute and keeps the result a valid tour,
/// trading only the tightness of the approximation bound. The odd set
/// always has even cardinality (handshake lemma).
fn greedy_matching(odd: &[usize], matrix: &DistanceMatrix) -> Vec<(usize, usize)> {
    let mut pairs: Vec<(f64, usize, usize)> = Vec::new();
    for (i, &u) in odd.iter().enumerate() {
        for &v in &odd[i + 1..] {
            pairs.push((matrix.get(u, v), u, v));
        }
    }
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut matched: Vec<(usize, usize)> = Vec::with_capacity(odd.len() / 2);
    let mut used: Vec<usize> = Vec::new();
    for (_, u, v) in pairs {
        if !used.contains(&u) && !used.contains(&v) {
            matched.push((u, v));
            used.push(u);
            used.push(v);
        }
    }
    matched
}

/// Hierholzer's algorithm over an undirected multigraph given as
/// adjacency lists. Every vertex has even degree by construction.
fn eulerian_circuit(mut adjacency: Vec<Vec<usize>>) -> Vec<usize> {
    let mut stack = vec![0usize];
    let mut circuit = Vec::new();

    while let Some(&v) = stack.last() {
        if let Some(u) = adjacency[v].pop() {
            // Remove the reverse half of the undirected edge.
            if let Some(pos) = adjacency[u].iter().position(|&w| w == v) {
                adjacency[u].swap_remove(pos);
            }
            stack.push(u);
        } else {
            circuit.push(v);
            stack.pop();
        }
    }

    circuit
}

/// Skips repeated vertices in the Eulerian circuit, keeping first visits.
fn shortcut(circuit: &[usize], n: usize) -> Vec<usize> {
    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for &v in circuit {
        if !seen[v] {
            seen[v] = true;
            order.push(v);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 3.0, 5.0, 4.0],
            vec![3.0, 0.0, 4.0, 5.0],
            vec![5.0, 4.0, 0.0, 3.0],
            vec![4.0, 5.0, 3.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn finds_rectangle_perimeter() {
        let route = solve(&rectangle(), &SolveOptions::default()).unwrap();
        assert_eq!(route.total_distance(&rectangle()), 14.0);
        assert_eq!(route.order()[0], 0);
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0],
            vec![30.0, 0.0, 10.0],
            vec![20.0, 10.0, 0.0],
        ])
        .unwrap();
        let err = solve(&matrix, &SolveOptions::default()).unwrap_err();
        assert_eq!(err.kind, SolverErrorKind::AsymmetricMatrix);
        assert_eq!(err.algorithm, Algorithm::Christofides2Opt);
    }

    #[test]
    fn disconnected_graph_is_an_error() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, f64::INFINITY],
            vec![1.0, 0.0, f64::INFINITY],
            vec![f64::INFINITY, f64::INFINITY, 0.0],
        ])
        .unwrap();
        let err = solve(&matrix, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err.kind, SolverErrorKind::Unreachable { .. }));
    }

    #[test]
    fn mst_spans_all_vertices() {
        let edges = minimum_spanning_tree(&rectangle()).unwrap();
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn matching_pairs_every_odd_vertex() {
        let odd = vec![0, 1, 2, 3];
        let matched = greedy_matching(&odd, &rectangle());
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn visits_every_stop_once_on_larger_instance() {
        // 7 collinear points; distances are pairwise absolute differences,
        // a metric that satisfies the triangle inequality.
        let xs: [f64; 7] = [0.0, 1.0, 4.0, 6.0, 7.0, 11.0, 13.0];
        let n = xs.len();
        let rows = (0..n)
            .map(|i| (0..n).map(|j| (xs[i] - xs[j]).abs()).collect())
            .collect();
        let matrix = DistanceMatrix::from_rows(rows).unwrap();

        let route = solve(&matrix, &SolveOptions::default()).unwrap();
        assert_eq!(route.len(), n);
        // Optimal tour walks the line out and back: 2 * 13.
        assert_eq!(route.total_distance(&matrix), 26.0);
    }
}
