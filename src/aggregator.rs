//! Runs the requested solvers and ranks their results.

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::matrix::DistanceMatrix;
use crate::route::Route;
use crate::solver::{self, Algorithm, SolveOptions, SolverError};

/// A solved tour with its total length per the request's matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub route: Route,
    pub total_distance: f64,
}

/// Outcome of one solver invocation. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmResult {
    pub algorithm: Algorithm,
    pub outcome: Result<Tour, SolverError>,
}

impl AlgorithmResult {
    pub fn tour(&self) -> Option<&Tour> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&SolverError> {
        self.outcome.as_ref().err()
    }
}

/// Results of one optimize request, one entry per requested algorithm.
///
/// Request-scoped: held by the caller until a later plot request looks a
/// result up by algorithm name, then dropped. Never shared across
/// requests.
#[derive(Debug, Clone)]
pub struct ResultSet {
    results: Vec<AlgorithmResult>,
}

/// Lookup of an algorithm that was not part of the optimize request.
#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundError {
    pub algorithm: Algorithm,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no computed result for algorithm '{}'", self.algorithm)
    }
}

impl std::error::Error for NotFoundError {}

impl ResultSet {
    /// All results in requested order, failures included.
    pub fn all(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Successful results, ascending by total distance. Stable on ties, so
    /// equal-length tours keep their requested order.
    pub fn ranked(&self) -> Vec<&AlgorithmResult> {
        let mut ranked: Vec<&AlgorithmResult> = self
            .results
            .iter()
            .filter(|result| result.tour().is_some())
            .collect();
        ranked.sort_by(|a, b| {
            let da = a.tour().map_or(f64::INFINITY, |t| t.total_distance);
            let db = b.tour().map_or(f64::INFINITY, |t| t.total_distance);
            da.total_cmp(&db)
        });
        ranked
    }

    /// Shortest successful result, if any solver succeeded.
    pub fn best(&self) -> Option<&AlgorithmResult> {
        self.ranked().into_iter().next()
    }

    /// Failed results, for error reporting.
    pub fn errors(&self) -> Vec<&AlgorithmResult> {
        self.results
            .iter()
            .filter(|result| result.error().is_some())
            .collect()
    }

    /// Looks up a previously computed result by algorithm. Plot requests
    /// reference results this way; nothing is recomputed.
    pub fn get(&self, algorithm: Algorithm) -> Result<&AlgorithmResult, NotFoundError> {
        self.results
            .iter()
            .find(|result| result.algorithm == algorithm)
            .ok_or(NotFoundError { algorithm })
    }
}

/// Runs every requested solver over the shared read-only matrix.
///
/// Solvers run in parallel and are failure-isolated: one algorithm's error
/// never aborts its siblings, and the set is only returned once every
/// solver has completed or failed. Duplicate requests collapse to one run.
pub fn run_all(
    matrix: &DistanceMatrix,
    algorithms: &[Algorithm],
    options: &SolveOptions,
) -> ResultSet {
    let mut requested: Vec<Algorithm> = Vec::new();
    for &algorithm in algorithms {
        if !requested.contains(&algorithm) {
            requested.push(algorithm);
        }
    }

    info!(n = matrix.dim(), solvers = requested.len(), "running solvers");

    let results: Vec<AlgorithmResult> = requested
        .par_iter()
        .map(|&algorithm| {
            let outcome = solver::solve(algorithm, matrix, options).map(|route| {
                let total_distance = route.total_distance(matrix);
                Tour {
                    route,
                    total_distance,
                }
            });
            if let Err(err) = &outcome {
                debug!(%err, "solver failed");
            }
            AlgorithmResult { algorithm, outcome }
        })
        .collect();

    ResultSet { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolverErrorKind;

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
    fn all_solvers_agree_on_rectangle() {
        let set = run_all(&rectangle(), &Algorithm::ALL, &SolveOptions::default());
        assert_eq!(set.all().len(), 3);
        for result in set.all() {
            let tour = result.tour().expect("solver should succeed");
            assert_eq!(tour.total_distance, 14.0);
        }
    }

    #[test]
    fn ranked_is_ascending_and_best_is_first() {
        let set = run_all(&rectangle(), &Algorithm::ALL, &SolveOptions::default());
        let ranked = set.ranked();
        for pair in ranked.windows(2) {
            let a = pair[0].tour().unwrap().total_distance;
            let b = pair[1].tour().unwrap().total_distance;
            assert!(a <= b);
        }
        assert_eq!(
            set.best().unwrap().algorithm,
            ranked[0].algorithm
        );
    }

    #[test]
    fn failing_solver_does_not_abort_siblings() {
        // Asymmetric matrix: christofides fails, exact and greedy succeed.
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![1.0, 0.0, 6.0, 4.0],
            vec![15.0, 7.0, 0.0, 8.0],
            vec![6.0, 3.0, 12.0, 0.0],
        ])
        .unwrap();
        let requested = [Algorithm::Exact, Algorithm::Christofides2Opt];
        let set = run_all(&matrix, &requested, &SolveOptions::default());

        let exact = set.get(Algorithm::Exact).unwrap();
        assert!(exact.tour().is_some());

        let christofides = set.get(Algorithm::Christofides2Opt).unwrap();
        assert_eq!(
            christofides.error().unwrap().kind,
            SolverErrorKind::AsymmetricMatrix
        );

        assert_eq!(set.best().unwrap().algorithm, Algorithm::Exact);
        assert_eq!(set.errors().len(), 1);
    }

    #[test]
    fn lookup_is_idempotent() {
        let set = run_all(&rectangle(), &Algorithm::ALL, &SolveOptions::default());
        let first = set.get(Algorithm::Greedy2Opt).unwrap().clone();
        let second = set.get(Algorithm::Greedy2Opt).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_algorithm_is_not_found() {
        let set = run_all(&rectangle(), &[Algorithm::Exact], &SolveOptions::default());
        let err = set.get(Algorithm::Greedy2Opt).unwrap_err();
        assert_eq!(err.algorithm, Algorithm::Greedy2Opt);
    }

    #[test]
    fn duplicate_requests_collapse() {
        let set = run_all(
            &rectangle(),
            &[Algorithm::Exact, Algorithm::Exact],
            &SolveOptions::default(),
        );
        assert_eq!(set.all().len(), 1);
    }
}
