//! Common solver contract and dispatch.
//!
//! Three algorithms implement the same "produce a closed tour over all
//! matrix indices" contract. The enum is the discriminant; callers never
//! dispatch on raw strings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::matrix::DistanceMatrix;
use crate::route::Route;
use crate::{christofides, exact, greedy};

/// The fixed set of tour-construction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Branch-and-bound search with a bounded budget; falls back to the
    /// best tour found so far on budget exhaustion.
    #[serde(rename = "exact")]
    Exact,
    /// Christofides construction refined with 2-opt. Symmetric metrics only.
    #[serde(rename = "christofides2opt")]
    Christofides2Opt,
    /// Nearest-neighbour construction refined with 2-opt.
    #[serde(rename = "greedy2opt")]
    Greedy2Opt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Exact,
        Algorithm::Christofides2Opt,
        Algorithm::Greedy2Opt,
    ];

    /// Wire name used by the frontend contract.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Exact => "exact",
            Algorithm::Christofides2Opt => "christofides2opt",
            Algorithm::Greedy2Opt => "greedy2opt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Algorithm::Exact),
            "christofides2opt" => Ok(Algorithm::Christofides2Opt),
            "greedy2opt" => Ok(Algorithm::Greedy2Opt),
            other => Err(UnknownAlgorithmError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownAlgorithmError(pub String);

impl fmt::Display for UnknownAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm '{}'", self.0)
    }
}

impl std::error::Error for UnknownAlgorithmError {}

/// Budgets shared by all solvers.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Wall-clock deadline for the branch-and-bound search.
    pub time_budget: Duration,
    /// Node expansion cap for the branch-and-bound search. This is the
    /// deterministic bound; the deadline is a safety net.
    pub node_budget: u64,
    /// Maximum full improvement passes for 2-opt refinement.
    pub two_opt_max_passes: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(5),
            node_budget: 2_000_000,
            two_opt_max_passes: 100,
        }
    }
}

/// Per-algorithm failure, isolated from sibling solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverError {
    pub algorithm: Algorithm,
    pub kind: SolverErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolverErrorKind {
    /// The matrix is asymmetric and the algorithm requires a symmetric metric.
    AsymmetricMatrix,
    /// No finite arc out of a stop; a closed tour cannot be completed.
    Unreachable { from: usize },
    /// Budget exhausted before any feasible tour was found.
    Budget,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SolverErrorKind::AsymmetricMatrix => write!(
                f,
                "{}: matrix is asymmetric, algorithm requires a symmetric metric",
                self.algorithm
            ),
            SolverErrorKind::Unreachable { from } => write!(
                f,
                "{}: no reachable unvisited stop from index {}",
                self.algorithm, from
            ),
            SolverErrorKind::Budget => {
                write!(f, "{}: budget exhausted before a tour was found", self.algorithm)
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Runs one algorithm over the shared read-only matrix.
///
/// The matrix guarantees dimension ≥ 2, a zero diagonal and non-negative
/// entries; solvers rely on those invariants and only fail for the reasons
/// in [`SolverErrorKind`].
pub fn solve(
    algorithm: Algorithm,
    matrix: &DistanceMatrix,
    options: &SolveOptions,
) -> Result<Route, SolverError> {
    match algorithm {
        Algorithm::Exact => exact::solve(matrix, options),
        Algorithm::Christofides2Opt => christofides::solve(matrix, options),
        Algorithm::Greedy2Opt => greedy::solve(matrix, options),
    }
}
