//! Dense pairwise distance matrix.

use std::fmt;

/// Square matrix of pairwise travel distances in metres, row-major.
///
/// Built once per optimize request and shared read-only by all solvers.
/// Unreachable pairs are `f64::INFINITY`. The diagonal is always zero and
/// every entry is non-negative; these invariants are checked at
/// construction, so solvers can rely on them.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    dim: usize,
}

/// Failures while building a distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Fewer than two locations; a tour is undefined.
    InsufficientLocations { found: usize },
    /// A location is missing usable coordinates.
    UnresolvedLocation { address: String },
    /// The supplied grid is not a valid distance matrix.
    Malformed(String),
    /// A remote matrix source failed.
    Provider(String),
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::InsufficientLocations { found } => {
                write!(f, "need at least 2 locations to build a tour, got {}", found)
            }
            MatrixError::UnresolvedLocation { address } => {
                write!(f, "location '{}' has no usable coordinates", address)
            }
            MatrixError::Malformed(reason) => write!(f, "malformed distance matrix: {}", reason),
            MatrixError::Provider(reason) => write!(f, "distance matrix provider failed: {}", reason),
        }
    }
}

impl std::error::Error for MatrixError {}

impl DistanceMatrix {
    /// Builds a matrix from an explicit grid, validating the invariants.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let dim = rows.len();
        if dim < 2 {
            return Err(MatrixError::InsufficientLocations { found: dim });
        }

        let mut data = Vec::with_capacity(dim * dim);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(MatrixError::Malformed(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    dim
                )));
            }
            for (j, value) in row.into_iter().enumerate() {
                if value.is_nan() || value < 0.0 {
                    return Err(MatrixError::Malformed(format!(
                        "entry ({}, {}) is {}",
                        i, j, value
                    )));
                }
                if i == j && value != 0.0 {
                    return Err(MatrixError::Malformed(format!(
                        "diagonal entry {} is {}, expected 0",
                        i, value
                    )));
                }
                data.push(value);
            }
        }

        Ok(Self { data, dim })
    }

    /// Number of locations (matrix is `dim x dim`).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Distance from location `from` to location `to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.dim + to]
    }

    /// Whether the matrix is symmetric within `epsilon`.
    ///
    /// Great-circle matrices are symmetric; road-network matrices (one-way
    /// streets, turn restrictions) generally are not.
    pub fn is_symmetric(&self, epsilon: f64) -> bool {
        for i in 0..self.dim {
            for j in (i + 1)..self.dim {
                let a = self.get(i, j);
                let b = self.get(j, i);
                if a.is_infinite() != b.is_infinite() {
                    return false;
                }
                if a.is_finite() && (a - b).abs() > epsilon {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_accepts_valid_grid() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.get(1, 2), 3.0);
        assert!(matrix.is_symmetric(1e-9));
    }

    #[test]
    fn single_location_is_insufficient() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0]]).unwrap_err();
        assert_eq!(err, MatrixError::InsufficientLocations { found: 1 });
    }

    #[test]
    fn rejects_non_square_grid() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::Malformed(_)));
    }

    #[test]
    fn rejects_nonzero_diagonal() {
        let err =
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 5.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::Malformed(_)));
    }

    #[test]
    fn rejects_negative_entries() {
        let err =
            DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::Malformed(_)));
    }

    #[test]
    fn infinity_marks_unreachable_pairs() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, f64::INFINITY],
            vec![f64::INFINITY, 0.0],
        ])
        .unwrap();
        assert!(matrix.get(0, 1).is_infinite());
        assert!(matrix.is_symmetric(1e-9));
    }

    #[test]
    fn detects_asymmetry() {
        let matrix = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0],
            vec![25.0, 0.0],
        ])
        .unwrap();
        assert!(!matrix.is_symmetric(1e-9));
    }
}
