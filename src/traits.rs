//! Core seams between the solving core and its external collaborators.
//!
//! Geocoding and map rendering are consumed, not implemented here; the
//! matrix provider has both a local (haversine) and a remote (OSRM)
//! implementation in this crate.

use std::fmt;

use crate::location::Location;
use crate::matrix::{DistanceMatrix, MatrixError};

/// Turns raw address strings into resolved locations.
///
/// Implemented by an external geocoding collaborator. A failure here is
/// fatal for the whole optimize request: without coordinates there is no
/// matrix to solve over.
pub trait CoordinateResolver {
    fn resolve(&self, addresses: &[String]) -> Result<Vec<Location>, ResolveError>;
}

/// Address lookup failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveError {
    pub address: String,
    pub reason: String,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not resolve '{}': {}", self.address, self.reason)
    }
}

impl std::error::Error for ResolveError {}

/// Provides a pairwise distance matrix for a set of resolved locations.
///
/// The matrix is indexed by the provided location order. Implementations
/// must produce a zero diagonal and non-negative entries; unreachable
/// pairs are `f64::INFINITY`.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError>;
}

/// Shared input validation for matrix providers.
pub(crate) fn check_locations(locations: &[Location]) -> Result<(), MatrixError> {
    if locations.len() < 2 {
        return Err(MatrixError::InsufficientLocations {
            found: locations.len(),
        });
    }
    for location in locations {
        if !location.has_valid_coords() {
            return Err(MatrixError::UnresolvedLocation {
                address: location.address.clone(),
            });
        }
    }
    Ok(())
}
