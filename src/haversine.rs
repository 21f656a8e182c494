//! Haversine distance matrix provider (fallback when OSRM unavailable).
//!
//! Uses great-circle distance between resolved coordinates. Less accurate
//! than a road network (ignores roads) but always available, symmetric,
//! and satisfies the triangle inequality — the metric under which the
//! Christofides quality guarantee holds.

use crate::location::Location;
use crate::matrix::{DistanceMatrix, MatrixError};
use crate::traits::{check_locations, DistanceMatrixProvider};

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance matrix provider.
#[derive(Debug, Clone, Default)]
pub struct HaversineMatrix;

impl HaversineMatrix {
    pub fn new() -> Self {
        Self
    }

    /// Calculate haversine distance between two (lat, lng) points in metres.
    pub fn haversine_m(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
        check_locations(locations)?;

        let n = locations.len();
        let mut rows = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = Self::haversine_m(locations[i].coords(), locations[j].coords());
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        DistanceMatrix::from_rows(rows)
    }
}
