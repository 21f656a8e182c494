//! OSRM HTTP adapter for road-network distance matrices.

use serde::Deserialize;
use tracing::debug;

use crate::location::Location;
use crate::matrix::{DistanceMatrix, MatrixError};
use crate::traits::{check_locations, DistanceMatrixProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Distance matrix provider backed by the OSRM `table` service.
///
/// Road-network distances are generally asymmetric (one-way streets, turn
/// restrictions), so matrices from this provider may fail the symmetry
/// check the Christofides solver performs.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[Location]) -> Result<DistanceMatrix, MatrixError> {
        check_locations(locations)?;

        let coords = locations
            .iter()
            .map(|loc| format!("{:.6},{:.6}", loc.lng, loc.lat))
            .collect::<Vec<_>>()
            .join(";");

        let url = format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url, self.config.profile, coords
        );
        debug!(n = locations.len(), "requesting OSRM distance table");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())
            .map_err(|err| MatrixError::Provider(err.to_string()))?;

        let distances = body
            .distances
            .ok_or_else(|| MatrixError::Provider("table response had no distances".to_string()))?;

        if distances.len() != locations.len() {
            return Err(MatrixError::Provider(format!(
                "table returned {} rows for {} locations",
                distances.len(),
                locations.len()
            )));
        }

        // OSRM reports unroutable pairs as null; those become infinity.
        let rows = distances
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|value| value.unwrap_or(f64::INFINITY))
                    .collect()
            })
            .collect();

        DistanceMatrix::from_rows(rows)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    distances: Option<Vec<Vec<Option<f64>>>>,
}
