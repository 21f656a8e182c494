//! Boundary DTOs matching the frontend contract.
//!
//! The solve response carries, per algorithm, either the ordered address
//! list (closing return included) with its total distance, or an error
//! string. The plot response carries a map URL or an error. Transport is
//! out of scope; these are just the serialisable shapes.

use serde::{Deserialize, Serialize};

use crate::aggregator::ResultSet;
use crate::location::Location;
use crate::render::RouteMapRenderer;
use crate::solver::Algorithm;

/// One per-algorithm entry of the solve response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveEntry {
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to a plot request referencing a previously computed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Projects a result set onto the solve response shape.
///
/// Entries keep the requested order; ranking is the caller's display
/// concern and available via [`ResultSet::ranked`].
pub fn solve_response(set: &ResultSet, locations: &[Location]) -> Vec<SolveEntry> {
    set.all()
        .iter()
        .map(|result| match &result.outcome {
            Ok(tour) => {
                let route = tour
                    .route
                    .closed_order()
                    .into_iter()
                    .map(|index| locations[index].address.clone())
                    .collect();
                SolveEntry {
                    algorithm: result.algorithm,
                    total_distance: Some(tour.total_distance),
                    route: Some(route),
                    error: None,
                }
            }
            Err(err) => SolveEntry {
                algorithm: result.algorithm,
                total_distance: None,
                route: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

/// Resolves a plot-by-algorithm request against a stored result set.
///
/// Nothing is recomputed: the stored route is handed to the renderer as
/// is. A lookup miss or a stored solver failure becomes a response error.
pub fn plot_response<R: RouteMapRenderer>(
    set: &ResultSet,
    algorithm: Algorithm,
    locations: &[Location],
    renderer: &R,
) -> PlotResponse {
    let result = match set.get(algorithm) {
        Ok(result) => result,
        Err(err) => {
            return PlotResponse {
                map_url: None,
                error: Some(err.to_string()),
            };
        }
    };

    let tour = match &result.outcome {
        Ok(tour) => tour,
        Err(err) => {
            return PlotResponse {
                map_url: None,
                error: Some(err.to_string()),
            };
        }
    };

    match renderer.render(&tour.route, locations) {
        Ok(artifact) => PlotResponse {
            map_url: Some(artifact.url),
            error: None,
        },
        Err(err) => PlotResponse {
            map_url: None,
            error: Some(err.to_string()),
        },
    }
}
