//! Map rendering boundary.
//!
//! Producing the actual map image is an external collaborator's job; the
//! core resolves a previously computed route into ordered stop geometry
//! and receives back a retrievable artifact reference. `StaticMapUrl` is
//! the in-crate default: it only builds the request URL for a static-map
//! endpoint, it never fetches tiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::route::Route;

/// Reference to a displayable map produced for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArtifact {
    /// Retrievable resource for the frontend to embed.
    pub url: String,
    /// Stops in visiting order, closing return included.
    pub stops: Vec<Location>,
}

/// Map rendering failure.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The route references an index outside the location list.
    IndexOutOfRange { index: usize, locations: usize },
    /// The external renderer rejected or failed the request.
    Renderer(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::IndexOutOfRange { index, locations } => write!(
                f,
                "route index {} out of range for {} locations",
                index, locations
            ),
            RenderError::Renderer(reason) => write!(f, "map renderer failed: {}", reason),
        }
    }
}

impl std::error::Error for RenderError {}

/// Turns a resolved route into a displayable map artifact.
pub trait RouteMapRenderer {
    fn render(&self, route: &Route, locations: &[Location]) -> Result<MapArtifact, RenderError>;
}

/// Orders `locations` by the route, closing return included.
pub fn ordered_stops(
    route: &Route,
    locations: &[Location],
) -> Result<Vec<Location>, RenderError> {
    route
        .closed_order()
        .into_iter()
        .map(|index| {
            locations.get(index).cloned().ok_or(RenderError::IndexOutOfRange {
                index,
                locations: locations.len(),
            })
        })
        .collect()
}

/// URL-building renderer over a static-map HTTP endpoint.
#[derive(Debug, Clone)]
pub struct StaticMapUrl {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
}

impl Default for StaticMapUrl {
    fn default() -> Self {
        Self {
            base_url: "https://staticmap.openstreetmap.de/staticmap.php".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl RouteMapRenderer for StaticMapUrl {
    fn render(&self, route: &Route, locations: &[Location]) -> Result<MapArtifact, RenderError> {
        let stops = ordered_stops(route, locations)?;

        let path = stops
            .iter()
            .map(|stop| format!("{:.6},{:.6}", stop.lat, stop.lng))
            .collect::<Vec<_>>()
            .join("|");

        // One numbered marker per stop; the closing return duplicates the
        // depot and gets no marker of its own.
        let markers = stops[..stops.len() - 1]
            .iter()
            .enumerate()
            .map(|(i, stop)| format!("{:.6},{:.6},lightblue{}", stop.lat, stop.lng, i + 1))
            .collect::<Vec<_>>()
            .join("|");

        let url = format!(
            "{}?size={}x{}&path={}&markers={}",
            self.base_url, self.width, self.height, path, markers
        );

        Ok(MapArtifact { url, stops })
    }
}
