//! Resolved stop locations.

use serde::{Deserialize, Serialize};

/// A stop to visit: the original address string plus resolved coordinates.
///
/// Produced by a [`crate::traits::CoordinateResolver`] and immutable for the
/// duration of one optimize request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(address: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
        }
    }

    /// Coordinates as a (lat, lng) pair.
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Whether the resolved coordinates are usable.
    pub fn has_valid_coords(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}
