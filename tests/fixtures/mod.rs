//! Test fixtures for tsp-planner.
//!
//! Real Las Vegas delivery-style stops (coordinates from OpenStreetMap)
//! for realistic haversine and OSRM matrix tests.

pub mod las_vegas_locations;

pub use las_vegas_locations::*;
