//! tsp-planner core
//!
//! Multi-algorithm TSP solving: distance matrix construction, three
//! independent tour solvers, and result aggregation/ranking.

pub mod traits;
pub mod location;
pub mod matrix;
pub mod haversine;
pub mod osrm;
pub mod route;
pub mod two_opt;
pub mod greedy;
pub mod christofides;
pub mod exact;
pub mod solver;
pub mod aggregator;
pub mod render;
pub mod api;
