//! Real Las Vegas locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. These are real, routable
//! places that also work against OSRM Nevada data.

use tsp_planner::location::Location;

/// Address string plus resolved coordinates, as a geocoder would return.
pub const STOPS: &[(&str, f64, f64)] = &[
    ("Wynn Las Vegas", 36.1263781, -115.1658180),
    ("MGM Grand", 36.1023654, -115.1688720),
    ("Bellagio", 36.1126, -115.1767),
    ("Caesars Palace", 36.1162, -115.1745),
    ("Hard Rock Cafe", 36.1041592, -115.1722166),
    ("Brooklyn Bowl", 36.1175388, -115.1695094),
    ("Yard House", 36.1177147, -115.1691992),
    ("Gordon Ramsay Steak", 36.1127744, -115.1712029),
    ("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    ("Longhorn Casino", 36.1070664, -115.0591256),
];

/// The first `n` stops as resolved locations, depot first.
pub fn delivery_run(n: usize) -> Vec<Location> {
    STOPS[..n]
        .iter()
        .map(|&(address, lat, lng)| Location::new(address, lat, lng))
        .collect()
}
