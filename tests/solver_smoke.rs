use tsp_planner::aggregator::run_all;
use tsp_planner::api::solve_response;
use tsp_planner::haversine::HaversineMatrix;
use tsp_planner::location::Location;
use tsp_planner::solver::{Algorithm, SolveOptions};
use tsp_planner::traits::DistanceMatrixProvider;

#[test]
fn end_to_end_solve_produces_ranked_address_routes() {
    let locations = vec![
        Location::new("depot", 36.1023654, -115.1688720),
        Location::new("bellagio", 36.1126, -115.1767),
        Location::new("wynn", 36.1263781, -115.1658180),
        Location::new("caesars", 36.1162, -115.1745),
    ];

    let matrix = HaversineMatrix::new().matrix_for(&locations).unwrap();
    let set = run_all(&matrix, &Algorithm::ALL, &SolveOptions::default());

    // Haversine is symmetric, so all three solvers must succeed.
    assert!(set.errors().is_empty());

    let best = set.best().expect("at least one success");
    let ranked = set.ranked();
    assert_eq!(best.algorithm, ranked[0].algorithm);

    let entries = solve_response(&set, &locations);
    assert_eq!(entries.len(), 3);
    for entry in &entries {
        let route = entry.route.as_ref().expect("successful entry");
        assert_eq!(route.first().map(String::as_str), Some("depot"));
        assert_eq!(route.last().map(String::as_str), Some("depot"));
        assert_eq!(route.len(), locations.len() + 1);
    }
}
