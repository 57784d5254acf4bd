use route_balancer::geo::{AddressIndex, Point, RegionSplit};
use route_balancer::haversine::HaversineOracle;
use route_balancer::route::RouteId;
use route_balancer::solver::{solve, SolveOptions};

const DEPOT: &str = "depot";

#[test]
fn balances_a_small_instance() {
    let points = vec![
        Point::new(114.10, 22.40),
        Point::new(114.11, 22.40),
        Point::new(114.30, 22.30),
        Point::new(114.31, 22.30),
        Point::new(114.20, 22.50),
        Point::new(114.21, 22.50),
    ];
    let names: Vec<String> = (0..points.len()).map(|i| format!("stop {i}")).collect();
    let index = AddressIndex::from_parallel(&points, &names).unwrap();
    let oracle = HaversineOracle::from_index(&index, (DEPOT, Point::new(114.20, 22.40)));

    let split = RegionSplit::new(points, Vec::new());
    let plan = solve(&split, &index, &oracle, DEPOT, &SolveOptions::default()).unwrap();

    assert_eq!(plan.routes.len(), 3);
    for id in [RouteId(0), RouteId(1), RouteId(2)] {
        assert_eq!(plan.routes[&id].len(), 2);
    }
    assert!(plan.spread() < 90.0);
}
