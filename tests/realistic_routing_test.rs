//! Realistic balancing runs over Hong Kong locations.
//!
//! Costs come from the straight-line oracle so the full pipeline runs
//! without network access.

mod fixtures;

use route_balancer::geo::RegionSplit;
use route_balancer::haversine::HaversineOracle;
use route_balancer::route::{point_multiset, RouteId};
use route_balancer::solver::{solve, BalancedPlan, SolveOptions};
use route_balancer::Error;

use fixtures::hong_kong_locations::{self as hk, DEPOT};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn run(split: &RegionSplit, options: &SolveOptions) -> BalancedPlan {
    let index = hk::address_index();
    let oracle = HaversineOracle::from_index(&index, (DEPOT.name, DEPOT.point()));

    match solve(split, &index, &oracle, DEPOT.name, options) {
        Ok(plan) => plan,
        Err(Error::ConvergenceLimit { plan, .. }) => *plan,
        Err(err) => panic!("balancing failed: {err}"),
    }
}

fn assert_partition(plan: &BalancedPlan, split: &RegionSplit) {
    let counts = point_multiset(&plan.routes);
    let expected = split.general.len() + split.mandatory.len();
    assert_eq!(counts.values().sum::<usize>(), expected);
    for point in split.general.iter().chain(&split.mandatory) {
        assert_eq!(counts.get(point), Some(&1), "{point} lost or duplicated");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn new_territories_and_kowloon_make_three_routes() {
    let split = RegionSplit::new(hk::points(&hk::general_locations()), Vec::new());
    let plan = run(&split, &SolveOptions::default());

    assert_eq!(plan.routes.len(), 3);
    assert!(!plan.routes.contains_key(&RouteId::MANDATORY));
    assert_partition(&plan, &split);
}

#[test]
fn island_points_form_the_mandatory_route() {
    let split = RegionSplit::new(hk::points(&hk::general_locations()), hk::points(hk::HK_ISLAND));
    let plan = run(&split, &SolveOptions::default());

    assert_eq!(plan.routes.len(), 3);
    assert!(plan.routes.contains_key(&RouteId::MANDATORY));
    assert_partition(&plan, &split);
}

#[test]
fn every_route_is_measured_with_full_sequence() {
    let split = RegionSplit::new(hk::points(&hk::general_locations()), hk::points(hk::HK_ISLAND));
    let plan = run(&split, &SolveOptions::default());

    for (id, route) in &plan.routes {
        let work = route.work.as_ref().unwrap_or_else(|| panic!("{id} not measured"));
        assert_eq!(work.sequence.len(), route.points.len());
        assert_eq!(work.skipped_legs, 0);
        assert_eq!(plan.work_times[id], work.duration_min);
        if !route.is_empty() {
            // Service time alone is at least 20 minutes per stop.
            assert!(work.duration_min >= 20.0);
            assert!(work.distance_km > 0.0);
        }
    }
}

#[test]
fn converged_plan_respects_threshold() {
    let split = RegionSplit::new(hk::points(&hk::general_locations()), Vec::new());
    let options = SolveOptions {
        balance_threshold: 120.0,
        ..SolveOptions::default()
    };
    let index = hk::address_index();
    let oracle = HaversineOracle::from_index(&index, (DEPOT.name, DEPOT.point()));

    match solve(&split, &index, &oracle, DEPOT.name, &options) {
        Ok(plan) => assert!(plan.spread() < 120.0),
        Err(Error::ConvergenceLimit { iterations, spread, .. }) => {
            assert!(spread >= 120.0);
            assert!(iterations <= options.max_iterations);
        }
        Err(err) => panic!("balancing failed: {err}"),
    }
}
