#![allow(dead_code)]

use shift_routing::json::JobDescription;
use shift_routing::models::RoutingModel;
use shift_routing::{Solution, SolverConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Default model constants with a short, seeded, iteration-capped search.
pub fn config() -> SolverConfig {
    let mut config = SolverConfig::default();
    config.search.time_limit_ms = 5_000;
    config.search.max_iterations = Some(20);
    config.search.seed = Some(2024);
    config
}

/// Distance matrix of the 17-location example fleet.
pub fn seventeen_nodes() -> Vec<Vec<f64>> {
    let rows: [[u32; 17]; 17] = [
        [0, 548, 776, 696, 582, 274, 502, 194, 308, 194, 536, 502, 388, 354, 468, 776, 662],
        [548, 0, 684, 308, 194, 502, 730, 354, 696, 742, 1084, 594, 480, 674, 1016, 868, 1210],
        [776, 684, 0, 992, 878, 502, 274, 810, 468, 742, 400, 1278, 1164, 1130, 788, 1552, 754],
        [696, 308, 992, 0, 114, 650, 878, 502, 844, 890, 1232, 514, 628, 822, 1164, 560, 1358],
        [582, 194, 878, 114, 0, 536, 764, 388, 730, 776, 1118, 400, 514, 708, 1050, 674, 1244],
        [274, 502, 502, 650, 536, 0, 228, 308, 194, 240, 582, 776, 662, 628, 514, 1050, 708],
        [502, 730, 274, 878, 764, 228, 0, 536, 194, 468, 354, 1004, 890, 856, 514, 1278, 480],
        [194, 354, 810, 502, 388, 308, 536, 0, 342, 388, 730, 468, 354, 320, 662, 742, 856],
        [308, 696, 468, 844, 730, 194, 194, 342, 0, 274, 388, 810, 696, 662, 320, 1084, 514],
        [194, 742, 742, 890, 776, 240, 468, 388, 274, 0, 342, 536, 422, 388, 274, 810, 468],
        [536, 1084, 400, 1232, 1118, 582, 354, 730, 388, 342, 0, 878, 764, 730, 388, 1152, 354],
        [502, 594, 1278, 514, 400, 776, 1004, 468, 810, 536, 878, 0, 114, 308, 650, 274, 844],
        [388, 480, 1164, 628, 514, 662, 890, 354, 696, 422, 764, 114, 0, 194, 536, 388, 730],
        [354, 674, 1130, 822, 708, 628, 856, 320, 662, 388, 730, 308, 194, 0, 342, 422, 536],
        [468, 1016, 788, 1164, 1050, 514, 514, 662, 320, 274, 388, 650, 536, 342, 0, 764, 194],
        [776, 868, 1552, 560, 674, 1050, 1278, 742, 1084, 810, 1152, 274, 388, 422, 764, 0, 798],
        [662, 1210, 754, 1358, 1244, 708, 480, 856, 514, 468, 354, 844, 730, 536, 194, 798, 0],
    ];
    rows.iter()
        .map(|r| r.iter().map(|&d| f64::from(d)).collect())
        .collect()
}

/// Checks every hard invariant of a returned solution.
pub fn assert_valid(model: &RoutingModel, solution: &Solution) {
    let registry = model.registry();
    let mut seen = vec![0usize; model.num_nodes()];

    assert_eq!(solution.num_routes(), model.num_vehicles());
    for route in solution.routes() {
        let vehicle = registry.vehicle(route.vehicle_id());
        let nodes = route.node_ids();
        assert_eq!(nodes.first(), Some(&vehicle.start()));
        assert_eq!(nodes.last(), Some(&vehicle.end()));
        for &n in &nodes[1..nodes.len() - 1] {
            assert!(!registry.is_depot(n), "depot {n} routed as a stop");
            seen[n] += 1;
        }

        if let (Some(capacity), Some(_)) = (vehicle.capacity(), model.capacity_dimension()) {
            let mut load = 0;
            for &n in &nodes {
                load += registry.node(n).demand();
                assert!(load <= capacity, "load {load} over capacity {capacity}");
            }
        }

        if let Some(shift) = vehicle.shift() {
            let times = route.times().expect("time active");
            assert!(shift.contains(times[0]), "start {} outside shift", times[0]);
            let end = times[times.len() - 1];
            assert!(shift.contains(end), "end {end} outside shift");
            assert!(times.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    for stop in registry.stops() {
        let dropped = solution.dropped().contains(&stop);
        assert!(seen[stop] <= 1, "stop {stop} routed twice");
        if dropped {
            assert_eq!(seen[stop], 0, "stop {stop} both routed and dropped");
            assert!(model.disjunctions().is_optional(stop));
        } else {
            assert_eq!(seen[stop], 1, "stop {stop} missing");
        }
    }
}

/// Returns `true` if the stop demands fit into the vehicle capacities,
/// by exhaustive search.
pub fn packable(demands: &[i64], capacities: &[i64]) -> bool {
    fn place(items: &[i64], free: &mut [i64]) -> bool {
        let Some((&item, rest)) = items.split_first() else {
            return true;
        };
        for v in 0..free.len() {
            if free[v] >= item && !free[..v].contains(&free[v]) {
                free[v] -= item;
                let done = place(rest, free);
                free[v] += item;
                if done {
                    return true;
                }
            }
        }
        false
    }

    let mut items = demands.to_vec();
    items.sort_unstable_by(|a, b| b.cmp(a));
    place(&items, &mut capacities.to_vec())
}
