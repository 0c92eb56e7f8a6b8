mod common;

use serde_json::json;
use shift_routing::json::{CapacitySpec, JobDescription};
use shift_routing::models::RoutingModel;
use shift_routing::search::FirstSolutionStrategy;
use shift_routing::{ConfigurationError, RoutingError, Solver, SolutionReport};

use common::{assert_valid, config, init_tracing, seventeen_nodes};

fn solve(job: &JobDescription) -> (RoutingModel, Result<shift_routing::Solution, RoutingError>) {
    let config = config();
    let model = RoutingModel::build(job, &config.model).expect("valid job");
    let result = Solver::new(config).solve_model(&model);
    (model, result)
}

#[test]
fn single_vehicle_tour_visits_every_stop() {
    init_tracing();
    let matrix = vec![
        vec![0.0, 2.0, 9.0, 10.0, 7.0, 3.0],
        vec![2.0, 0.0, 6.0, 4.0, 3.0, 5.0],
        vec![9.0, 6.0, 0.0, 8.0, 5.0, 6.0],
        vec![10.0, 4.0, 8.0, 0.0, 6.0, 9.0],
        vec![7.0, 3.0, 5.0, 6.0, 0.0, 4.0],
        vec![3.0, 5.0, 6.0, 9.0, 4.0, 0.0],
    ];
    let job = JobDescription::new(matrix, 1, vec![0], vec![0]);
    let (model, result) = solve(&job);
    let solution = result.expect("feasible");
    assert_valid(&model, &solution);

    let nodes = solution.routes()[0].node_ids();
    assert_eq!(nodes.len(), 7);
    let mut stops = nodes[1..6].to_vec();
    stops.sort_unstable();
    assert_eq!(stops, vec![1, 2, 3, 4, 5]);

    let report = SolutionReport::from_solution(&solution).to_json();
    assert!(report.get("droppedNodes").is_none());
    assert!(report.get("time").is_none());
}

#[test]
fn capacity_overflow_without_drops_is_infeasible() {
    init_tracing();
    let mut job = JobDescription::new(
        (0..6)
            .map(|i| (0..6).map(|j| (i as f64 - j as f64).abs() * 10.0).collect())
            .collect(),
        1,
        vec![0],
        vec![0],
    );
    job.demands = Some(vec![0, 10, 5, 8, 3, 7]);
    job.vehicle_capacity = Some(CapacitySpec::Uniform(15));
    let (_, result) = solve(&job);
    assert!(matches!(result, Err(RoutingError::Infeasible { .. })));
}

#[test]
fn capacity_split_across_vehicles() {
    init_tracing();
    let mut job = JobDescription::new(
        (0..6)
            .map(|i| (0..6).map(|j| (i as f64 - j as f64).abs() * 10.0).collect())
            .collect(),
        3,
        vec![0; 3],
        vec![0; 3],
    );
    job.demands = Some(vec![0, 10, 5, 8, 3, 7]);
    job.vehicle_capacity = Some(CapacitySpec::Uniform(15));
    let (model, result) = solve(&job);
    let solution = result.expect("three vehicles carry 33 units");
    assert_valid(&model, &solution);
    assert!(solution.dropped().is_empty());
}

fn line(n: usize, vehicles: usize) -> JobDescription {
    let matrix = (0..n)
        .map(|i| (0..n).map(|j| (i as f64 - j as f64).abs() * 10.0).collect())
        .collect();
    JobDescription::new(matrix, vehicles, vec![0; vehicles], vec![0; vehicles])
}

#[test]
fn fragmented_capacity_still_packs_mandatory_stops() {
    init_tracing();
    // 4 + 3 + 3 and 5 + 4 is the only way onto two vehicles of 10
    let mut job = line(6, 2);
    job.demands = Some(vec![0, 4, 5, 3, 3, 4]);
    job.vehicle_capacity = Some(CapacitySpec::Uniform(10));
    let (model, result) = solve(&job);
    let solution = result.expect("packable");
    assert_valid(&model, &solution);
    assert_eq!(solution.num_served(), 5);
}

#[test]
fn fragmented_capacity_keeps_optional_stops() {
    init_tracing();
    // 5 + 5 and 2 + 7 serves every stop
    let mut job = line(5, 2);
    job.demands = Some(vec![0, 5, 2, 5, 7]);
    job.vehicle_capacity = Some(CapacitySpec::Uniform(10));
    job.drop_penalty = Some(100_000.0);
    let (model, result) = solve(&job);
    let solution = result.expect("drops allowed");
    assert_valid(&model, &solution);
    assert!(solution.dropped().is_empty());
    assert_eq!(
        SolutionReport::from_solution(&solution).to_json()["droppedNodes"],
        json!([])
    );
}

#[test]
fn unpackable_mandatory_stops_are_infeasible() {
    // 18 units fit the fleet's 20 in total but no stop pair shares a vehicle
    let mut job = line(4, 2);
    job.demands = Some(vec![0, 6, 6, 6]);
    job.vehicle_capacity = Some(CapacitySpec::Uniform(10));
    let (_, result) = solve(&job);
    assert!(matches!(result, Err(RoutingError::Infeasible { .. })));
}

#[test]
fn shifted_fleet_stays_within_shifts() {
    init_tracing();
    let mut job = JobDescription::new(seventeen_nodes(), 4, vec![0; 4], vec![0; 4]);
    job.vehicle_shifts = Some(vec![[540, 1080]; 4]);
    job.distance_unit_to_km = Some(0.01);
    let (model, result) = solve(&job);
    let solution = result.expect("feasible");
    assert_valid(&model, &solution);
    assert!(solution.time_active());

    let report = SolutionReport::from_solution(&solution).to_json();
    assert!(report["droppedNodes"].is_array());
    for v in 0..4 {
        let times = report["time"][v.to_string()].as_array().expect("times per vehicle");
        let first = times[0].as_i64().expect("integer");
        let last = times[times.len() - 1].as_i64().expect("integer");
        assert!((540..=1080).contains(&first));
        assert!((540..=1080).contains(&last));
    }
}

#[test]
fn tight_shift_drops_unreachable_stops() {
    init_tracing();
    let positions = [0.0, 100.0, 200.0, 1_500.0];
    let matrix = positions
        .iter()
        .map(|a: &f64| positions.iter().map(|b| (a - b).abs()).collect())
        .collect();
    let mut job = JobDescription::new(matrix, 1, vec![0], vec![0]);
    // 1 unit = 10 m; the far stop alone needs over an hour
    job.distance_unit_to_km = Some(0.01);
    job.vehicle_shifts = Some(vec![[540, 600]]);
    let (model, result) = solve(&job);
    let solution = result.expect("drops allowed with shifts");
    assert_valid(&model, &solution);
    assert_eq!(solution.dropped(), &[3]);

    let report = SolutionReport::from_solution(&solution).to_json();
    assert_eq!(report["droppedNodes"], json!([3]));
}

#[test]
fn stopless_problem_returns_direct_routes() {
    init_tracing();
    let matrix = vec![vec![0.0, 4.0], vec![4.0, 0.0]];
    let job = JobDescription::new(matrix, 2, vec![0, 1], vec![0, 1]);
    let (model, result) = solve(&job);
    let solution = result.expect("feasible");
    assert_valid(&model, &solution);
    assert_eq!(solution.routes()[0].node_ids(), vec![0, 0]);
    assert_eq!(solution.routes()[1].node_ids(), vec![1, 1]);
    assert_eq!(solution.objective(), 0.0);
    assert_eq!(
        SolutionReport::from_solution(&solution).to_json(),
        json!({ "0": [0, 0], "1": [1, 1] })
    );
}

#[test]
fn open_ended_vehicles_finish_at_their_own_end() {
    init_tracing();
    let positions = [0.0, 10.0, 2.0, 8.0, 4.0, 6.0];
    let matrix = positions
        .iter()
        .map(|a: &f64| positions.iter().map(|b| (a - b).abs()).collect())
        .collect();
    let job = JobDescription::new(matrix, 2, vec![0, 1], vec![1, 0]);
    let (model, result) = solve(&job);
    let solution = result.expect("feasible");
    assert_valid(&model, &solution);
    assert_eq!(solution.num_served(), 4);
}

#[test]
fn short_starts_is_a_configuration_error() {
    let json = r#"{
        "distance_matrix": [[0, 1, 2], [1, 0, 1], [2, 1, 0]],
        "num_vehicles": 2,
        "starts": [0],
        "ends": [0, 0]
    }"#;
    let job = JobDescription::from_json(json).expect("well-formed");
    let result = shift_routing::solve(&job, &config());
    assert_eq!(
        result,
        Err(RoutingError::Configuration(ConfigurationError::LengthMismatch {
            field: "starts",
            expected: 2,
            actual: 1
        }))
    );
}

#[test]
fn malformed_inputs_are_configuration_errors() {
    let cases = [
        r#"{"distance_matrix": [[0, 1], [1]], "num_vehicles": 1, "starts": [0], "ends": [0]}"#,
        r#"{"distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 1, "starts": [2], "ends": [0]}"#,
        r#"{"distance_matrix": [[0, -1], [1, 0]], "num_vehicles": 1, "starts": [0], "ends": [0]}"#,
        r#"{"distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 0, "starts": [], "ends": []}"#,
        r#"{"distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 1, "starts": [0], "ends": [0],
            "vehicle_shifts": [[900, 600]]}"#,
        r#"{"distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 1, "starts": [0], "ends": [0],
            "demands": [0, -3], "vehicle_capacity": 5}"#,
        r#"{"distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 1, "starts": [0], "ends": [0],
            "node_ids": ["a", "a"]}"#,
    ];
    for json in cases {
        let result = JobDescription::from_json(json)
            .map_err(RoutingError::from)
            .and_then(|job| shift_routing::solve(&job, &config()));
        assert!(
            matches!(result, Err(RoutingError::Configuration(_))),
            "{json} gave {result:?}"
        );
    }
}

#[test]
fn path_cheapest_arc_reaches_same_coverage() {
    init_tracing();
    let mut job = JobDescription::new(seventeen_nodes(), 4, vec![0; 4], vec![0; 4]);
    job.vehicle_shifts = Some(vec![[540, 1080]; 4]);
    job.distance_unit_to_km = Some(0.01);
    let mut config = config();
    config.search.first_solution = FirstSolutionStrategy::PathCheapestArc;
    let model = RoutingModel::build(&job, &config.model).expect("valid");
    let solution = Solver::new(config).solve_model(&model).expect("feasible");
    assert_valid(&model, &solution);
}

#[test]
fn external_ids_resolve_routes() {
    let mut job = JobDescription::new(
        vec![vec![0.0, 3.0, 5.0], vec![3.0, 0.0, 4.0], vec![5.0, 4.0, 0.0]],
        2,
        vec![0, 0],
        vec![0, 0],
    );
    job.node_ids = Some(vec!["hub".into(), "north".into(), "south".into()]);
    job.vehicle_ids = Some(vec!["van-a".into(), "van-b".into()]);
    let (model, result) = solve(&job);
    let solution = result.expect("feasible");
    assert_valid(&model, &solution);
    let route = solution
        .route_by_id(model.registry(), "van-b")
        .expect("known vehicle");
    assert_eq!(route.vehicle_id(), 1);
    assert_eq!(model.registry().node_index("south"), Some(2));
}

#[test]
fn repeat_solves_agree() {
    let mut job = JobDescription::new(seventeen_nodes(), 4, vec![0; 4], vec![0; 4]);
    job.vehicle_shifts = Some(vec![[540, 1080]; 4]);
    job.distance_unit_to_km = Some(0.01);
    let (_, first) = solve(&job);
    let (_, second) = solve(&job);
    let (first, second) = (first.expect("feasible"), second.expect("feasible"));
    assert!((first.objective() - second.objective()).abs() <= 1e-6 * first.objective().max(1.0));
}
