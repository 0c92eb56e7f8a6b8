use crate::config::SolverConfig;
use crate::json::JobDescription;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Nodes on a line at their index, every vehicle based at node 0.
pub fn line_job(num_nodes: usize, num_vehicles: usize) -> JobDescription {
    let positions: Vec<f64> = (0..num_nodes).map(|i| i as f64).collect();
    points_job(&positions, num_vehicles)
}

/// Nodes on a line at the given positions, every vehicle based at node 0.
pub fn points_job(positions: &[f64], num_vehicles: usize) -> JobDescription {
    let matrix = positions
        .iter()
        .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
        .collect();
    matrix_job(matrix, num_vehicles)
}

/// The given matrix, every vehicle based at node 0.
pub fn matrix_job(matrix: Vec<Vec<f64>>, num_vehicles: usize) -> JobDescription {
    JobDescription::new(
        matrix,
        num_vehicles,
        vec![0; num_vehicles],
        vec![0; num_vehicles],
    )
}

/// Default model constants with a short, seeded search.
pub fn solver_config() -> SolverConfig {
    let mut config = SolverConfig::default();
    config.search.time_limit_ms = 200;
    config.search.max_iterations = Some(50);
    config.search.seed = Some(7);
    config
}
