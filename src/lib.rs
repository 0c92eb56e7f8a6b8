//! # shift-routing
//!
//! Vehicle routing engine for fleets where every vehicle has its own start
//! and end node, an optional load capacity and an optional working shift.
//! Stops that cannot be served within the shifts may be dropped at a
//! penalty. A first plan is built by cheapest insertion and improved by
//! guided local search under a wall-clock budget.
//!
//! ## Modules
//!
//! - [`json`] — Job description input and solution report output
//! - [`config`] — Solver configuration with defaults
//! - [`models`] — Domain model types (Node, Vehicle, Registry, RoutingModel, Solution)
//! - [`distance`] — Cost matrix and transit (cost and time) evaluators
//! - [`evaluation`] — Cumulative dimensions and route feasibility
//! - [`constructive`] — First-solution heuristics (cheapest insertion, path cheapest arc)
//! - [`local_search`] — Neighborhoods (relocate, exchange, 2-opt, Or-opt, 2-opt*, re-insertion)
//! - [`search`] — Search context, strategies and the [`Solver`]
//! - [`extract`] — Solution extraction
//!
//! ## Example
//!
//! ```
//! use shift_routing::json::JobDescription;
//! use shift_routing::SolverConfig;
//!
//! let job = JobDescription::from_json(
//!     r#"{
//!         "distance_matrix": [[0, 3, 4], [3, 0, 5], [4, 5, 0]],
//!         "num_vehicles": 2,
//!         "starts": [0, 0],
//!         "ends": [0, 0],
//!         "vehicle_shifts": [[540, 1080], [540, 1080]]
//!     }"#,
//! )
//! .unwrap();
//! let mut config = SolverConfig::default();
//! config.search.time_limit_ms = 50;
//!
//! let report = shift_routing::solve(&job, &config).unwrap();
//! let json = report.to_json();
//! assert_eq!(json["droppedNodes"], serde_json::json!([]));
//! assert_eq!(json["0"][0], 0);
//! assert_eq!(json["time"]["1"][0], 540);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod extract;
pub mod json;
pub mod local_search;
pub mod models;
pub mod search;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::SolverConfig;
pub use error::{ConfigurationError, RoutingError};
pub use json::{JobDescription, SolutionReport};
pub use models::Solution;
pub use search::Solver;

/// Solves a job and returns the caller-facing report.
pub fn solve(job: &JobDescription, config: &SolverConfig) -> Result<SolutionReport, RoutingError> {
    let solution = Solver::new(config.clone()).solve(job)?;
    Ok(SolutionReport::from_solution(&solution))
}
