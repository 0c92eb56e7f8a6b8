//! Solver configuration.
//!
//! Every field has a default matching the reference routing setup, so an
//! empty JSON object (or `SolverConfig::default()`) is a complete config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::local_search::Neighborhood;
use crate::search::{FirstSolutionStrategy, Metaheuristic};

/// Constants used while building the routing model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelParams {
    /// Average vehicle speed used to derive travel time.
    pub vehicle_speed_kmh: f64,
    /// Dwell time added to every arc of the time dimension.
    pub service_minutes: f64,
    /// Penalty for dropping a stop when the job does not set one.
    pub drop_penalty: f64,
    /// Weight of the longest route's distance in the objective.
    pub span_cost_coefficient: f64,
    /// Upper bound on any route's cumulative distance.
    pub distance_ceiling: f64,
    /// Upper bound on any cumulative time value.
    pub time_horizon: f64,
    /// Maximum waiting allowed at a single node.
    pub time_slack_max: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            vehicle_speed_kmh: 50.0,
            service_minutes: 10.0,
            drop_penalty: 100_000.0,
            span_cost_coefficient: 100.0,
            distance_ceiling: 2_000_000.0,
            time_horizon: 20_000.0,
            time_slack_max: 0.0,
        }
    }
}

impl ModelParams {
    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        positive("vehicle_speed_kmh", self.vehicle_speed_kmh)?;
        non_negative("service_minutes", self.service_minutes)?;
        non_negative("drop_penalty", self.drop_penalty)?;
        non_negative("span_cost_coefficient", self.span_cost_coefficient)?;
        positive("distance_ceiling", self.distance_ceiling)?;
        positive("time_horizon", self.time_horizon)?;
        non_negative("time_slack_max", self.time_slack_max)
    }
}

/// Search behaviour and termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    pub first_solution: FirstSolutionStrategy,
    pub metaheuristic: Metaheuristic,
    /// Wall-clock budget for the whole solve.
    pub time_limit_ms: u64,
    /// Cap on metaheuristic iterations.
    pub max_iterations: Option<usize>,
    /// Stop after this many iterations without a new best solution.
    pub max_iterations_without_improvement: Option<usize>,
    /// Scales arc penalties against the average arc cost.
    pub penalty_factor: f64,
    /// Seed for neighborhood ordering; random when absent.
    pub seed: Option<u64>,
    /// Neighborhoods explored by local search, in order.
    pub neighborhoods: Vec<Neighborhood>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            first_solution: FirstSolutionStrategy::CheapestInsertion,
            metaheuristic: Metaheuristic::GuidedLocalSearch,
            time_limit_ms: 1_000,
            max_iterations: None,
            max_iterations_without_improvement: None,
            penalty_factor: 0.1,
            seed: None,
            neighborhoods: Neighborhood::ALL.to_vec(),
        }
    }
}

impl SearchParams {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

/// Complete solver configuration.
///
/// # Examples
///
/// ```
/// use shift_routing::SolverConfig;
///
/// let config = SolverConfig::from_json(r#"{ "search": { "time_limit_ms": 250 } }"#).unwrap();
/// assert_eq!(config.search.time_limit_ms, 250);
/// assert_eq!(config.model.vehicle_speed_kmh, 50.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub model: ModelParams,
    pub search: SearchParams,
}

impl SolverConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigurationError::Malformed(e.to_string()))?;
        config.model.validate()?;
        Ok(config)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter { field, value })
    }
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    positive(field, value)
}

pub(crate) fn check_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), ConfigurationError> {
    non_negative(field, value)
}
