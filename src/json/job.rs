//! Job description input.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Vehicle capacity: one value for the whole fleet or one per vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapacitySpec {
    Uniform(i64),
    PerVehicle(Vec<i64>),
}

/// A routing job as submitted by the caller.
///
/// Only the shape is checked on deserialization; value checks (square
/// matrix, index ranges, lengths) happen when the model is built.
///
/// # Examples
///
/// ```
/// use shift_routing::json::JobDescription;
///
/// let job = JobDescription::from_json(
///     r#"{
///         "distance_matrix": [[0, 4], [4, 0]],
///         "num_vehicles": 1,
///         "starts": [0],
///         "ends": [0],
///         "vehicle_shifts": [[540, 1080]],
///         "distanceUnitToKm": 0.01
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(job.num_vehicles, 1);
/// assert_eq!(job.distance_unit_to_km, Some(0.01));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobDescription {
    pub distance_matrix: Vec<Vec<f64>>,
    pub num_vehicles: usize,
    pub starts: Vec<usize>,
    pub ends: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demands: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_capacity: Option<CapacitySpec>,
    /// `[earliest, latest]` per vehicle, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_shifts: Option<Vec<[i64; 2]>>,
    /// Kilometres per matrix distance unit, used to derive travel time.
    #[serde(
        rename = "distanceUnitToKm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_unit_to_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_ids: Option<Vec<String>>,
    /// Makes every stop optional at this penalty, shifts or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_penalty: Option<f64>,
}

impl JobDescription {
    /// A job with only the required fields set.
    pub fn new(
        distance_matrix: Vec<Vec<f64>>,
        num_vehicles: usize,
        starts: Vec<usize>,
        ends: Vec<usize>,
    ) -> Self {
        Self {
            distance_matrix,
            num_vehicles,
            starts,
            ends,
            demands: None,
            vehicle_capacity: None,
            vehicle_shifts: None,
            distance_unit_to_km: None,
            node_ids: None,
            vehicle_ids: None,
            drop_penalty: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_job() {
        let job = JobDescription::from_json(
            r#"{"distance_matrix": [[0]], "num_vehicles": 1, "starts": [0], "ends": [0]}"#,
        )
        .expect("valid");
        assert_eq!(job, JobDescription::new(vec![vec![0.0]], 1, vec![0], vec![0]));
    }

    #[test]
    fn test_capacity_scalar_or_list() {
        let base = r#""distance_matrix": [[0, 1], [1, 0]], "num_vehicles": 2,
                      "starts": [0, 0], "ends": [0, 0], "demands": [0, 3]"#;
        let uniform =
            JobDescription::from_json(&format!("{{{base}, \"vehicle_capacity\": 5}}"))
                .expect("valid");
        assert_eq!(uniform.vehicle_capacity, Some(CapacitySpec::Uniform(5)));
        let listed =
            JobDescription::from_json(&format!("{{{base}, \"vehicle_capacity\": [5, 7]}}"))
                .expect("valid");
        assert_eq!(
            listed.vehicle_capacity,
            Some(CapacitySpec::PerVehicle(vec![5, 7]))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = JobDescription::from_json(
            r#"{"distance_matrix": [[0]], "num_vehicles": 1, "starts": [0], "ends": [0],
                "depot": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::Malformed(m) if m.contains("depot")));
    }

    #[test]
    fn test_negative_start_rejected() {
        assert!(JobDescription::from_json(
            r#"{"distance_matrix": [[0]], "num_vehicles": 1, "starts": [-1], "ends": [0]}"#,
        )
        .is_err());
    }

    #[test]
    fn test_missing_required_field() {
        assert!(matches!(
            JobDescription::from_json(r#"{"distance_matrix": [[0]], "num_vehicles": 1}"#),
            Err(ConfigurationError::Malformed(_))
        ));
    }
}
