//! The immutable routing model a solve runs against.

use tracing::debug;

use super::{Disjunctions, Registry, ShiftWindow};
use crate::config::{check_non_negative, check_positive, ModelParams};
use crate::distance::{CostMatrix, TimeConversion, TransitEvaluators};
use crate::error::ConfigurationError;
use crate::evaluation::{Dimension, DimensionKind};
use crate::json::{CapacitySpec, JobDescription};

/// Registry, transit functions, dimensions and disjunctions of one job.
///
/// Built once per solve and never mutated afterwards, so a model can be
/// shared between threads.
///
/// # Examples
///
/// ```
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::models::{Registry, RoutingModel};
///
/// let matrix = CostMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]]).unwrap();
/// let registry = Registry::with_index_ids(2, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
///
/// assert_eq!(model.num_nodes(), 2);
/// assert!(model.time_dimension().is_none());
/// assert_eq!(model.objective(&[14.0], &[]), 14.0 + 100.0 * 14.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoutingModel {
    registry: Registry,
    transit: TransitEvaluators,
    distance: Dimension,
    time: Option<Dimension>,
    capacity: Option<Dimension>,
    disjunctions: Disjunctions,
}

impl RoutingModel {
    /// Creates a model with only the distance dimension, using default
    /// ceiling and span cost.
    pub fn new(registry: Registry, transit: TransitEvaluators) -> Self {
        let params = ModelParams::default();
        let distance = distance_dimension(registry.num_vehicles(), &params);
        let disjunctions = Disjunctions::none(registry.num_nodes());
        Self {
            registry,
            transit,
            distance,
            time: None,
            capacity: None,
            disjunctions,
        }
    }

    /// Validates a job description and builds its model.
    pub fn build(job: &JobDescription, params: &ModelParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        let matrix = CostMatrix::from_rows(job.distance_matrix.clone())?;
        let num_nodes = matrix.size();

        let node_ids = match &job.node_ids {
            Some(ids) => {
                expect_len("node_ids", ids.len(), num_nodes)?;
                ids.clone()
            }
            None => (0..num_nodes).map(|i| i.to_string()).collect(),
        };
        let vehicle_ids = match &job.vehicle_ids {
            Some(ids) => {
                expect_len("vehicle_ids", ids.len(), job.num_vehicles)?;
                ids.clone()
            }
            None => (0..job.num_vehicles).map(|v| v.to_string()).collect(),
        };
        let mut registry = Registry::new(node_ids, vehicle_ids, &job.starts, &job.ends)?;
        let num_vehicles = registry.num_vehicles();

        let capacity = match (&job.demands, &job.vehicle_capacity) {
            (Some(demands), Some(spec)) => {
                registry.set_demands(demands)?;
                let capacities = match spec {
                    CapacitySpec::Uniform(c) => vec![*c; num_vehicles],
                    CapacitySpec::PerVehicle(cs) => cs.clone(),
                };
                registry.set_capacities(&capacities)?;
                Some(Dimension::new(
                    DimensionKind::Capacity,
                    0.0,
                    capacities.iter().map(|&c| c as f64).collect(),
                    true,
                ))
            }
            (Some(_), None) => return Err(ConfigurationError::DemandsWithoutCapacity),
            (None, Some(_)) => return Err(ConfigurationError::CapacityWithoutDemands),
            (None, None) => None,
        };

        let unit_to_km = job.distance_unit_to_km.unwrap_or(1.0);
        check_positive("distanceUnitToKm", unit_to_km)?;

        let mut transit = TransitEvaluators::new(matrix);
        let time = match &job.vehicle_shifts {
            Some(raw) => {
                let shifts = raw
                    .iter()
                    .enumerate()
                    .map(|(vehicle, &[earliest, latest])| {
                        ShiftWindow::new(earliest, latest).ok_or(
                            ConfigurationError::InvalidShift {
                                vehicle,
                                earliest,
                                latest,
                            },
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                registry.set_shifts(&shifts)?;
                transit = transit.with_time(TimeConversion {
                    distance_unit_to_km: unit_to_km,
                    speed_kmh: params.vehicle_speed_kmh,
                    service_minutes: params.service_minutes,
                });
                Some(time_dimension(&shifts, params))
            }
            None => None,
        };

        let disjunctions = match job.drop_penalty {
            Some(penalty) => {
                check_non_negative("drop_penalty", penalty)?;
                Disjunctions::for_stops(&registry, penalty)
            }
            None if time.is_some() => Disjunctions::for_stops(&registry, params.drop_penalty),
            None => Disjunctions::none(num_nodes),
        };

        debug!(
            nodes = num_nodes,
            vehicles = num_vehicles,
            stops = registry.stops().count(),
            time = time.is_some(),
            capacity = capacity.is_some(),
            optional = disjunctions.any(),
            "routing model built"
        );

        Ok(Self {
            registry,
            transit,
            distance: distance_dimension(num_vehicles, params),
            time,
            capacity,
            disjunctions,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn transit(&self) -> &TransitEvaluators {
        &self.transit
    }

    pub fn distance_dimension(&self) -> &Dimension {
        &self.distance
    }

    pub fn time_dimension(&self) -> Option<&Dimension> {
        self.time.as_ref()
    }

    pub fn capacity_dimension(&self) -> Option<&Dimension> {
        self.capacity.as_ref()
    }

    /// The dimension of the given kind, if active.
    pub fn dimension(&self, kind: DimensionKind) -> Option<&Dimension> {
        match kind {
            DimensionKind::Distance => Some(&self.distance),
            DimensionKind::Time => self.time.as_ref(),
            DimensionKind::Capacity => self.capacity.as_ref(),
        }
    }

    /// Transit of the arc `from -> to` in the given dimension.
    #[inline]
    pub fn transit_value(&self, kind: DimensionKind, from: usize, to: usize) -> f64 {
        match kind {
            DimensionKind::Distance => self.transit.cost(from, to),
            DimensionKind::Time => self.transit.time(from, to).unwrap_or(0.0),
            DimensionKind::Capacity => self.registry.node(to).demand() as f64,
        }
    }

    pub fn disjunctions(&self) -> &Disjunctions {
        &self.disjunctions
    }

    pub fn num_nodes(&self) -> usize {
        self.registry.num_nodes()
    }

    pub fn num_vehicles(&self) -> usize {
        self.registry.num_vehicles()
    }

    /// Global span cost of the distance dimension.
    ///
    /// Distance starts at zero on every route, so the span is the longest
    /// route's distance.
    pub fn span_cost(&self, route_distances: &[f64]) -> f64 {
        let longest = route_distances.iter().copied().fold(0.0, f64::max);
        self.distance.global_span_cost_coefficient() * longest
    }

    /// Arc costs plus span cost plus the penalties of dropped nodes.
    pub fn objective(&self, route_distances: &[f64], dropped: &[usize]) -> f64 {
        route_distances.iter().sum::<f64>()
            + self.span_cost(route_distances)
            + self.disjunctions.total_penalty(dropped)
    }
}

fn distance_dimension(num_vehicles: usize, params: &ModelParams) -> Dimension {
    Dimension::new(
        DimensionKind::Distance,
        0.0,
        vec![params.distance_ceiling; num_vehicles],
        true,
    )
    .with_global_span_cost(params.span_cost_coefficient)
}

fn time_dimension(shifts: &[ShiftWindow], params: &ModelParams) -> Dimension {
    let mut time = Dimension::new(
        DimensionKind::Time,
        params.time_slack_max,
        vec![params.time_horizon; shifts.len()],
        false,
    );
    for (vehicle, shift) in shifts.iter().enumerate() {
        let (earliest, latest) = (shift.earliest() as f64, shift.latest() as f64);
        time.set_start_range(vehicle, earliest, latest);
        time.set_end_range(vehicle, earliest, latest);
    }
    time
}

fn expect_len(field: &'static str, actual: usize, expected: usize) -> Result<(), ConfigurationError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ConfigurationError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::line_job;

    fn build(job: &JobDescription) -> Result<RoutingModel, ConfigurationError> {
        RoutingModel::build(job, &ModelParams::default())
    }

    #[test]
    fn test_distance_only_model() {
        let m = build(&line_job(4, 2)).expect("valid");
        assert_eq!(m.num_nodes(), 4);
        assert_eq!(m.num_vehicles(), 2);
        assert!(m.time_dimension().is_none());
        assert!(m.capacity_dimension().is_none());
        assert!(!m.disjunctions().any());
        assert_eq!(m.distance_dimension().capacity(1), 2_000_000.0);
        assert_eq!(m.distance_dimension().global_span_cost_coefficient(), 100.0);
    }

    #[test]
    fn test_shifts_enable_time_and_disjunctions() {
        let mut job = line_job(4, 1);
        job.vehicle_shifts = Some(vec![[540, 1080]]);
        let m = build(&job).expect("valid");
        let time = m.time_dimension().expect("time active");
        assert_eq!(time.start_range(0), (540.0, 1080.0));
        assert_eq!(time.end_range(0), (540.0, 1080.0));
        assert!(!time.start_cumul_to_zero());
        assert_eq!(m.disjunctions().penalty(0), None);
        assert_eq!(m.disjunctions().penalty(1), Some(100_000.0));
        assert_eq!(m.transit_value(DimensionKind::Time, 0, 1), 12.0);
    }

    #[test]
    fn test_explicit_drop_penalty_without_shifts() {
        let mut job = line_job(3, 1);
        job.drop_penalty = Some(25.0);
        let m = build(&job).expect("valid");
        assert!(m.time_dimension().is_none());
        assert_eq!(m.disjunctions().penalty(2), Some(25.0));
    }

    #[test]
    fn test_capacity_transit_is_arrival_demand() {
        let mut job = line_job(3, 2);
        job.demands = Some(vec![0, 4, 6]);
        job.vehicle_capacity = Some(CapacitySpec::PerVehicle(vec![10, 5]));
        let m = build(&job).expect("valid");
        let cap = m.capacity_dimension().expect("capacity active");
        assert_eq!(cap.capacity(1), 5.0);
        assert_eq!(m.transit_value(DimensionKind::Capacity, 1, 2), 6.0);
        assert_eq!(m.transit_value(DimensionKind::Capacity, 2, 0), 0.0);
    }

    #[test]
    fn test_demands_require_capacity() {
        let mut job = line_job(3, 1);
        job.demands = Some(vec![0, 1, 1]);
        assert_eq!(
            build(&job).unwrap_err(),
            ConfigurationError::DemandsWithoutCapacity
        );
        job.demands = None;
        job.vehicle_capacity = Some(CapacitySpec::Uniform(3));
        assert_eq!(
            build(&job).unwrap_err(),
            ConfigurationError::CapacityWithoutDemands
        );
    }

    #[test]
    fn test_inverted_shift_rejected() {
        let mut job = line_job(3, 1);
        job.vehicle_shifts = Some(vec![[600, 500]]);
        assert_eq!(
            build(&job).unwrap_err(),
            ConfigurationError::InvalidShift {
                vehicle: 0,
                earliest: 600,
                latest: 500
            }
        );
    }

    #[test]
    fn test_short_starts_rejected() {
        let mut job = line_job(4, 2);
        job.starts = vec![0];
        assert!(matches!(
            build(&job),
            Err(ConfigurationError::LengthMismatch {
                field: "starts",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_unit_rejected() {
        let mut job = line_job(3, 1);
        job.distance_unit_to_km = Some(0.0);
        assert!(matches!(
            build(&job),
            Err(ConfigurationError::InvalidParameter {
                field: "distanceUnitToKm",
                ..
            })
        ));
    }

    #[test]
    fn test_objective_adds_span_and_penalties() {
        let mut job = line_job(4, 2);
        job.drop_penalty = Some(1_000.0);
        let m = build(&job).expect("valid");
        assert_eq!(m.span_cost(&[4.0, 6.0]), 600.0);
        assert_eq!(m.objective(&[4.0, 6.0], &[3]), 10.0 + 600.0 + 1_000.0);
    }

    #[test]
    fn test_model_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RoutingModel>();
    }
}
