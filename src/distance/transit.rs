//! Transit evaluators: arc cost and derived travel time.

use super::CostMatrix;

/// Converts matrix distances into whole minutes of travel plus service.
///
/// `minutes = ceil(distance × distance_unit_to_km / speed_kmh × 60 + service_minutes)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConversion {
    pub distance_unit_to_km: f64,
    pub speed_kmh: f64,
    pub service_minutes: f64,
}

impl TimeConversion {
    /// Travel time for one arc, service at the origin included.
    pub fn minutes(&self, distance: f64) -> f64 {
        let km = distance * self.distance_unit_to_km;
        (km / self.speed_kmh * 60.0 + self.service_minutes).ceil()
    }
}

/// Pure, total transit functions over `0..N × 0..N`.
///
/// `cost` is the primary objective (and the distance dimension's transit);
/// `time` feeds the time dimension and is only present when a conversion
/// was configured. Self-pairs are zero for both.
///
/// # Examples
///
/// ```
/// use shift_routing::distance::{CostMatrix, TimeConversion, TransitEvaluators};
///
/// let matrix = CostMatrix::from_rows(vec![vec![0.0, 25.0], vec![25.0, 0.0]]).unwrap();
/// let transit = TransitEvaluators::new(matrix).with_time(TimeConversion {
///     distance_unit_to_km: 1.0,
///     speed_kmh: 50.0,
///     service_minutes: 10.0,
/// });
/// assert_eq!(transit.cost(0, 1), 25.0);
/// assert_eq!(transit.time(0, 1), Some(40.0)); // 30 min driving + 10 min service
/// assert_eq!(transit.time(1, 1), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct TransitEvaluators {
    costs: CostMatrix,
    times: Option<CostMatrix>,
}

impl TransitEvaluators {
    pub fn new(costs: CostMatrix) -> Self {
        Self { costs, times: None }
    }

    /// Precomputes the time matrix from the cost matrix.
    pub fn with_time(mut self, conversion: TimeConversion) -> Self {
        let costs = &self.costs;
        self.times = Some(CostMatrix::from_fn(costs.size(), |i, j| {
            conversion.minutes(costs.get(i, j))
        }));
        self
    }

    /// Number of nodes covered by the evaluators.
    pub fn size(&self) -> usize {
        self.costs.size()
    }

    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs.get(from, to)
    }

    #[inline]
    pub fn time(&self, from: usize, to: usize) -> Option<f64> {
        self.times.as_ref().map(|t| t.get(from, to))
    }

    pub fn has_time(&self) -> bool {
        self.times.is_some()
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }
}
