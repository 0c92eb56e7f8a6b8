//! Route evaluator that computes cumulative values and feasibility.

use crate::models::{Route, RoutingModel, Violation, Visit};

use super::DimensionKind;

/// Cumulative values of every active dimension along one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSchedule {
    pub distance: Vec<f64>,
    pub time: Option<Vec<f64>>,
    pub load: Option<Vec<f64>>,
}

impl RouteSchedule {
    /// Distance travelled from start to end.
    pub fn total_distance(&self) -> f64 {
        self.distance.last().copied().unwrap_or(0.0)
    }
}

/// Walks a vehicle's path through every active dimension of a model.
///
/// Paths always hold the full route: the vehicle's start node, its stops,
/// then its end node.
///
/// # Examples
///
/// ```
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::evaluation::RouteEvaluator;
/// use shift_routing::models::{Registry, RoutingModel};
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ])
/// .unwrap();
/// let registry = Registry::with_index_ids(3, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
///
/// let evaluator = RouteEvaluator::new(&model);
/// let schedule = evaluator.schedule(0, &[0, 1, 2, 0]).unwrap();
/// assert_eq!(schedule.distance, vec![0.0, 3.0, 8.0, 12.0]);
/// ```
pub struct RouteEvaluator<'a> {
    model: &'a RoutingModel,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(model: &'a RoutingModel) -> Self {
        Self { model }
    }

    /// Computes the schedule, failing on the first broken bound.
    pub fn schedule(&self, vehicle: usize, path: &[usize]) -> Result<RouteSchedule, Violation> {
        let model = self.model;
        let load = match model.capacity_dimension() {
            Some(d) => Some(d.cumulate(vehicle, path, |i, j| {
                model.transit_value(DimensionKind::Capacity, i, j)
            })?),
            None => None,
        };
        let distance = model.distance_dimension().cumulate(vehicle, path, |i, j| {
            model.transit_value(DimensionKind::Distance, i, j)
        })?;
        let time = match model.time_dimension() {
            Some(d) => Some(d.cumulate(vehicle, path, |i, j| {
                model.transit_value(DimensionKind::Time, i, j)
            })?),
            None => None,
        };

        Ok(RouteSchedule {
            distance,
            time,
            load,
        })
    }

    /// Returns `true` if the path respects every dimension bound.
    pub fn is_feasible(&self, vehicle: usize, path: &[usize]) -> bool {
        self.schedule(vehicle, path).is_ok()
    }

    /// Builds a route with cumulative values, collecting every violation.
    ///
    /// Dimensions that cannot be scheduled leave their cumulative fields
    /// empty on the returned visits.
    pub fn build_route(&self, vehicle: usize, path: &[usize]) -> (Route, Vec<Violation>) {
        let model = self.model;
        let mut violations = Vec::new();
        let mut run = |kind: DimensionKind| -> Option<Vec<f64>> {
            let dimension = model.dimension(kind)?;
            match dimension.cumulate(vehicle, path, |i, j| model.transit_value(kind, i, j)) {
                Ok(c) => Some(c),
                Err(v) => {
                    violations.push(v);
                    None
                }
            }
        };

        let distance = run(DimensionKind::Distance);
        let time = run(DimensionKind::Time);
        let load = run(DimensionKind::Capacity);

        let mut route = Route::new(vehicle);
        let mut travelled = 0.0;
        for (k, &node) in path.iter().enumerate() {
            if k > 0 {
                travelled += model.transit().cost(path[k - 1], node);
            }
            route.push_visit(Visit {
                node,
                distance: distance.as_ref().map_or(travelled, |d| d[k]),
                time: time.as_ref().map(|t| t[k].round() as i64),
                load: load.as_ref().map(|l| l[k].round() as i64),
            });
        }

        (route, violations)
    }

    /// Arc-cost sum along the path.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|arc| self.model.transit().cost(arc[0], arc[1]))
            .sum()
    }
}
