//! Route and visit types.

/// A single node visit within a route, with the cumulative value of every
/// active dimension on arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Node index being visited.
    pub node: usize,
    /// Cumulative distance from the route start.
    pub distance: f64,
    /// Cumulative time, when the time dimension is active.
    pub time: Option<i64>,
    /// Cumulative load, when the capacity dimension is active.
    pub load: Option<i64>,
}

/// The ordered node sequence of one vehicle, start and end included.
///
/// # Examples
///
/// ```
/// use shift_routing::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit { node: 0, distance: 0.0, time: Some(540), load: None });
/// route.push_visit(Visit { node: 3, distance: 12.0, time: Some(560), load: None });
/// route.push_visit(Visit { node: 0, distance: 20.0, time: Some(575), load: None });
/// assert_eq!(route.node_ids(), vec![0, 3, 0]);
/// assert_eq!(route.num_stops(), 1);
/// assert_eq!(route.total_distance(), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_id: usize,
    visits: Vec<Visit>,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            visits: Vec::new(),
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Visits from start to end inclusive.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Node indices in visit order, start and end included.
    pub fn node_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.node).collect()
    }

    /// Cumulative times in visit order, if the time dimension is active.
    pub fn times(&self) -> Option<Vec<i64>> {
        self.visits.iter().map(|v| v.time).collect()
    }

    /// Number of stops served, depots excluded.
    pub fn num_stops(&self) -> usize {
        self.visits.len().saturating_sub(2)
    }

    /// Returns `true` if the vehicle goes straight from start to end.
    pub fn is_empty(&self) -> bool {
        self.num_stops() == 0
    }

    /// Distance travelled from start to end.
    pub fn total_distance(&self) -> f64 {
        self.visits.last().map_or(0.0, |v| v.distance)
    }

    /// Time elapsed between leaving the start and reaching the end.
    pub fn duration(&self) -> Option<i64> {
        let first = self.visits.first()?.time?;
        let last = self.visits.last()?.time?;
        Some(last - first)
    }

    /// Load carried on arrival at the end.
    pub fn total_load(&self) -> Option<i64> {
        self.visits.last().and_then(|v| v.load)
    }
}
