//! Solution and violation types.

use std::fmt;

use super::{Registry, Route};
use crate::evaluation::DimensionKind;

/// How a route breaks one of its dimension bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A cumulative value rose above the dimension's per-vehicle capacity.
    CapacityExceeded {
        /// Node at which the bound was first exceeded.
        node: usize,
        value: f64,
        limit: f64,
    },
    /// The start cumulative value cannot be placed inside its allowed range.
    StartOutsideRange { earliest: f64, latest: f64 },
    /// The end cumulative value falls outside its allowed range.
    EndOutsideRange {
        value: f64,
        earliest: f64,
        latest: f64,
    },
}

/// A dimension bound broken by one vehicle's route.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub vehicle: usize,
    pub dimension: DimensionKind,
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(vehicle: usize, dimension: DimensionKind, kind: ViolationType) -> Self {
        Self {
            vehicle,
            dimension,
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationType::CapacityExceeded { node, value, limit } => write!(
                f,
                "vehicle {}: {} reaches {} at node {} (limit {})",
                self.vehicle, self.dimension, value, node, limit
            ),
            ViolationType::StartOutsideRange { earliest, latest } => write!(
                f,
                "vehicle {}: {} cannot start within [{}, {}]",
                self.vehicle, self.dimension, earliest, latest
            ),
            ViolationType::EndOutsideRange {
                value,
                earliest,
                latest,
            } => write!(
                f,
                "vehicle {}: {} ends at {} outside [{}, {}]",
                self.vehicle, self.dimension, value, earliest, latest
            ),
        }
    }
}

/// An accepted assignment of stops to vehicles.
///
/// Holds one route per vehicle (in vehicle order, unused vehicles included
/// as `[start, end]`) and the stops left out through their disjunction.
///
/// # Examples
///
/// ```
/// use shift_routing::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new(0));
/// sol.add_dropped(4);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.dropped(), &[4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solution {
    routes: Vec<Route>,
    dropped: Vec<usize>,
    objective: f64,
    time_active: bool,
    drops_allowed: bool,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Records a stop omitted from every route.
    pub fn add_dropped(&mut self, node: usize) {
        self.dropped.push(node);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route of the given vehicle.
    pub fn route(&self, vehicle: usize) -> Option<&Route> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle)
    }

    /// Route of the vehicle with the given external identifier.
    pub fn route_by_id(&self, registry: &Registry, vehicle_id: &str) -> Option<&Route> {
        registry.vehicle_index(vehicle_id).and_then(|v| self.route(v))
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Stops left unrouted, ascending.
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    /// Objective value: arc costs, span cost and drop penalties.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn set_objective(&mut self, objective: f64) {
        self.objective = objective;
    }

    /// Returns `true` if visits carry cumulative times.
    pub fn time_active(&self) -> bool {
        self.time_active
    }

    pub fn set_time_active(&mut self, active: bool) {
        self.time_active = active;
    }

    /// Returns `true` if the model allowed stops to be dropped.
    pub fn drops_allowed(&self) -> bool {
        self.drops_allowed
    }

    pub fn set_drops_allowed(&mut self, allowed: bool) {
        self.drops_allowed = allowed;
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Longest single route.
    pub fn max_route_distance(&self) -> f64 {
        self.routes
            .iter()
            .map(|r| r.total_distance())
            .fold(0.0, f64::max)
    }

    /// Number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.num_stops()).sum()
    }

    /// Number of vehicles that serve at least one stop.
    pub fn num_used_vehicles(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective: {}", self.objective)?;
        write!(f, "Dropped nodes:")?;
        for node in &self.dropped {
            write!(f, " {node}")?;
        }
        writeln!(f)?;
        for route in &self.routes {
            write!(f, "Route for vehicle {}:", route.vehicle_id())?;
            for visit in route.visits() {
                match visit.time {
                    Some(t) => write!(f, " {} (t={t})", visit.node)?,
                    None => write!(f, " {}", visit.node)?,
                }
            }
            writeln!(f)?;
            writeln!(f, "Distance of the route: {}", route.total_distance())?;
        }
        write!(f, "Maximum of the route distances: {}", self.max_route_distance())
    }
}
