//! Working solution representation for construction and local search.
//!
//! Routes are stored as full node paths (`[start, stops.., end]`) per
//! vehicle with a separate list of dropped stops. Per-route arc cost and
//! penalized arc weight are cached so moves can be scored by delta.

use super::SearchContext;
use crate::local_search::Move;

/// Mutable routing plan: one path per vehicle plus dropped stops.
///
/// # Examples
///
/// ```
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::models::{Registry, RoutingModel};
/// use shift_routing::search::{RoutePlan, SearchContext};
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 3.0],
///     vec![2.0, 0.0, 4.0],
///     vec![3.0, 4.0, 0.0],
/// ])
/// .unwrap();
/// let registry = Registry::with_index_ids(3, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
/// let ctx = SearchContext::new(&model);
///
/// let plan = RoutePlan::from_routes(&ctx, vec![vec![0, 1, 2, 0]], vec![]);
/// assert_eq!(plan.route_distance(0), 9.0);
/// assert_eq!(plan.num_stops(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoutePlan {
    routes: Vec<Vec<usize>>,
    dropped: Vec<usize>,
    distances: Vec<f64>,
    weights: Vec<f64>,
}

impl RoutePlan {
    /// Every vehicle travels straight from its start to its end.
    pub fn empty(ctx: &SearchContext) -> Self {
        let routes = ctx
            .model()
            .registry()
            .vehicles()
            .iter()
            .map(|v| vec![v.start(), v.end()])
            .collect();
        Self::from_routes(ctx, routes, Vec::new())
    }

    /// Creates a plan from full paths and dropped stops.
    pub fn from_routes(ctx: &SearchContext, routes: Vec<Vec<usize>>, dropped: Vec<usize>) -> Self {
        let distances = routes.iter().map(|r| ctx.path_cost(r)).collect();
        let weights = routes.iter().map(|r| ctx.path_weight(r)).collect();
        Self {
            routes,
            dropped,
            distances,
            weights,
        }
    }

    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Full path of the given vehicle.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.routes[vehicle]
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Stops currently left out of every route.
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    /// Arc-cost sum of every route.
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn route_distance(&self, vehicle: usize) -> f64 {
        self.distances[vehicle]
    }

    /// Arc-cost sum of the route with guided-search penalties added.
    pub fn route_weight(&self, vehicle: usize) -> f64 {
        self.weights[vehicle]
    }

    pub fn max_distance(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    /// Number of stops served across all routes.
    pub fn num_stops(&self) -> usize {
        self.routes.iter().map(|r| r.len().saturating_sub(2)).sum()
    }

    /// Returns `true` if `node` is served as a stop on some route.
    pub fn serves(&self, node: usize) -> bool {
        self.routes
            .iter()
            .any(|r| r.len() > 2 && r[1..r.len() - 1].contains(&node))
    }

    /// Replaces a vehicle's path, refreshing its cached sums.
    pub fn replace_route(&mut self, ctx: &SearchContext, vehicle: usize, path: Vec<usize>) {
        self.distances[vehicle] = ctx.path_cost(&path);
        self.weights[vehicle] = ctx.path_weight(&path);
        self.routes[vehicle] = path;
    }

    /// Records a stop as dropped.
    pub fn drop_node(&mut self, node: usize) {
        if !self.dropped.contains(&node) {
            self.dropped.push(node);
        }
    }

    /// Applies a scored move.
    pub fn apply(&mut self, ctx: &SearchContext, mv: Move) {
        for (vehicle, path) in mv.routes {
            self.replace_route(ctx, vehicle, path);
        }
        if let Some(node) = mv.inserted {
            self.dropped.retain(|&n| n != node);
        }
        if let Some(node) = mv.removed {
            self.drop_node(node);
        }
    }

    /// Recomputes penalized weights after the penalties changed.
    pub fn refresh_weights(&mut self, ctx: &SearchContext) {
        self.weights = self.routes.iter().map(|r| ctx.path_weight(r)).collect();
    }
}
