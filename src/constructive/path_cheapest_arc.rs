//! Path-cheapest-arc constructive heuristic.
//!
//! Builds each vehicle's route greedily: starting from the vehicle's start
//! node, repeatedly append the pending stop reached by the cheapest arc
//! from the last stop, skipping stops that would break a bound. Stops no
//! route could absorb this way are finished by cheapest insertion.
//!
//! # Complexity
//!
//! O(n² × R) for the greedy pass, n = stops, R = routes.

use tracing::debug;

use super::cheapest_insertion::{insert_pending, start_plan};
use crate::distance::CostMatrix;
use crate::error::RoutingError;
use crate::search::{RoutePlan, SearchContext};

/// Builds a first solution by extending routes along their cheapest arcs.
///
/// # Errors
///
/// Same as [`cheapest_insertion`](super::cheapest_insertion).
///
/// # Examples
///
/// ```
/// use shift_routing::constructive::path_cheapest_arc;
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::models::{Registry, RoutingModel};
/// use shift_routing::search::SearchContext;
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 5.0, 1.0],
///     vec![5.0, 0.0, 1.0],
///     vec![1.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let registry = Registry::with_index_ids(3, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
///
/// let plan = path_cheapest_arc(&SearchContext::new(&model)).unwrap();
/// assert_eq!(plan.route(0), &[0, 2, 1, 0]);
/// ```
pub fn path_cheapest_arc(ctx: &SearchContext) -> Result<RoutePlan, RoutingError> {
    let mut plan = start_plan(ctx)?;
    let costs = ctx.model().transit().costs();
    let mut pending: Vec<usize> = ctx.model().registry().stops().collect();

    for vehicle in 0..plan.num_routes() {
        while let Some((node, path)) = cheapest_extension(&plan, ctx, costs, vehicle, &pending) {
            pending.retain(|&n| n != node);
            plan.replace_route(ctx, vehicle, path);
        }
    }

    let greedy = plan.num_stops();
    let plan = insert_pending(ctx, plan, pending)?;
    debug!(
        objective = ctx.objective(&plan),
        greedy,
        stops = plan.num_stops(),
        dropped = plan.dropped().len(),
        "path cheapest arc built first solution"
    );
    Ok(plan)
}

/// Nearest pending stop that can be appended before the route's end.
fn cheapest_extension(
    plan: &RoutePlan,
    ctx: &SearchContext,
    costs: &CostMatrix,
    vehicle: usize,
    pending: &[usize],
) -> Option<(usize, Vec<usize>)> {
    let path = plan.route(vehicle);
    let last = path[path.len() - 2];
    let mut candidates = pending.to_vec();

    while let Some(node) = costs.nearest_neighbor(last, &candidates) {
        let mut extended = path.to_vec();
        extended.insert(path.len() - 1, node);
        if ctx.is_feasible(vehicle, &extended) {
            return Some((node, extended));
        }
        candidates.retain(|&n| n != node);
    }
    None
}
