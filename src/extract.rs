//! Solution extraction from a finished plan.

use crate::evaluation::RouteEvaluator;
use crate::models::{RoutingModel, Solution};
use crate::search::RoutePlan;

/// Reads routes, cumulative values and dropped stops out of a plan.
///
/// Pure read. An empty plan gives a solution with no routes.
///
/// # Examples
///
/// ```
/// use shift_routing::extract::extract;
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::models::{Registry, RoutingModel};
/// use shift_routing::search::{RoutePlan, SearchContext};
///
/// let matrix = CostMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap();
/// let registry = Registry::with_index_ids(2, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
/// let ctx = SearchContext::new(&model);
///
/// let solution = extract(&model, &RoutePlan::from_routes(&ctx, vec![vec![0, 1, 0]], vec![]));
/// assert_eq!(solution.routes()[0].node_ids(), vec![0, 1, 0]);
/// assert_eq!(solution.total_distance(), 10.0);
///
/// assert_eq!(extract(&model, &RoutePlan::default()).num_routes(), 0);
/// ```
pub fn extract(model: &RoutingModel, plan: &RoutePlan) -> Solution {
    let evaluator = RouteEvaluator::new(model);
    let mut solution = Solution::new();
    solution.set_time_active(model.time_dimension().is_some());
    solution.set_drops_allowed(model.disjunctions().any());

    for (vehicle, path) in plan.routes().iter().enumerate() {
        let (route, _) = evaluator.build_route(vehicle, path);
        solution.add_route(route);
    }

    let mut dropped = plan.dropped().to_vec();
    dropped.sort_unstable();
    for node in dropped {
        solution.add_dropped(node);
    }

    solution.set_objective(model.objective(plan.distances(), plan.dropped()));
    solution
}
