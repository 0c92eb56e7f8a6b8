//! Global cheapest insertion.
//!
//! # Algorithm
//!
//! Starts from empty routes (each vehicle driving straight from its start
//! to its end) and repeatedly inserts the pending stop whose cheapest
//! feasible insertion, over every position of every route, raises the
//! objective least. Mandatory stops are placed before optional ones.
//!
//! When no pending stop fits anywhere, the routes are repacked around one
//! stranded stop (see [`repack`](super::repack)). An optional stop is
//! dropped when its cheapest insertion costs more than its penalty, or when
//! repacking cannot place it either. A mandatory stop that repacking proves
//! unplaceable fails construction.
//!
//! # Complexity
//!
//! O(n² × R × m) where n = stops, R = routes, m = route length.
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use tracing::{debug, trace, warn};

use super::repack::{repack, Repack, MANDATORY_BUDGET, OPTIONAL_BUDGET};
use crate::error::RoutingError;
use crate::search::{RoutePlan, SearchContext};

/// The cheapest feasible place for one stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    pub vehicle: usize,
    /// Index in the vehicle's path the stop is inserted at.
    pub position: usize,
    /// Change of the penalized objective.
    pub delta: f64,
    /// The vehicle's path with the stop inserted.
    pub path: Vec<usize>,
}

/// Finds the cheapest feasible insertion of `node` into any route.
pub fn best_insertion(plan: &RoutePlan, ctx: &SearchContext, node: usize) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;

    for vehicle in 0..plan.num_routes() {
        let path = plan.route(vehicle);
        for position in 1..path.len() {
            let (a, b) = (path[position - 1], path[position]);
            let change = ctx.arc_delta(&[(a, b)], &[(a, node), (node, b)]);
            let delta = ctx.move_delta(plan, &[(vehicle, change)], 0.0);
            if best.as_ref().is_some_and(|b| delta >= b.delta) {
                continue;
            }

            let mut candidate = path.to_vec();
            candidate.insert(position, node);
            if ctx.is_feasible(vehicle, &candidate) {
                best = Some(Insertion {
                    vehicle,
                    position,
                    delta,
                    path: candidate,
                });
            }
        }
    }

    best
}

/// Cheapest feasible position for `node` in a vehicle's path, by arc weight.
///
/// Returns the extended path and its weight increase.
pub(crate) fn cheapest_position(
    ctx: &SearchContext,
    vehicle: usize,
    path: &[usize],
    node: usize,
) -> Option<(Vec<usize>, f64)> {
    let mut best: Option<(Vec<usize>, f64)> = None;
    for position in 1..path.len() {
        let (a, b) = (path[position - 1], path[position]);
        let weight = ctx.arc_delta(&[(a, b)], &[(a, node), (node, b)]).weight;
        if best.as_ref().is_some_and(|(_, w)| weight >= *w) {
            continue;
        }
        let mut candidate = path.to_vec();
        candidate.insert(position, node);
        if ctx.is_feasible(vehicle, &candidate) {
            best = Some((candidate, weight));
        }
    }
    best
}

/// Builds a first solution by global cheapest insertion.
///
/// # Errors
///
/// [`RoutingError::NoSolutionFound`] if some vehicle's empty route already
/// breaks its bounds, or a mandatory stop could not be placed within the
/// repacking budget; [`RoutingError::Infeasible`] if no assignment of the
/// mandatory stops to vehicles exists.
///
/// # Examples
///
/// ```
/// use shift_routing::constructive::cheapest_insertion;
/// use shift_routing::distance::{CostMatrix, TransitEvaluators};
/// use shift_routing::models::{Registry, RoutingModel};
/// use shift_routing::search::SearchContext;
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let registry = Registry::with_index_ids(3, 1, &[0], &[0]).unwrap();
/// let model = RoutingModel::new(registry, TransitEvaluators::new(matrix));
///
/// let plan = cheapest_insertion(&SearchContext::new(&model)).unwrap();
/// assert_eq!(plan.num_stops(), 2);
/// assert_eq!(plan.route_distance(0), 4.0);
/// ```
pub fn cheapest_insertion(ctx: &SearchContext) -> Result<RoutePlan, RoutingError> {
    let plan = start_plan(ctx)?;
    let pending = ctx.model().registry().stops().collect();
    let plan = insert_pending(ctx, plan, pending)?;
    debug!(
        objective = ctx.objective(&plan),
        stops = plan.num_stops(),
        dropped = plan.dropped().len(),
        "cheapest insertion built first solution"
    );
    Ok(plan)
}

/// Empty plan, or `NoSolutionFound` if some empty route is infeasible.
pub(crate) fn start_plan(ctx: &SearchContext) -> Result<RoutePlan, RoutingError> {
    let plan = RoutePlan::empty(ctx);
    for vehicle in 0..plan.num_routes() {
        if let Err(violation) = ctx.evaluator().schedule(vehicle, plan.route(vehicle)) {
            warn!(vehicle, %violation, "empty route breaks its bounds");
            return Err(RoutingError::NoSolutionFound);
        }
    }
    Ok(plan)
}

/// Inserts every pending stop, cheapest first, repacking the routes when
/// greedy insertion gets stuck and dropping optional stops that cannot be
/// placed or cost more than their penalty.
pub(crate) fn insert_pending(
    ctx: &SearchContext,
    mut plan: RoutePlan,
    mut pending: Vec<usize>,
) -> Result<RoutePlan, RoutingError> {
    let model = ctx.model();
    let disjunctions = model.disjunctions();

    while !pending.is_empty() {
        let mut choice: Option<(usize, Insertion)> = None;
        for (k, &node) in pending.iter().enumerate() {
            let Some(insertion) = best_insertion(&plan, ctx, node) else {
                continue;
            };
            let better = match &choice {
                None => true,
                Some((c, best)) => {
                    let mandatory = !disjunctions.is_optional(node);
                    let best_mandatory = !disjunctions.is_optional(pending[*c]);
                    (mandatory && !best_mandatory)
                        || (mandatory == best_mandatory && insertion.delta < best.delta)
                }
            };
            if better {
                choice = Some((k, insertion));
            }
        }

        let Some((k, insertion)) = choice else {
            let k = pending
                .iter()
                .position(|&n| !disjunctions.is_optional(n))
                .unwrap_or(0);
            let node = pending.remove(k);
            plan = place_stranded(ctx, plan, node)?;
            continue;
        };

        let node = pending.remove(k);
        match disjunctions.penalty(node) {
            Some(penalty) if insertion.delta > penalty => {
                debug!(node, cost = insertion.delta, penalty, "insertion costs more than dropping");
                plan.drop_node(node);
            }
            _ => {
                trace!(
                    node,
                    vehicle = insertion.vehicle,
                    position = insertion.position,
                    delta = insertion.delta,
                    "stop inserted"
                );
                plan.replace_route(ctx, insertion.vehicle, insertion.path);
            }
        }
    }

    Ok(plan)
}

/// Places a stop no route can absorb by repacking every route, or drops it
/// when it is optional and repacking fails or costs more than its penalty.
fn place_stranded(
    ctx: &SearchContext,
    mut plan: RoutePlan,
    node: usize,
) -> Result<RoutePlan, RoutingError> {
    let model = ctx.model();
    let disjunctions = model.disjunctions();

    let Some(penalty) = disjunctions.penalty(node) else {
        return match repack(ctx, &plan, node, MANDATORY_BUDGET) {
            Repack::Placed(repacked) => {
                debug!(node, "mandatory stop placed by repacking routes");
                Ok(repacked)
            }
            outcome => {
                let node_id = model.registry().node(node).external_id().to_string();
                let only_mandatory = plan
                    .routes()
                    .iter()
                    .flatten()
                    .all(|&n| !disjunctions.is_optional(n));
                if matches!(outcome, Repack::Exhausted)
                    && only_mandatory
                    && model.time_dimension().is_none()
                {
                    warn!(node, %node_id, "mandatory stop fits in no route");
                    Err(RoutingError::Infeasible { node, node_id })
                } else {
                    warn!(node, %node_id, ?outcome, "mandatory stop could not be placed");
                    Err(RoutingError::NoSolutionFound)
                }
            }
        };
    };

    match repack(ctx, &plan, node, OPTIONAL_BUDGET) {
        Repack::Placed(repacked) if ctx.objective(&repacked) < ctx.objective(&plan) + penalty => {
            debug!(node, "optional stop placed by repacking routes");
            Ok(repacked)
        }
        _ => {
            debug!(node, "no feasible insertion, dropping stop");
            plan.drop_node(node);
            Ok(plan)
        }
    }
}
