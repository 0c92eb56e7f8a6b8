//! Ejection insertion of dropped stops.
//!
//! A dropped stop enters a route by ejecting one of the route's stops. The
//! ejected stop moves to its cheapest feasible position in another route,
//! or is dropped in turn when it is optional. This frees room a direct
//! re-insertion cannot find, e.g. when every route is at capacity.

use super::{improves, stop_positions, Move, Neighborhood};
use crate::constructive::cheapest_position;
use crate::search::{RoutePlan, SearchContext};

/// Finds the best ejection that brings a dropped stop back.
pub fn best_swap_dropped(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let disjunctions = ctx.model().disjunctions();
    let mut best: Option<Move> = None;

    for &node in plan.dropped() {
        let Some(gain) = disjunctions.penalty(node) else {
            continue;
        };
        for a in 0..plan.num_routes() {
            let route = plan.route(a);
            for i in stop_positions(route) {
                let ejected = route[i];
                let mut shortened = route.to_vec();
                shortened.remove(i);
                let Some((entered, _)) = cheapest_position(ctx, a, &shortened, node) else {
                    continue;
                };
                let a_change = ctx.path_delta(plan, a, &entered);

                for b in (0..plan.num_routes()).filter(|&b| b != a) {
                    let Some((extended, _)) = cheapest_position(ctx, b, plan.route(b), ejected)
                    else {
                        continue;
                    };
                    let b_change = ctx.path_delta(plan, b, &extended);
                    let delta = ctx.move_delta(plan, &[(a, a_change), (b, b_change)], -gain);
                    if improves(&best, delta) {
                        best = Some(Move {
                            neighborhood: Neighborhood::SwapDropped,
                            routes: vec![(a, entered.clone()), (b, extended)],
                            inserted: Some(node),
                            removed: None,
                            delta,
                        });
                    }
                }

                if let Some(loss) = disjunctions.penalty(ejected) {
                    let delta = ctx.move_delta(plan, &[(a, a_change)], loss - gain);
                    if improves(&best, delta) {
                        best = Some(Move {
                            neighborhood: Neighborhood::SwapDropped,
                            routes: vec![(a, entered)],
                            inserted: Some(node),
                            removed: Some(ejected),
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}
