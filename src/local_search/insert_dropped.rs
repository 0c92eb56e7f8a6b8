//! Re-insertion of dropped stops.
//!
//! A dropped stop is worth routing again once its cheapest feasible
//! insertion costs less than its drop penalty.

use super::{improves, Move, Neighborhood};
use crate::constructive::best_insertion;
use crate::search::{RoutePlan, SearchContext};

/// Finds the dropped stop whose re-insertion lowers the objective most.
pub fn best_reinsertion(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let disjunctions = ctx.model().disjunctions();
    let mut best: Option<Move> = None;

    for &node in plan.dropped() {
        let Some(penalty) = disjunctions.penalty(node) else {
            continue;
        };
        let Some(insertion) = best_insertion(plan, ctx, node) else {
            continue;
        };
        let delta = insertion.delta - penalty;
        if improves(&best, delta) {
            best = Some(Move {
                neighborhood: Neighborhood::InsertDropped,
                routes: vec![(insertion.vehicle, insertion.path)],
                inserted: Some(node),
                removed: None,
                delta,
            });
        }
    }

    best
}
