//! Removal of optional stops.
//!
//! Drops a routed stop when the savings of the route it leaves exceed the
//! stop's penalty, e.g. a far stop stretching the longest route.

use super::{improves, stop_positions, Move, Neighborhood};
use crate::search::{RoutePlan, SearchContext};

/// Finds the routed optional stop whose removal lowers the objective most.
pub fn best_removal(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let disjunctions = ctx.model().disjunctions();
    let mut best: Option<Move> = None;

    for v in 0..plan.num_routes() {
        let route = plan.route(v);
        for i in stop_positions(route) {
            let node = route[i];
            let Some(penalty) = disjunctions.penalty(node) else {
                continue;
            };
            let (prev, next) = (route[i - 1], route[i + 1]);
            let change = ctx.arc_delta(&[(prev, node), (node, next)], &[(prev, next)]);
            let delta = ctx.move_delta(plan, &[(v, change)], penalty);
            if !improves(&best, delta) {
                continue;
            }

            let mut path = route.to_vec();
            path.remove(i);
            if ctx.is_feasible(v, &path) {
                best = Some(Move {
                    neighborhood: Neighborhood::RemoveStop,
                    routes: vec![(v, path)],
                    inserted: None,
                    removed: Some(node),
                    delta,
                });
            }
        }
    }

    best
}
