//! Inter-route stop relocation.
//!
//! # Algorithm
//!
//! Tries moving each stop from its current route to every position of
//! every other route. The removal and insertion are scored by arc delta;
//! only candidates that beat the best so far are checked against the
//! dimension bounds of both routes.
//!
//! # Complexity
//!
//! O(n² × R) candidates per pass, n = stops, R = routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{improves, stop_positions, Move, Neighborhood};
use crate::search::{RoutePlan, SearchContext};

/// Finds the best improving relocation of one stop to another route.
pub fn best_relocate(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let mut best: Option<Move> = None;

    for from in 0..plan.num_routes() {
        let source = plan.route(from);
        for i in stop_positions(source) {
            let (prev, node, next) = (source[i - 1], source[i], source[i + 1]);
            let removal = ctx.arc_delta(&[(prev, node), (node, next)], &[(prev, next)]);

            for to in 0..plan.num_routes() {
                if to == from {
                    continue;
                }
                let target = plan.route(to);
                for j in 1..target.len() {
                    let (a, b) = (target[j - 1], target[j]);
                    let insertion = ctx.arc_delta(&[(a, b)], &[(a, node), (node, b)]);
                    let delta = ctx.move_delta(plan, &[(from, removal), (to, insertion)], 0.0);
                    if !improves(&best, delta) {
                        continue;
                    }

                    let mut shortened = source.to_vec();
                    shortened.remove(i);
                    let mut extended = target.to_vec();
                    extended.insert(j, node);
                    if ctx.is_feasible(from, &shortened) && ctx.is_feasible(to, &extended) {
                        best = Some(Move {
                            neighborhood: Neighborhood::Relocate,
                            routes: vec![(from, shortened), (to, extended)],
                            inserted: None,
                            removed: None,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}
