//! Inter-route stop exchange (swap).
//!
//! # Algorithm
//!
//! For every pair of routes, swaps one stop of the first with one stop of
//! the second, each taking the other's position. Candidates are scored by
//! the four-arc delta on each side before the bounds are checked.
//!
//! # Complexity
//!
//! O(n² × R²) candidates per pass, n = stops per route, R = routes.

use super::{improves, stop_positions, Move, Neighborhood};
use crate::search::{RoutePlan, SearchContext};

/// Finds the best improving swap of two stops on different routes.
pub fn best_exchange(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let mut best: Option<Move> = None;

    for a in 0..plan.num_routes() {
        let ra = plan.route(a);
        for b in (a + 1)..plan.num_routes() {
            let rb = plan.route(b);
            for i in stop_positions(ra) {
                let (p, x, n) = (ra[i - 1], ra[i], ra[i + 1]);
                for j in stop_positions(rb) {
                    let (q, y, r) = (rb[j - 1], rb[j], rb[j + 1]);
                    let da = ctx.arc_delta(&[(p, x), (x, n)], &[(p, y), (y, n)]);
                    let db = ctx.arc_delta(&[(q, y), (y, r)], &[(q, x), (x, r)]);
                    let delta = ctx.move_delta(plan, &[(a, da), (b, db)], 0.0);
                    if !improves(&best, delta) {
                        continue;
                    }

                    let mut new_a = ra.to_vec();
                    new_a[i] = y;
                    let mut new_b = rb.to_vec();
                    new_b[j] = x;
                    if ctx.is_feasible(a, &new_a) && ctx.is_feasible(b, &new_b) {
                        best = Some(Move {
                            neighborhood: Neighborhood::Exchange,
                            routes: vec![(a, new_a), (b, new_b)],
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
