//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! Reverses the segment `path[i..=j]` of a route. The reversed interior is
//! re-costed arc by arc, so asymmetric matrices are handled exactly; the
//! interior delta is accumulated incrementally as `j` grows.
//!
//! # Complexity
//!
//! O(n²) candidates per route and pass.
//!
//! # Reference
//!
//! Croes, G. A. (1958). "A Method for Solving Traveling-Salesman Problems",
//! *Operations Research* 6(6), 791-812.

use super::{improves, Move, Neighborhood};
use crate::search::{ArcDelta, RoutePlan, SearchContext};

/// Finds the best improving segment reversal over all routes.
pub fn best_two_opt(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let mut best: Option<Move> = None;

    for v in 0..plan.num_routes() {
        let path = plan.route(v);
        let n = path.len();
        if n < 4 {
            continue;
        }
        for i in 1..n - 2 {
            let mut interior = ArcDelta::default();
            for j in (i + 1)..n - 1 {
                let (a, b) = (path[j - 1], path[j]);
                interior.cost += ctx.cost(b, a) - ctx.cost(a, b);
                interior.weight += ctx.weight(b, a) - ctx.weight(a, b);

                let ends = ctx.arc_delta(
                    &[(path[i - 1], path[i]), (path[j], path[j + 1])],
                    &[(path[i - 1], path[j]), (path[i], path[j + 1])],
                );
                let delta = ctx.move_delta(plan, &[(v, ends + interior)], 0.0);
                if !improves(&best, delta) {
                    continue;
                }

                let mut candidate = path.to_vec();
                candidate[i..=j].reverse();
                if ctx.is_feasible(v, &candidate) {
                    best = Some(Move {
                        neighborhood: Neighborhood::TwoOpt,
                        routes: vec![(v, candidate)],
                        inserted: None,
                        removed: None,
                        delta,
                    });
                }
            }
        }
    }

    best
}
