//! Intra-route Or-opt.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive stops to a different
//! position within the same route, keeping their orientation.
//!
//! For each segment size k ∈ {1, 2, 3} and each starting position, computes
//! the cost change from removing the segment and reinserting it at every
//! other position.
//!
//! # Complexity
//!
//! O(n²) candidates per route and pass.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{improves, Move, Neighborhood};
use crate::search::{RoutePlan, SearchContext};

/// Longest segment moved as a block.
pub const MAX_SEGMENT: usize = 3;

/// Finds the best improving segment relocation within one route.
pub fn best_or_opt(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let mut best: Option<Move> = None;

    for v in 0..plan.num_routes() {
        let path = plan.route(v);
        let n = path.len();
        let stops = n.saturating_sub(2);
        for len in 1..=MAX_SEGMENT.min(stops) {
            for s in 1..=(n - 1 - len) {
                let (first, last) = (path[s], path[s + len - 1]);
                let (prev, next) = (path[s - 1], path[s + len]);
                let removal = ctx.arc_delta(&[(prev, first), (last, next)], &[(prev, next)]);

                for t in 1..n {
                    if (s..=s + len).contains(&t) {
                        continue;
                    }
                    let (a, b) = (path[t - 1], path[t]);
                    let insertion = ctx.arc_delta(&[(a, b)], &[(a, first), (last, b)]);
                    let delta = ctx.move_delta(plan, &[(v, removal + insertion)], 0.0);
                    if !improves(&best, delta) {
                        continue;
                    }

                    let mut candidate = path.to_vec();
                    let segment: Vec<usize> = candidate.drain(s..s + len).collect();
                    let at = if t < s { t } else { t - len };
                    candidate.splice(at..at, segment);
                    if ctx.is_feasible(v, &candidate) {
                        best = Some(Move {
                            neighborhood: Neighborhood::OrOpt,
                            routes: vec![(v, candidate)],
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
