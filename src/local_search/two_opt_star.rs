//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! The 2-opt* operator swaps tail segments between two routes. Given
//! routes A = [sa, a₁, ..., aᵢ, aᵢ₊₁, ..., ea] and
//! B = [sb, b₁, ..., bⱼ, bⱼ₊₁, ..., eb], produce:
//!
//! A' = [sa, a₁, ..., aᵢ, bⱼ₊₁, ..., ea]
//! B' = [sb, b₁, ..., bⱼ, aᵢ₊₁, ..., eb]
//!
//! Each route keeps its own start and end node. Tails are not reversed,
//! so new route costs come from prefix sums of both paths.
//!
//! # Complexity
//!
//! O(n² × R²) candidates per pass, n = stops per route, R = routes.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use super::{improves, Move, Neighborhood};
use crate::search::{ArcDelta, RoutePlan, SearchContext};

/// A route path with cumulative cost and weight at each position.
struct Side<'a> {
    path: &'a [usize],
    cost: Vec<f64>,
    weight: Vec<f64>,
}

impl<'a> Side<'a> {
    fn new(path: &'a [usize], ctx: &SearchContext) -> Self {
        let mut cost = Vec::with_capacity(path.len());
        let mut weight = Vec::with_capacity(path.len());
        let (mut c, mut w) = (0.0, 0.0);
        cost.push(c);
        weight.push(w);
        for arc in path.windows(2) {
            c += ctx.cost(arc[0], arc[1]);
            w += ctx.weight(arc[0], arc[1]);
            cost.push(c);
            weight.push(w);
        }
        Self { path, cost, weight }
    }

    /// Position of the last stop (the start when there are none).
    fn last_stop(&self) -> usize {
        self.path.len() - 2
    }

    fn end(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Sum over the arcs between positions `from` and `to`.
    fn between(&self, from: usize, to: usize) -> ArcDelta {
        ArcDelta {
            cost: self.cost[to] - self.cost[from],
            weight: self.weight[to] - self.weight[from],
        }
    }
}

/// Totals of `head[..=i]` followed by the stops of `tail` after `j`, then
/// the head route's own end.
fn spliced(ctx: &SearchContext, head: &Side, i: usize, tail: &Side, j: usize) -> ArcDelta {
    let keep = head.between(0, i);
    let (from, end, last) = (head.path[i], head.end(), tail.last_stop());
    if j == last {
        return keep + ctx.arc_delta(&[], &[(from, end)]);
    }
    keep + ctx.arc_delta(&[], &[(from, tail.path[j + 1]), (tail.path[last], end)])
        + tail.between(j + 1, last)
}

/// Path of `head[..=i]`, the stops of `tail` after `j`, then the head's end.
fn splice_path(head: &Side, i: usize, tail: &Side, j: usize) -> Vec<usize> {
    head.path[..=i]
        .iter()
        .chain(&tail.path[j + 1..=tail.last_stop()])
        .copied()
        .chain(std::iter::once(head.end()))
        .collect()
}

/// Finds the best improving tail exchange between two routes.
pub fn best_two_opt_star(plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
    let mut best: Option<Move> = None;

    for a in 0..plan.num_routes() {
        let sa = Side::new(plan.route(a), ctx);
        for b in (a + 1)..plan.num_routes() {
            let sb = Side::new(plan.route(b), ctx);

            for i in 0..=sa.last_stop() {
                for j in 0..=sb.last_stop() {
                    if i == sa.last_stop() && j == sb.last_stop() {
                        continue;
                    }
                    let new_a = spliced(ctx, &sa, i, &sb, j);
                    let new_b = spliced(ctx, &sb, j, &sa, i);
                    let da = ArcDelta {
                        cost: new_a.cost - plan.route_distance(a),
                        weight: new_a.weight - plan.route_weight(a),
                    };
                    let db = ArcDelta {
                        cost: new_b.cost - plan.route_distance(b),
                        weight: new_b.weight - plan.route_weight(b),
                    };
                    let delta = ctx.move_delta(plan, &[(a, da), (b, db)], 0.0);
                    if !improves(&best, delta) {
                        continue;
                    }

                    let path_a = splice_path(&sa, i, &sb, j);
                    let path_b = splice_path(&sb, j, &sa, i);
                    if ctx.is_feasible(a, &path_a) && ctx.is_feasible(b, &path_b) {
                        best = Some(Move {
                            neighborhood: Neighborhood::TwoOptStar,
                            routes: vec![(a, path_a), (b, path_b)],
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
