//! Request-scoped search state: model access, arc penalties and deadline.

use std::ops::Add;
use std::time::Instant;

use super::RoutePlan;
use crate::evaluation::RouteEvaluator;
use crate::models::RoutingModel;

/// Change in arc cost and penalized arc weight caused by a route edit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcDelta {
    pub cost: f64,
    pub weight: f64,
}

impl Add for ArcDelta {
    type Output = ArcDelta;

    fn add(self, rhs: ArcDelta) -> ArcDelta {
        ArcDelta {
            cost: self.cost + rhs.cost,
            weight: self.weight + rhs.weight,
        }
    }
}

/// Everything the heuristics need while one solve runs.
///
/// Arc weights are `cost(i, j) + lambda × penalty(i, j)`. With no penalties
/// (plain descent, construction) weights equal costs.
pub struct SearchContext<'a> {
    model: &'a RoutingModel,
    evaluator: RouteEvaluator<'a>,
    penalties: Vec<u32>,
    lambda: f64,
    deadline: Option<Instant>,
}

impl<'a> SearchContext<'a> {
    pub fn new(model: &'a RoutingModel) -> Self {
        let n = model.num_nodes();
        Self {
            model,
            evaluator: RouteEvaluator::new(model),
            penalties: vec![0; n * n],
            lambda: 0.0,
            deadline: None,
        }
    }

    /// Stops the search once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn model(&self) -> &'a RoutingModel {
        self.model
    }

    /// Returns `true` once the wall-clock budget is spent.
    pub fn time_is_up(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.model.transit().cost(from, to)
    }

    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        let cost = self.cost(from, to);
        if self.lambda == 0.0 {
            return cost;
        }
        cost + self.lambda * f64::from(self.penalty(from, to))
    }

    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|a| self.cost(a[0], a[1])).sum()
    }

    pub fn path_weight(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|a| self.weight(a[0], a[1])).sum()
    }

    /// Cost and weight change of replacing the `removed` arcs by `added`.
    pub fn arc_delta(&self, removed: &[(usize, usize)], added: &[(usize, usize)]) -> ArcDelta {
        let mut delta = ArcDelta::default();
        for &(i, j) in added {
            delta.cost += self.cost(i, j);
            delta.weight += self.weight(i, j);
        }
        for &(i, j) in removed {
            delta.cost -= self.cost(i, j);
            delta.weight -= self.weight(i, j);
        }
        delta
    }

    /// Cost and weight change of replacing a vehicle's path in `plan`.
    pub fn path_delta(&self, plan: &RoutePlan, vehicle: usize, path: &[usize]) -> ArcDelta {
        ArcDelta {
            cost: self.path_cost(path) - plan.route_distance(vehicle),
            weight: self.path_weight(path) - plan.route_weight(vehicle),
        }
    }

    /// Change of the penalized objective if the given routes change by the
    /// given deltas and `penalty_delta` is added in drop penalties.
    ///
    /// The span term is re-derived from the longest route after the change.
    pub fn move_delta(
        &self,
        plan: &RoutePlan,
        changes: &[(usize, ArcDelta)],
        penalty_delta: f64,
    ) -> f64 {
        let coefficient = self.model.distance_dimension().global_span_cost_coefficient();
        let mut weight = 0.0;
        for (_, d) in changes {
            weight += d.weight;
        }
        if coefficient == 0.0 {
            return weight + penalty_delta;
        }
        let new_max = (0..plan.num_routes())
            .map(|v| {
                plan.route_distance(v)
                    + changes
                        .iter()
                        .filter(|(r, _)| *r == v)
                        .map(|(_, d)| d.cost)
                        .sum::<f64>()
            })
            .fold(0.0, f64::max);
        weight + coefficient * (new_max - plan.max_distance()) + penalty_delta
    }

    /// Returns `true` if the path respects every dimension bound.
    pub fn is_feasible(&self, vehicle: usize, path: &[usize]) -> bool {
        self.evaluator.is_feasible(vehicle, path)
    }

    pub fn evaluator(&self) -> &RouteEvaluator<'a> {
        &self.evaluator
    }

    /// True objective of a plan: arc costs, span cost and drop penalties.
    pub fn objective(&self, plan: &RoutePlan) -> f64 {
        self.model.objective(plan.distances(), plan.dropped())
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
    }

    pub fn penalty(&self, from: usize, to: usize) -> u32 {
        self.penalties[from * self.model.num_nodes() + to]
    }

    /// Increments the penalty of the arc `from -> to`.
    pub fn penalize(&mut self, from: usize, to: usize) {
        let n = self.model.num_nodes();
        let p = &mut self.penalties[from * n + to];
        *p = p.saturating_add(1);
    }
}
