//! Guided local search.
//!
//! # Algorithm
//!
//! Alternates local descent with arc penalization. At each local optimum
//! the arcs of the current plan with the highest utility
//! `cost(i, j) / (1 + penalty(i, j))` get their penalty incremented, and
//! descent resumes on the augmented cost `cost + λ × penalty`, pushing the
//! search out of the optimum. λ is fixed at the first local optimum as
//! `penalty_factor × average arc cost`. The best plan under the true
//! objective is kept throughout.
//!
//! Neighborhood order is reshuffled every iteration from a seeded RNG.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::{LocalDescent, RoutePlan, SearchContext, SearchStrategy};
use crate::config::SearchParams;
use crate::local_search::IMPROVEMENT_EPS;

/// Guided local search over a [`LocalDescent`].
///
/// # Examples
///
/// ```
/// use shift_routing::config::SearchParams;
/// use shift_routing::search::{GuidedLocalSearch, SearchStrategy};
///
/// let params = SearchParams {
///     seed: Some(42),
///     max_iterations: Some(10),
///     ..SearchParams::default()
/// };
/// let gls = GuidedLocalSearch::new(&params);
/// assert_eq!(gls.name(), "guided_local_search");
/// ```
#[derive(Debug, Clone)]
pub struct GuidedLocalSearch {
    descent: LocalDescent,
    penalty_factor: f64,
    max_iterations: Option<usize>,
    max_stall: Option<usize>,
    rng: StdRng,
}

impl GuidedLocalSearch {
    pub fn new(params: &SearchParams) -> Self {
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            descent: LocalDescent::new(params.neighborhoods.clone()),
            penalty_factor: params.penalty_factor,
            max_iterations: params.max_iterations,
            max_stall: params.max_iterations_without_improvement,
            rng,
        }
    }

    /// Penalizes the max-utility arcs of `plan`. Returns how many were hit.
    fn penalize(&self, plan: &RoutePlan, ctx: &mut SearchContext) -> usize {
        let mut arcs = Vec::new();
        let mut max_utility = 0.0_f64;
        for path in plan.routes() {
            for arc in path.windows(2) {
                let (i, j) = (arc[0], arc[1]);
                if i == j {
                    continue;
                }
                let utility = ctx.cost(i, j) / (1.0 + f64::from(ctx.penalty(i, j)));
                max_utility = max_utility.max(utility);
                arcs.push((i, j, utility));
            }
        }
        if max_utility <= 0.0 {
            return 0;
        }

        let mut penalized = 0;
        for (i, j, utility) in arcs {
            if utility >= max_utility - IMPROVEMENT_EPS {
                ctx.penalize(i, j);
                penalized += 1;
            }
        }
        penalized
    }

    fn lambda_for(&self, plan: &RoutePlan) -> f64 {
        let arcs = plan
            .routes()
            .iter()
            .flat_map(|p| p.windows(2))
            .filter(|a| a[0] != a[1])
            .count();
        if arcs == 0 {
            return 0.0;
        }
        self.penalty_factor * plan.distances().iter().sum::<f64>() / arcs as f64
    }

    fn should_stop(&self, ctx: &SearchContext, iteration: usize, stall: usize) -> bool {
        ctx.time_is_up()
            || self.max_iterations.is_some_and(|m| iteration >= m)
            || self.max_stall.is_some_and(|m| stall >= m)
    }
}

impl SearchStrategy for GuidedLocalSearch {
    fn name(&self) -> &'static str {
        "guided_local_search"
    }

    fn improve(&mut self, ctx: &mut SearchContext, mut plan: RoutePlan) -> RoutePlan {
        self.descent.descend(&mut plan, ctx);
        let mut best = plan.clone();
        let mut best_objective = ctx.objective(&best);
        debug!(objective = best_objective, "first local optimum");

        let mut iteration = 0;
        let mut stall = 0;
        while !self.should_stop(ctx, iteration, stall) {
            if ctx.lambda() == 0.0 {
                let lambda = self.lambda_for(&plan);
                if lambda <= 0.0 {
                    break;
                }
                ctx.set_lambda(lambda);
            }
            if self.penalize(&plan, ctx) == 0 {
                break;
            }
            plan.refresh_weights(ctx);
            self.descent.neighborhoods_mut().shuffle(&mut self.rng);
            self.descent.descend(&mut plan, ctx);
            iteration += 1;

            let objective = ctx.objective(&plan);
            if objective < best_objective - IMPROVEMENT_EPS {
                debug!(iteration, objective, "new best solution");
                best = plan.clone();
                best_objective = objective;
                stall = 0;
            } else {
                stall += 1;
            }
        }

        debug!(
            iterations = iteration,
            objective = best_objective,
            lambda = ctx.lambda(),
            "guided local search finished"
        );
        best
    }
}
