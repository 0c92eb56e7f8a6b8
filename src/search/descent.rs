//! Local descent over a list of neighborhoods.

use tracing::trace;

use super::{RoutePlan, SearchContext, SearchStrategy};
use crate::local_search::Neighborhood;

/// Applies the best move of each neighborhood in turn until none improves.
#[derive(Debug, Clone)]
pub struct LocalDescent {
    neighborhoods: Vec<Neighborhood>,
}

impl LocalDescent {
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self { neighborhoods }
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    pub fn neighborhoods_mut(&mut self) -> &mut [Neighborhood] {
        &mut self.neighborhoods
    }

    /// Descends to a local optimum of the penalized objective.
    ///
    /// Stops early when the context's deadline passes. Returns the number of
    /// moves applied.
    pub fn descend(&self, plan: &mut RoutePlan, ctx: &SearchContext) -> usize {
        let mut applied = 0;
        loop {
            let mut improved = false;
            for &neighborhood in &self.neighborhoods {
                if ctx.time_is_up() {
                    return applied;
                }
                if let Some(mv) = neighborhood.best_move(plan, ctx) {
                    trace!(?neighborhood, delta = mv.delta, "move applied");
                    plan.apply(ctx, mv);
                    applied += 1;
                    improved = true;
                }
            }
            if !improved {
                return applied;
            }
        }
    }
}

/// Plain descent on the true objective, no penalties.
#[derive(Debug, Clone)]
pub struct SteepestDescent {
    descent: LocalDescent,
}

impl SteepestDescent {
    pub fn new(neighborhoods: Vec<Neighborhood>) -> Self {
        Self {
            descent: LocalDescent::new(neighborhoods),
        }
    }
}

impl SearchStrategy for SteepestDescent {
    fn name(&self) -> &'static str {
        "steepest_descent"
    }

    fn improve(&mut self, ctx: &mut SearchContext, mut plan: RoutePlan) -> RoutePlan {
        self.descent.descend(&mut plan, ctx);
        plan
    }
}
