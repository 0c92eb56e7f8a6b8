//! Strategy selection: first-solution heuristics and metaheuristics.

use serde::{Deserialize, Serialize};

use super::{GuidedLocalSearch, RoutePlan, SearchContext, SteepestDescent};
use crate::config::SearchParams;
use crate::constructive::{cheapest_insertion, path_cheapest_arc};
use crate::error::RoutingError;

/// Improves a feasible plan within the context's budget.
///
/// Implementations must only return plans whose every route is feasible.
pub trait SearchStrategy {
    fn name(&self) -> &'static str;

    fn improve(&mut self, ctx: &mut SearchContext, plan: RoutePlan) -> RoutePlan;
}

/// Heuristic that builds the first feasible plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstSolutionStrategy {
    CheapestInsertion,
    PathCheapestArc,
}

impl FirstSolutionStrategy {
    pub fn build(self, ctx: &SearchContext) -> Result<RoutePlan, RoutingError> {
        match self {
            FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(ctx),
            FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(ctx),
        }
    }
}

/// Improvement phase run after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metaheuristic {
    GuidedLocalSearch,
    GreedyDescent,
}

impl Metaheuristic {
    pub fn strategy(self, params: &SearchParams) -> Box<dyn SearchStrategy + Send> {
        match self {
            Metaheuristic::GuidedLocalSearch => Box::new(GuidedLocalSearch::new(params)),
            Metaheuristic::GreedyDescent => {
                Box::new(SteepestDescent::new(params.neighborhoods.clone()))
            }
        }
    }
}
