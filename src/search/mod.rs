//! Search engine: plan representation, search context, strategies and the
//! solve driver.
//!
//! - [`RoutePlan`] — Mutable per-vehicle paths with cached costs
//! - [`SearchContext`] — Model access, arc penalties and deadline
//! - [`SearchStrategy`] — Metaheuristic seam ([`GuidedLocalSearch`],
//!   [`SteepestDescent`])
//! - [`Solver`] — Builds, searches, validates and extracts

mod context;
mod descent;
mod guided;
mod plan;
mod solver;
mod strategy;

pub use context::{ArcDelta, SearchContext};
pub use descent::{LocalDescent, SteepestDescent};
pub use guided::GuidedLocalSearch;
pub use plan::RoutePlan;
pub use solver::Solver;
pub use strategy::{FirstSolutionStrategy, Metaheuristic, SearchStrategy};
