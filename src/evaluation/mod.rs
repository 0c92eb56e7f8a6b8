//! Constraint dimensions and route feasibility evaluation.

mod dimension;
mod evaluator;

pub use dimension::{Dimension, DimensionKind};
pub use evaluator::{RouteEvaluator, RouteSchedule};
