//! Travel-cost matrix and the transit functions derived from it.

mod matrix;
mod transit;

pub use matrix::CostMatrix;
pub use transit::{TimeConversion, TransitEvaluators};
