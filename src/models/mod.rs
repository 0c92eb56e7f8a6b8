//! Domain model types for shift-constrained vehicle routing.
//!
//! Provides the core abstractions: nodes with demands, vehicles with their
//! own start/end and shift, the identifier registry, optional-stop
//! disjunctions, routes as ordered sequences of visits, and the immutable
//! [`RoutingModel`] that ties everything together.

mod disjunction;
mod node;
mod problem;
mod registry;
mod route;
mod solution;
mod vehicle;

pub use disjunction::Disjunctions;
pub use node::Node;
pub use problem::RoutingModel;
pub use registry::Registry;
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::{ShiftWindow, Vehicle};
