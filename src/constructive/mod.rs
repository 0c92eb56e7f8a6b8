//! Constructive heuristics for building a first feasible plan.
//!
//! - [`cheapest_insertion`] — Global cheapest insertion across all routes
//! - [`path_cheapest_arc`] — Greedy route extension along cheapest arcs,
//!   leftovers finished by insertion
//!
//! Both start from empty routes. A stop no route can absorb triggers a
//! bounded repacking of every route before it is dropped or reported.

mod cheapest_insertion;
mod path_cheapest_arc;
mod repack;

pub(crate) use cheapest_insertion::cheapest_position;
pub use cheapest_insertion::{best_insertion, cheapest_insertion, Insertion};
pub use path_cheapest_arc::path_cheapest_arc;
