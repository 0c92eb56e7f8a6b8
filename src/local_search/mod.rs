//! Local search neighborhoods over a [`RoutePlan`](crate::search::RoutePlan).
//!
//! - [`relocate`] — Inter-route single-stop relocation
//! - [`exchange`] — Inter-route stop swap
//! - [`two_opt`] — Intra-route segment reversal
//! - [`or_opt`] — Intra-route segment relocation
//! - [`two_opt_star`] — Inter-route tail exchange (2-opt*)
//! - [`insert_dropped`] — Re-insertion of dropped stops
//! - [`swap_dropped`] — Dropped-stop insertion that ejects a routed stop
//! - [`remove_stop`] — Unassignment of optional stops
//!
//! Every operator scans its whole neighborhood and returns the best
//! improving move whose touched routes stay feasible, scored on the
//! penalized objective of the current [`SearchContext`].

use serde::{Deserialize, Serialize};

use crate::search::{RoutePlan, SearchContext};

pub mod exchange;
pub mod insert_dropped;
pub mod or_opt;
pub mod relocate;
pub mod remove_stop;
pub mod swap_dropped;
pub mod two_opt;
pub mod two_opt_star;

pub use exchange::best_exchange;
pub use insert_dropped::best_reinsertion;
pub use or_opt::best_or_opt;
pub use relocate::best_relocate;
pub use remove_stop::best_removal;
pub use swap_dropped::best_swap_dropped;
pub use two_opt::best_two_opt;
pub use two_opt_star::best_two_opt_star;

/// Minimum objective decrease for a move to count as improving.
pub const IMPROVEMENT_EPS: f64 = 1e-10;

/// A local search neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    Relocate,
    Exchange,
    TwoOpt,
    OrOpt,
    TwoOptStar,
    InsertDropped,
    SwapDropped,
    RemoveStop,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 8] = [
        Neighborhood::Relocate,
        Neighborhood::Exchange,
        Neighborhood::TwoOpt,
        Neighborhood::OrOpt,
        Neighborhood::TwoOptStar,
        Neighborhood::InsertDropped,
        Neighborhood::SwapDropped,
        Neighborhood::RemoveStop,
    ];

    /// Best improving feasible move of this neighborhood, if any.
    pub fn best_move(self, plan: &RoutePlan, ctx: &SearchContext) -> Option<Move> {
        match self {
            Neighborhood::Relocate => best_relocate(plan, ctx),
            Neighborhood::Exchange => best_exchange(plan, ctx),
            Neighborhood::TwoOpt => best_two_opt(plan, ctx),
            Neighborhood::OrOpt => best_or_opt(plan, ctx),
            Neighborhood::TwoOptStar => best_two_opt_star(plan, ctx),
            Neighborhood::InsertDropped => best_reinsertion(plan, ctx),
            Neighborhood::SwapDropped => best_swap_dropped(plan, ctx),
            Neighborhood::RemoveStop => best_removal(plan, ctx),
        }
    }
}

/// A scored plan edit: replacement paths for the touched vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub neighborhood: Neighborhood,
    pub routes: Vec<(usize, Vec<usize>)>,
    /// A dropped stop this move puts back on a route.
    pub inserted: Option<usize>,
    /// A routed stop this move drops.
    pub removed: Option<usize>,
    /// Change of the penalized objective.
    pub delta: f64,
}

/// Returns `true` if `delta` improves on both zero and the best so far.
fn improves(best: &Option<Move>, delta: f64) -> bool {
    delta < -IMPROVEMENT_EPS && best.as_ref().is_none_or(|b| delta < b.delta)
}

/// Stop positions of a full path: everything but the start and end.
fn stop_positions(path: &[usize]) -> std::ops::Range<usize> {
    1..path.len().saturating_sub(1)
}
