//! Repacking of routes around a stranded stop.
//!
//! Greedy insertion can strand a stop when earlier choices fragment the
//! fleet's free capacity: every route has some room left, none has enough.
//! Repacking rebuilds all routes from empty by depth-first search. Stops
//! are placed largest demand first, each at its cheapest feasible position
//! in one vehicle after another, backtracking when a stop fits nowhere.
//!
//! Two cuts keep the search small. Empty vehicles that are interchangeable
//! (same start, end, capacity and shift) are tried once per level, and a
//! branch ends as soon as the demand left to place exceeds the capacity
//! left in the fleet.
//!
//! Capacity feasibility of a stop does not depend on its position in the
//! route, so without a time dimension an exhausted search proves the stops
//! cannot be served together.

use std::cmp::Reverse;

use tracing::debug;

use super::cheapest_insertion::cheapest_position;
use crate::models::ShiftWindow;
use crate::search::{RoutePlan, SearchContext};

/// Search nodes a repack for a mandatory stop may expand.
pub(crate) const MANDATORY_BUDGET: usize = 100_000;

/// Search nodes a repack for an optional stop may expand.
pub(crate) const OPTIONAL_BUDGET: usize = 20_000;

/// Outcome of [`repack`].
#[derive(Debug, Clone)]
pub(crate) enum Repack {
    /// Every routed stop and the stranded one are placed.
    Placed(RoutePlan),
    /// No assignment of the stops to vehicles exists.
    Exhausted,
    /// The expansion budget or the deadline ran out first.
    OutOfBudget,
}

/// Rebuilds every route of `plan` so that `node` is served as well.
///
/// Dropped stops of `plan` stay dropped.
pub(crate) fn repack(ctx: &SearchContext, plan: &RoutePlan, node: usize, budget: usize) -> Repack {
    let registry = ctx.model().registry();
    let demand = |n: usize| registry.node(n).demand();

    let mut stops: Vec<usize> = plan
        .routes()
        .iter()
        .flat_map(|p| p[1..p.len() - 1].iter().copied())
        .collect();
    stops.push(node);
    stops.sort_by_key(|&s| (Reverse(demand(s)), s));

    // a vehicle without capacity makes the fleet's room unbounded
    let capacities = if registry.has_demands() && ctx.model().capacity_dimension().is_some() {
        registry.vehicles().iter().map(|v| v.capacity()).collect()
    } else {
        None
    };

    let mut packing = Packing {
        ctx,
        stops: &stops,
        routes: RoutePlan::empty(ctx).routes().to_vec(),
        loads: vec![0; plan.num_routes()],
        capacities,
        remaining: stops.iter().map(|&s| demand(s)).sum(),
        expansions: 0,
        budget,
    };
    let outcome = packing.place(0);
    debug!(
        node,
        stops = stops.len(),
        expansions = packing.expansions,
        ?outcome,
        "repacked routes"
    );

    match outcome {
        Some(true) => Repack::Placed(RoutePlan::from_routes(
            ctx,
            packing.routes,
            plan.dropped().to_vec(),
        )),
        Some(false) => Repack::Exhausted,
        None => Repack::OutOfBudget,
    }
}

/// Identity of an empty vehicle for symmetry breaking.
type VehicleKey = (usize, usize, Option<i64>, Option<ShiftWindow>);

struct Packing<'p, 'm> {
    ctx: &'p SearchContext<'m>,
    stops: &'p [usize],
    routes: Vec<Vec<usize>>,
    loads: Vec<i64>,
    capacities: Option<Vec<i64>>,
    remaining: i64,
    expansions: usize,
    budget: usize,
}

impl Packing<'_, '_> {
    /// `Some(true)` once stops `k..` are all placed, `Some(false)` when no
    /// branch below works, `None` when the budget runs out.
    fn place(&mut self, k: usize) -> Option<bool> {
        let Some(&stop) = self.stops.get(k) else {
            return Some(true);
        };
        if self.out_of_room() {
            return Some(false);
        }
        self.expansions += 1;
        if self.expansions > self.budget || self.ctx.time_is_up() {
            return None;
        }

        let registry = self.ctx.model().registry();
        let demand = registry.node(stop).demand();
        let mut tried: Vec<VehicleKey> = Vec::new();
        let mut candidates = Vec::new();
        for (vehicle, path) in self.routes.iter().enumerate() {
            if path.len() == 2 {
                let v = registry.vehicle(vehicle);
                let key = (v.start(), v.end(), v.capacity(), v.shift().copied());
                if tried.contains(&key) {
                    continue;
                }
                tried.push(key);
            }
            if let Some((extended, weight)) = cheapest_position(self.ctx, vehicle, path, stop) {
                candidates.push((weight, vehicle, extended));
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, vehicle, extended) in candidates {
            let previous = std::mem::replace(&mut self.routes[vehicle], extended);
            self.loads[vehicle] += demand;
            self.remaining -= demand;

            let outcome = self.place(k + 1);
            if outcome != Some(false) {
                return outcome;
            }

            self.routes[vehicle] = previous;
            self.loads[vehicle] -= demand;
            self.remaining += demand;
        }
        Some(false)
    }

    fn out_of_room(&self) -> bool {
        let Some(capacities) = &self.capacities else {
            return false;
        };
        let free: i64 = capacities.iter().zip(&self.loads).map(|(c, l)| c - l).sum();
        self.remaining > free
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::CapacitySpec;
    use crate::models::RoutingModel;
    use crate::test_utils::{line_job, solver_config};

    fn loaded(demands: Vec<i64>, vehicles: usize, capacity: i64) -> RoutingModel {
        let mut job = line_job(demands.len(), vehicles);
        job.demands = Some(demands);
        job.vehicle_capacity = Some(CapacitySpec::Uniform(capacity));
        RoutingModel::build(&job, &solver_config().model).expect("valid")
    }

    fn load(model: &RoutingModel, path: &[usize]) -> i64 {
        path.iter().map(|&n| model.registry().node(n).demand()).sum()
    }

    #[test]
    fn test_repacks_fragmented_fleet() {
        // 5 + 3 and 4 + 4 leave 2 free per vehicle; node 4 needs 3
        let model = loaded(vec![0, 4, 5, 3, 3, 4], 2, 10);
        let ctx = SearchContext::new(&model);
        let plan = RoutePlan::from_routes(&ctx, vec![vec![0, 2, 3, 0], vec![0, 1, 5, 0]], vec![]);
        assert!(!ctx.is_feasible(0, &[0, 2, 3, 4, 0]));
        assert!(!ctx.is_feasible(1, &[0, 1, 5, 4, 0]));

        let Repack::Placed(repacked) = repack(&ctx, &plan, 4, MANDATORY_BUDGET) else {
            panic!("expected a packing");
        };
        assert_eq!(repacked.num_stops(), 5);
        for path in repacked.routes() {
            assert!(load(&model, path) <= 10);
        }
    }

    #[test]
    fn test_strands_without_room() {
        // three stops of 6 on two vehicles of 10: 18 <= 20 but no packing
        let model = loaded(vec![0, 6, 6, 6], 2, 10);
        let ctx = SearchContext::new(&model);
        let plan = RoutePlan::from_routes(&ctx, vec![vec![0, 1, 0], vec![0, 2, 0]], vec![]);
        assert!(matches!(
            repack(&ctx, &plan, 3, MANDATORY_BUDGET),
            Repack::Exhausted
        ));
    }

    #[test]
    fn test_keeps_dropped_stops() {
        let model = loaded(vec![0, 6, 6, 2, 1], 2, 10);
        let ctx = SearchContext::new(&model);
        let plan = RoutePlan::from_routes(&ctx, vec![vec![0, 1, 0], vec![0, 2, 0]], vec![4]);
        let Repack::Placed(repacked) = repack(&ctx, &plan, 3, MANDATORY_BUDGET) else {
            panic!("expected a packing");
        };
        assert_eq!(repacked.dropped(), &[4]);
        assert!(repacked.serves(3));
    }

    #[test]
    fn test_budget_exhaustion() {
        let model = loaded(vec![0, 6, 6, 6], 2, 10);
        let ctx = SearchContext::new(&model);
        let plan = RoutePlan::from_routes(&ctx, vec![vec![0, 1, 0], vec![0, 2, 0]], vec![]);
        assert!(matches!(repack(&ctx, &plan, 3, 0), Repack::OutOfBudget));
    }
}
