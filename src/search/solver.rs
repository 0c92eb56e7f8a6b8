//! Solve driver: model building, construction, improvement, extraction.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::{RoutePlan, SearchContext, SearchStrategy};
use crate::config::SolverConfig;
use crate::error::RoutingError;
use crate::evaluation::RouteEvaluator;
use crate::extract::extract;
use crate::json::JobDescription;
use crate::models::{RoutingModel, Solution};

/// Runs one solve per call, synchronously, within the configured budget.
///
/// # Examples
///
/// ```
/// use shift_routing::json::JobDescription;
/// use shift_routing::{Solver, SolverConfig};
///
/// let job = JobDescription::new(
///     vec![
///         vec![0.0, 2.0, 4.0],
///         vec![2.0, 0.0, 2.0],
///         vec![4.0, 2.0, 0.0],
///     ],
///     1,
///     vec![0],
///     vec![0],
/// );
/// let mut config = SolverConfig::default();
/// config.search.time_limit_ms = 50;
///
/// let solution = Solver::new(config).solve(&job).unwrap();
/// assert_eq!(solution.num_served(), 2);
/// assert_eq!(solution.total_distance(), 8.0);
/// ```
pub struct Solver {
    config: SolverConfig,
    strategy: Box<dyn SearchStrategy + Send>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        let strategy = config.search.metaheuristic.strategy(&config.search);
        Self { config, strategy }
    }

    /// Replaces the configured metaheuristic.
    pub fn with_strategy(mut self, strategy: impl SearchStrategy + Send + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds the model for `job` and solves it.
    pub fn solve(&mut self, job: &JobDescription) -> Result<Solution, RoutingError> {
        let model = RoutingModel::build(job, &self.config.model)?;
        self.solve_model(&model)
    }

    /// Solves an already built model.
    pub fn solve_model(&mut self, model: &RoutingModel) -> Result<Solution, RoutingError> {
        let started = Instant::now();
        let search = &self.config.search;
        info!(
            nodes = model.num_nodes(),
            vehicles = model.num_vehicles(),
            stops = model.registry().stops().count(),
            time = model.time_dimension().is_some(),
            capacity = model.capacity_dimension().is_some(),
            strategy = self.strategy.name(),
            time_limit_ms = search.time_limit_ms,
            "solve started"
        );

        let mut ctx = SearchContext::new(model).with_deadline(started + search.time_limit());
        let initial = search.first_solution.build(&ctx)?;
        debug!(
            strategy = ?search.first_solution,
            objective = ctx.objective(&initial),
            dropped = initial.dropped().len(),
            "first solution"
        );

        let best = self.strategy.improve(&mut ctx, initial);
        validate_plan(model, &best)?;

        let solution = extract(model, &best);
        for &node in solution.dropped() {
            warn!(
                node,
                node_id = model.registry().node(node).external_id(),
                "stop dropped"
            );
        }
        info!(
            objective = solution.objective(),
            served = solution.num_served(),
            dropped = solution.dropped().len(),
            vehicles_used = solution.num_used_vehicles(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "solve finished"
        );
        debug!("\n{solution}");
        Ok(solution)
    }
}

/// Rejects a plan that breaks a hard constraint.
fn validate_plan(model: &RoutingModel, plan: &RoutePlan) -> Result<(), RoutingError> {
    let registry = model.registry();
    let evaluator = RouteEvaluator::new(model);
    let mut served = vec![false; model.num_nodes()];

    if plan.num_routes() != model.num_vehicles() {
        warn!(routes = plan.num_routes(), "plan does not cover every vehicle");
        return Err(RoutingError::NoSolutionFound);
    }
    for (v, path) in plan.routes().iter().enumerate() {
        let vehicle = registry.vehicle(v);
        if path.len() < 2
            || path[0] != vehicle.start()
            || path[path.len() - 1] != vehicle.end()
        {
            warn!(vehicle = v, "route does not join its start and end");
            return Err(RoutingError::NoSolutionFound);
        }
        if let Err(violation) = evaluator.schedule(v, path) {
            warn!(%violation, "route breaks its bounds");
            return Err(RoutingError::NoSolutionFound);
        }
        for &node in &path[1..path.len() - 1] {
            if registry.is_depot(node) || served[node] {
                warn!(vehicle = v, node, "stop routed twice or depot routed as stop");
                return Err(RoutingError::NoSolutionFound);
            }
            served[node] = true;
        }
    }
    for stop in registry.stops() {
        if !served[stop] && !model.disjunctions().is_optional(stop) {
            warn!(node = stop, "mandatory stop left unrouted");
            return Err(RoutingError::NoSolutionFound);
        }
    }
    Ok(())
}
