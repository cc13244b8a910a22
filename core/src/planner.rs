use crate::config::CoreConfig;
use model::network::RailwayNetwork;
use model::{Train, TrainId};
use route::{BatchRouteOptimizer, RouteOptimizer};
use solution::TrainSchedule;
use solver::{Conflict, ConflictDetector, RailwayAiResolver, ResolutionResult};
use std::collections::HashMap;

/// Wires the detector, resolver and route optimizer behind one
/// construction-time config (§2 "facade" row, §6.4). The one type
/// external collaborators (import/export, the embedded store, the HTTP
/// facade) depend on to run a planning pass.
pub struct Planner {
    detector: ConflictDetector,
    resolver: RailwayAiResolver,
    route_optimizer: RouteOptimizer,
    batch_route_optimizer: BatchRouteOptimizer,
}

impl Planner {
    pub fn new(config: CoreConfig) -> Planner {
        let route_optimizer = RouteOptimizer::new(config.route);
        Planner {
            detector: ConflictDetector::new(config.detector),
            resolver: RailwayAiResolver::new(config.resolver),
            batch_route_optimizer: BatchRouteOptimizer::new(route_optimizer.clone()),
            route_optimizer,
        }
    }

    pub fn detector(&self) -> &ConflictDetector {
        &self.detector
    }

    pub fn route_optimizer(&self) -> &RouteOptimizer {
        &self.route_optimizer
    }

    pub fn batch_route_optimizer(&self) -> &BatchRouteOptimizer {
        &self.batch_route_optimizer
    }

    /// `detect_all` followed by one `resolve_all` pass (§2 "data flow
    /// at rest"). Callers wanting further passes re-run `detect` on the
    /// mutated schedules and call `resolve` again (§4.5, at most one
    /// pass per call).
    pub fn plan(
        &mut self,
        schedules: &mut [TrainSchedule],
        network: &RailwayNetwork,
        trains: &HashMap<TrainId, Train>,
    ) -> (Vec<Conflict>, Vec<ResolutionResult>) {
        let conflicts = self.detector.detect_all(schedules, network);
        let results = self.resolver.resolve_all(&conflicts, schedules, network, trains);
        (conflicts, results)
    }

    pub fn detect(&mut self, schedules: &[TrainSchedule], network: &RailwayNetwork) -> Vec<Conflict> {
        self.detector.detect_all(schedules, network)
    }

    pub fn resolve(
        &mut self,
        conflicts: &[Conflict],
        schedules: &mut [TrainSchedule],
        network: &RailwayNetwork,
        trains: &HashMap<TrainId, Train>,
    ) -> Vec<ResolutionResult> {
        self.resolver.resolve_all(conflicts, schedules, network, trains)
    }
}
