use crate::optimizer::{RouteOptimizer, ScoredPath};
use model::network::{RailwayNetwork, Weight};
use model::TrainId;
use solution::TrainSchedule;
use solver::Conflict;
use std::collections::{HashMap, HashSet};

/// Aggregate stats from one `optimize_batch` call (§4.6 "Batch
/// rerouting — supplemented from the original").
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchStats {
    pub trains_rerouted: usize,
    pub trains_considered: usize,
    pub total_extra_distance_km: f64,
    pub average_quality: f64,
}

#[derive(Clone, Debug, Default)]
pub struct BatchResult {
    pub rerouted: HashMap<TrainId, ScoredPath>,
    pub stats: BatchStats,
}

/// Groups conflicts by train and finds a best reroute per affected
/// train in one call, grounded in the original's `BatchRouteOptimizer`
/// (SPEC_FULL.md §4.6).
#[derive(Clone, Debug)]
pub struct BatchRouteOptimizer {
    optimizer: RouteOptimizer,
}

impl BatchRouteOptimizer {
    pub fn new(optimizer: RouteOptimizer) -> BatchRouteOptimizer {
        BatchRouteOptimizer { optimizer }
    }

    pub fn optimize_batch(
        &self,
        conflicts: &[Conflict],
        schedules: &[TrainSchedule],
        network: &RailwayNetwork,
    ) -> BatchResult {
        let mut affected: HashMap<TrainId, Vec<&Conflict>> = HashMap::new();
        for conflict in conflicts {
            affected.entry(conflict.train1.clone()).or_default().push(conflict);
            if let Some(t2) = &conflict.train2 {
                affected.entry(t2.clone()).or_default().push(conflict);
            }
        }

        let mut rerouted = HashMap::new();
        let mut total_extra_distance_km = 0.0;
        let mut quality_sum = 0.0;

        let mut train_ids: Vec<&TrainId> = affected.keys().collect();
        train_ids.sort();

        for train_id in &train_ids {
            let Some(schedule) = schedules.iter().find(|s| s.train_id() == *train_id) else {
                continue;
            };
            let (Some(first), Some(last)) = (schedule.stops().first(), schedule.stops().last()) else {
                continue;
            };
            if first.node_id() == last.node_id() {
                continue;
            }

            let excluded_edges: HashSet<(model::NodeId, model::NodeId)> = affected[*train_id]
                .iter()
                .filter_map(|c| c.location_to.as_ref().map(|to| (c.location.clone(), to.clone())))
                .collect();

            if let Some(best) =
                self.optimizer
                    .find_best_reroute(network, first.node_id(), last.node_id(), &excluded_edges, conflicts)
            {
                let base_distance = network
                    .shortest_path(first.node_id(), last.node_id(), Weight::Distance)
                    .total_distance
                    .km();
                total_extra_distance_km += best.path.total_distance.km() - base_distance;
                quality_sum += best.combined_score;
                rerouted.insert((*train_id).clone(), best);
            }
        }

        let trains_rerouted = rerouted.len();
        let average_quality = if trains_rerouted > 0 { quality_sum / trains_rerouted as f64 } else { 0.0 };
        log::info!(
            "optimize_batch: {trains_rerouted}/{} affected trains rerouted, {:.1}km extra distance",
            train_ids.len(),
            total_extra_distance_km
        );

        BatchResult {
            rerouted,
            stats: BatchStats {
                trains_rerouted,
                trains_considered: train_ids.len(),
                total_extra_distance_km,
                average_quality,
            },
        }
    }
}
