use crate::adjustment::{candidates_for, select_best, ScheduleAdjustment};
use crate::config::RealTimeConfig;
use crate::position::{TrainDelay, TrainPosition};
use crate::prediction::{predict_pair, PredictedConflict};
use model::network::RailwayNetwork;
use model::TrainId;
use route::RouteOptimizer;
use solution::TrainSchedule;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Default)]
pub struct RealtimeStats {
    pub position_updates: u64,
    pub predictions_made: u64,
    pub adjustments_applied: u64,
    pub average_delay_reduction_minutes: f64,
}

type PositionListener = Box<dyn Fn(&TrainPosition) + Send + Sync>;
type ConflictListener = Box<dyn Fn(&PredictedConflict) + Send + Sync>;
type AdjustmentListener = Box<dyn Fn(&ScheduleAdjustment) + Send + Sync>;

/// Position ingest, horizon-bounded conflict prediction, and adjustment
/// generation (C7, §4.7). Single-threaded per instance (§5); multiple
/// instances may run in parallel over disjoint graphs.
#[derive(Default)]
pub struct RealTimeOptimizer {
    config: RealTimeConfig,
    positions: HashMap<TrainId, TrainPosition>,
    delays: HashMap<TrainId, TrainDelay>,
    last_predictions: Vec<PredictedConflict>,
    stats: RealtimeStats,
    position_listeners: Vec<PositionListener>,
    conflict_listeners: Vec<ConflictListener>,
    adjustment_listeners: Vec<AdjustmentListener>,
}

impl RealTimeOptimizer {
    pub fn new(config: RealTimeConfig) -> RealTimeOptimizer {
        RealTimeOptimizer {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &RealTimeConfig {
        &self.config
    }

    pub fn stats(&self) -> RealtimeStats {
        self.stats
    }

    pub fn positions(&self) -> &HashMap<TrainId, TrainPosition> {
        &self.positions
    }

    pub fn delays(&self) -> &HashMap<TrainId, TrainDelay> {
        &self.delays
    }

    pub fn last_predictions(&self) -> &[PredictedConflict] {
        &self.last_predictions
    }

    pub fn on_position_updated(&mut self, listener: PositionListener) {
        self.position_listeners.push(listener);
    }

    pub fn on_conflict_predicted(&mut self, listener: ConflictListener) {
        self.conflict_listeners.push(listener);
    }

    pub fn on_adjustment_generated(&mut self, listener: AdjustmentListener) {
        self.adjustment_listeners.push(listener);
    }

    /// Ingests a position report. Invalid reports (progress outside
    /// `[0, 1]`, negative speed) are skipped and logged, never a hard
    /// error (§4.7, §7 "never throws on bad position data").
    pub fn update_position(&mut self, position: TrainPosition) {
        if !position.is_valid() {
            log::warn!(
                "discarding invalid position report for {}: progress={} speed={}",
                position.train_id,
                position.progress,
                position.speed_kmh
            );
            return;
        }
        self.stats.position_updates += 1;
        for listener in &self.position_listeners {
            listener(&position);
        }
        self.positions.insert(position.train_id.clone(), position);
    }

    pub fn update_delay(&mut self, delay: TrainDelay) {
        self.delays.insert(delay.train_id.clone(), delay);
    }

    /// Predicts near-future conflicts among all tracked pairs within
    /// the configured horizon (§4.7 steps 1-4).
    pub fn predict_conflicts(&mut self, network: &RailwayNetwork) -> Vec<PredictedConflict> {
        let mut ids: Vec<&TrainId> = self.positions.keys().collect();
        ids.sort();
        let mut predictions = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let a = &self.positions[ids[i]];
                let b = &self.positions[ids[j]];
                if let Some(conflict) = predict_pair(a, b, self.config.horizon(), network) {
                    if conflict.confidence >= self.config.confidence_threshold {
                        for listener in &self.conflict_listeners {
                            listener(&conflict);
                        }
                        predictions.push(conflict);
                    }
                }
            }
        }
        self.stats.predictions_made += predictions.len() as u64;
        log::debug!(
            "predict_conflicts: {} tracked trains, {} predictions above threshold {:.2}",
            ids.len(),
            predictions.len(),
            self.config.confidence_threshold
        );
        self.last_predictions = predictions.clone();
        predictions
    }

    /// Generates and applies up to `max_adjustments_per_cycle`
    /// adjustments for the most recent predictions, one per predicted
    /// conflict (§4.7 "Adjustment generation").
    pub fn optimize(
        &mut self,
        network: &RailwayNetwork,
        schedules: &[TrainSchedule],
        route_optimizer: Option<&RouteOptimizer>,
    ) -> Vec<ScheduleAdjustment> {
        self.predict_conflicts(network);
        let mut adjustments = Vec::new();
        for conflict in self.last_predictions.clone() {
            if adjustments.len() >= self.config.max_adjustments_per_cycle {
                break;
            }
            let schedule = schedules.iter().find(|s| s.train_id() == &conflict.train1);
            let candidates = candidates_for(&conflict, &conflict.train1, &self.config, schedule, route_optimizer, network);
            if let Some(best) = select_best(candidates) {
                for listener in &self.adjustment_listeners {
                    listener(&best);
                }
                self.stats.adjustments_applied += 1;
                let n = self.stats.adjustments_applied as f64;
                self.stats.average_delay_reduction_minutes +=
                    (best.estimated_delay_reduction_minutes - self.stats.average_delay_reduction_minutes) / n;
                adjustments.push(best);
            }
        }
        log::info!("optimize: {} adjustments generated this cycle", adjustments.len());
        adjustments
    }
}
