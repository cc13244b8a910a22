use crate::config::RealTimeConfig;
use crate::prediction::PredictedConflict;
use model::network::RailwayNetwork;
use model::TrainId;
use route::RouteOptimizer;
use solution::TrainSchedule;
use time::Span;

/// Closed tagged union of adjustment kinds the real-time optimizer can
/// propose (§4.7, §9 "do not model as subtype polymorphism").
#[derive(Clone, Debug, PartialEq)]
pub enum AdjustmentKind {
    SpeedChange { factor: f64 },
    HoldAtStation { hold: Span },
    RouteChange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleAdjustment {
    pub train_id: TrainId,
    pub kind: AdjustmentKind,
    pub description: String,
    pub confidence: f64,
    pub estimated_delay_reduction_minutes: f64,
}

/// Candidate adjustments for one predicted conflict, per §4.7 constants:
/// speed-change (x0.85, confidence 0.75, 3.0min reduction),
/// hold-at-station (5min, confidence 0.80, 2.0min reduction), and,
/// when enabled and a better route exists, route-change (confidence
/// 0.65, 5.0min reduction). The highest-reduction candidate whose
/// confidence exceeds 0.5 is selected by the caller.
pub fn candidates_for(
    conflict: &PredictedConflict,
    train_id: &TrainId,
    config: &RealTimeConfig,
    schedule: Option<&TrainSchedule>,
    route_optimizer: Option<&RouteOptimizer>,
    network: &RailwayNetwork,
) -> Vec<ScheduleAdjustment> {
    let mut out = vec![
        ScheduleAdjustment {
            train_id: train_id.clone(),
            kind: AdjustmentKind::SpeedChange { factor: 0.85 },
            description: format!("reduce speed of {train_id} to 85% to avoid predicted conflict at {}", conflict.node),
            confidence: 0.75,
            estimated_delay_reduction_minutes: 3.0,
        },
        ScheduleAdjustment {
            train_id: train_id.clone(),
            kind: AdjustmentKind::HoldAtStation { hold: Span::from_seconds(5 * 60) },
            description: format!("hold {train_id} for 5min at current station to avoid predicted conflict at {}", conflict.node),
            confidence: 0.80,
            estimated_delay_reduction_minutes: 2.0,
        },
    ];

    if config.enable_reroute {
        if let (Some(schedule), Some(route_optimizer)) = (schedule, route_optimizer) {
            if let (Some(first), Some(last)) = (schedule.stops().first(), schedule.stops().last()) {
                let better_route_exists = route_optimizer
                    .find_best_reroute(network, first.node_id(), last.node_id(), &Default::default(), &[])
                    .is_some_and(|scored| scored.combined_score > 0.0);
                if better_route_exists {
                    out.push(ScheduleAdjustment {
                        train_id: train_id.clone(),
                        kind: AdjustmentKind::RouteChange,
                        description: format!("reroute {train_id} around predicted conflict at {}", conflict.node),
                        confidence: 0.65,
                        estimated_delay_reduction_minutes: 5.0,
                    });
                }
            }
        }
    }

    out
}

/// Picks the candidate with the highest estimated delay reduction
/// whose confidence exceeds 0.5 (§4.7).
pub fn select_best(candidates: Vec<ScheduleAdjustment>) -> Option<ScheduleAdjustment> {
    candidates
        .into_iter()
        .filter(|c| c.confidence > 0.5)
        .max_by(|a, b| {
            a.estimated_delay_reduction_minutes
                .partial_cmp(&b.estimated_delay_reduction_minutes)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
