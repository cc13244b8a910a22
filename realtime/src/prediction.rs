use crate::position::TrainPosition;
use model::network::RailwayNetwork;
use model::TrainId;
use time::{Instant, Span};

/// A predicted near-future conflict between two tracked trains (§4.7).
#[derive(Clone, Debug, PartialEq)]
pub struct PredictedConflict {
    pub train1: TrainId,
    pub train2: TrainId,
    pub node: model::NodeId,
    pub predicted_time: Instant,
    pub confidence: f64,
}

/// Linear projection of a position `step` forward: advances `progress`
/// along the current edge at `speed_kmh`, using the edge's actual
/// length (the original hardcodes a 50km normalization constant here;
/// corrected per SPEC_FULL.md §4.7). Progress clamps at 1.0 — the
/// train is treated as arrived at `next_node` for any longer horizon.
pub fn predict_position_at_time(
    position: &TrainPosition,
    step: Span,
    network: &RailwayNetwork,
) -> (Option<model::NodeId>, f64) {
    let Some(next) = &position.next_node else {
        return (None, position.progress);
    };
    let edge_km = network
        .get_edge(&position.current_node, next)
        .map(|e| e.length().km())
        .unwrap_or(50.0);
    if edge_km <= 0.0 {
        return (Some(next.clone()), 1.0);
    }
    let distance_covered = position.speed_kmh * (step.seconds() as f64 / 3600.0);
    let progress = (position.progress + distance_covered / edge_km).min(1.0);
    (Some(next.clone()), progress)
}

fn confidence_for(a: &TrainPosition, b: &TrainPosition) -> f64 {
    let mut confidence = 0.7;
    let far_apart = a.current_node != b.current_node && a.next_node != b.next_node;
    if far_apart {
        confidence *= 0.8;
    }
    if a.speed_kmh > 0.0 && b.speed_kmh > 0.0 {
        confidence *= 1.1;
    }
    confidence.clamp(0.0, 1.0)
}

/// Steps a simulated clock in 10s increments up to `horizon`, flagging
/// a collision when both trains share the predicted next node with
/// progresses within 0.1 of each other (§4.7 algorithm, steps 1-4). Each
/// pair contributes at most one `PredictedConflict`.
pub fn predict_pair(
    a: &TrainPosition,
    b: &TrainPosition,
    horizon: Span,
    network: &RailwayNetwork,
) -> Option<PredictedConflict> {
    let mut elapsed = Span::ZERO;
    let step = Span::from_seconds(10);
    while elapsed <= horizon {
        let (a_next, a_progress) = predict_position_at_time(a, elapsed, network);
        let (b_next, b_progress) = predict_position_at_time(b, elapsed, network);
        if let (Some(a_next), Some(b_next)) = (&a_next, &b_next) {
            if a_next == b_next && (a_progress - b_progress).abs() < 0.1 {
                return Some(PredictedConflict {
                    train1: a.train_id.clone(),
                    train2: b.train_id.clone(),
                    node: a_next.clone(),
                    predicted_time: a.timestamp.max(b.timestamp) + elapsed,
                    confidence: confidence_for(a, b),
                });
            }
        }
        elapsed = elapsed + step;
    }
    None
}
