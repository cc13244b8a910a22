use model::{NodeId, TrainId};
use time::Instant;

/// A live position report for one tracked train (§4.7). `progress` is
/// normalized `[0, 1]` along the current-to-next edge, not an absolute
/// along the whole path (§9 open question).
#[derive(Clone, Debug, PartialEq)]
pub struct TrainPosition {
    pub train_id: TrainId,
    pub current_node: NodeId,
    pub next_node: Option<NodeId>,
    pub progress: f64,
    pub speed_kmh: f64,
    pub timestamp: Instant,
    pub coordinates: Option<(f64, f64)>,
}

impl TrainPosition {
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.progress) && self.speed_kmh >= 0.0
    }
}

/// A train's current schedule delay (§4.7). Signed: negative means
/// running early.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainDelay {
    pub train_id: TrainId,
    pub delay_minutes: f64,
    pub reason: String,
    pub detected_at: Instant,
    pub is_recovering: bool,
}
