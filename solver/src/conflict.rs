use model::{NodeId, TrainId};
use time::Instant;

/// Tagged conflict kinds (§3, §9 "do not model as subtype
/// polymorphism" — a closed tagged union with per-variant fields).
#[derive(Clone, Debug, PartialEq)]
pub enum ConflictKind {
    SectionOverlap { from: NodeId, to: NodeId },
    PlatformConflict { platform: u32 },
    HeadOn { from: NodeId, to: NodeId },
    TimingViolation,
}

impl ConflictKind {
    pub fn label(&self) -> &'static str {
        match self {
            ConflictKind::SectionOverlap { .. } => "section-overlap",
            ConflictKind::PlatformConflict { .. } => "platform-conflict",
            ConflictKind::HeadOn { .. } => "head-on",
            ConflictKind::TimingViolation => "timing-violation",
        }
    }
}

/// A detected conflict between one or two train schedules (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub train1: TrainId,
    pub train2: Option<TrainId>,
    pub location: NodeId,
    pub location_to: Option<NodeId>,
    pub time: Instant,
    pub description: String,
    pub severity: f64,
}

impl Conflict {
    /// The unordered-pair/kind/location dedup key (§4.4, invariant 4).
    pub fn dedup_key(&self) -> (String, String, String, &'static str) {
        let (a, b) = match &self.train2 {
            Some(t2) if t2.as_str() < self.train1.as_str() => (t2.as_str(), self.train1.as_str()),
            Some(t2) => (self.train1.as_str(), t2.as_str()),
            None => (self.train1.as_str(), ""),
        };
        let loc = match &self.location_to {
            Some(to) => format!("{}->{}", self.location, to),
            None => self.location.to_string(),
        };
        (a.to_string(), b.to_string(), loc, self.kind.label())
    }
}
