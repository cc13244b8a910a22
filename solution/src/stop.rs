use model::NodeId;
use time::Instant;

/// One stop (or pass-through) in a `TrainSchedule` (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleStop {
    node_id: NodeId,
    arrival: Instant,
    departure: Instant,
    is_stop: bool,
    platform: Option<u32>,
}

impl ScheduleStop {
    pub fn new(
        node_id: impl Into<NodeId>,
        arrival: Instant,
        departure: Instant,
        is_stop: bool,
        platform: Option<u32>,
    ) -> ScheduleStop {
        ScheduleStop {
            node_id: node_id.into(),
            arrival,
            departure,
            is_stop,
            platform,
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn arrival(&self) -> Instant {
        self.arrival
    }

    pub fn departure(&self) -> Instant {
        self.departure
    }

    pub fn is_stop(&self) -> bool {
        self.is_stop
    }

    pub fn platform(&self) -> Option<u32> {
        self.platform
    }

    pub fn dwell(&self) -> time::Span {
        self.departure - self.arrival
    }

    pub fn shift(&mut self, delay: time::Span) {
        self.arrival = self.arrival + delay;
        self.departure = self.departure + delay;
    }

    pub fn set_platform(&mut self, platform: Option<u32>) {
        self.platform = platform;
    }

    pub fn with_times(&self, arrival: Instant, departure: Instant) -> ScheduleStop {
        ScheduleStop {
            arrival,
            departure,
            ..self.clone()
        }
    }
}
