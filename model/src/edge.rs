use crate::base_types::{Distance, NodeId, Speed, TrackType};

#[derive(Clone, Debug)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    length: Distance,
    track_type: TrackType,
    max_speed: Speed,
    capacity: u32,
    bidirectional: bool,
}

impl Edge {
    pub fn new(
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        length: Distance,
        track_type: TrackType,
        max_speed: Speed,
        capacity: u32,
        bidirectional: bool,
    ) -> Edge {
        Edge {
            from: from.into(),
            to: to.into(),
            length,
            track_type,
            max_speed,
            capacity,
            bidirectional,
        }
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn track_type(&self) -> TrackType {
        self.track_type
    }

    pub fn max_speed(&self) -> Speed {
        self.max_speed
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Travel time in hours at this edge's max permitted speed, ignoring
    /// the train's own acceleration profile (used for `travel_time`
    /// weighted pathfinding, §4.1).
    pub fn min_travel_time_hours(&self) -> f64 {
        self.length.km() / self.max_speed
    }

    /// Whether the two nodes given, in this direction, traverse this
    /// edge — accounting for the bidirectional flag (§4.1 edge case
    /// policy: the flag is consulted on lookup rather than materializing
    /// a mirror edge).
    pub fn permits_direction(&self, from: &NodeId, to: &NodeId) -> bool {
        (self.from == *from && self.to == *to) || (self.bidirectional && self.from == *to && self.to == *from)
    }
}
