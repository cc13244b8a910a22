use crate::error::ScheduleError;
use crate::stop::ScheduleStop;
use model::base_types::ScheduleId;
use model::network::{RailwayNetwork, Weight};
use model::{Distance, NodeId, TrainId};
use time::Span;

/// An ordered stop sequence for one train (C3, §4.3).
#[derive(Clone, Debug)]
pub struct TrainSchedule {
    id: ScheduleId,
    train_id: TrainId,
    stops: Vec<ScheduleStop>,
}

impl TrainSchedule {
    pub fn new(id: impl Into<ScheduleId>, train_id: impl Into<TrainId>) -> TrainSchedule {
        TrainSchedule {
            id: id.into(),
            train_id: train_id.into(),
            stops: Vec::new(),
        }
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn train_id(&self) -> &TrainId {
        &self.train_id
    }

    pub fn stops(&self) -> &[ScheduleStop] {
        &self.stops
    }

    pub fn stops_mut(&mut self) -> &mut Vec<ScheduleStop> {
        &mut self.stops
    }

    pub fn append_stop(&mut self, stop: ScheduleStop) {
        self.stops.push(stop);
    }

    pub fn insert_at(&mut self, index: usize, stop: ScheduleStop) -> Result<(), ScheduleError> {
        if index > self.stops.len() {
            return Err(ScheduleError::IndexOutOfBounds(index, self.stops.len()));
        }
        self.stops.insert(index, stop);
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<ScheduleStop, ScheduleError> {
        if index >= self.stops.len() {
            return Err(ScheduleError::IndexOutOfBounds(index, self.stops.len()));
        }
        Ok(self.stops.remove(index))
    }

    pub fn stops_at(&self, node_id: &NodeId) -> impl Iterator<Item = &ScheduleStop> {
        self.stops.iter().filter(move |s| s.node_id() == node_id)
    }

    /// Shift every stop from `index` onward by `delay` (§4.5 "Delay
    /// application" — forward-only propagation). Returns the absolute
    /// shift applied, for `total_delay` accounting.
    pub fn shift_from(&mut self, index: usize, delay: Span) -> Result<Span, ScheduleError> {
        if index >= self.stops.len() {
            return Err(ScheduleError::IndexOutOfBounds(index, self.stops.len()));
        }
        for stop in &mut self.stops[index..] {
            stop.shift(delay);
        }
        Ok(delay.abs())
    }

    /// Chronological validity: non-decreasing arrivals, arrival ≤
    /// departure per stop (§4.3).
    pub fn is_chronological(&self) -> bool {
        self.stops.iter().all(|s| s.arrival() <= s.departure())
            && self.stops.windows(2).all(|w| w[0].arrival() <= w[1].arrival())
    }

    /// Topological validity: each consecutive pair is graph-reachable
    /// (§4.3, permits implicit pass-throughs).
    pub fn is_topological(&self, network: &RailwayNetwork) -> bool {
        self.stops.windows(2).all(|w| {
            w[0].node_id() == w[1].node_id()
                || network
                    .shortest_path(w[0].node_id(), w[1].node_id(), Weight::Distance)
                    .is_valid()
        })
    }

    /// Platform validity: where specified, platform numbers lie in
    /// `[1, platform_count]` for that node (§4.3).
    pub fn is_platform_valid(&self, network: &RailwayNetwork) -> bool {
        self.stops.iter().all(|s| match s.platform() {
            None => true,
            Some(p) => network
                .get_node(s.node_id())
                .is_some_and(|n| p >= 1 && p <= n.platform_count()),
        })
    }

    pub fn is_valid(&self, network: &RailwayNetwork) -> bool {
        self.is_chronological() && self.is_topological(network) && self.is_platform_valid(network)
    }

    /// Total duration: last departure − first arrival (§4.3).
    pub fn total_duration(&self) -> Span {
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => last.departure() - first.arrival(),
            _ => Span::ZERO,
        }
    }

    /// Total distance: sum over consecutive-pair graph distances (§4.3).
    pub fn total_distance(&self, network: &RailwayNetwork) -> Distance {
        self.stops
            .windows(2)
            .map(|w| {
                network
                    .shortest_path(w[0].node_id(), w[1].node_id(), Weight::Distance)
                    .total_distance
            })
            .sum()
    }

    /// Average speed in km/h over `total_duration` (§4.3). `None` when
    /// the schedule has fewer than two stops or zero duration.
    pub fn average_speed(&self, network: &RailwayNetwork) -> Option<f64> {
        let duration = self.total_duration();
        if duration.is_zero() {
            return None;
        }
        Some(self.total_distance(network).km() / (duration.seconds() as f64 / 3600.0))
    }
}
