use crate::conflict::{Conflict, ConflictKind};
use crate::priority;
use model::network::RailwayNetwork;
use model::{NodeId, Train, TrainId};
use serde::{Deserialize, Serialize};
use solution::TrainSchedule;
use std::collections::HashMap;
use time::Span;

/// Resolver config (§4.5); every knob explicit, no hidden defaults.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub delay_weight: f64,
    pub platform_change_weight: f64,
    pub reroute_weight: f64,
    pub passenger_impact_weight: f64,
    pub max_delay_minutes: f64,
    pub min_headway_seconds: i64,
    pub station_dwell_buffer_seconds: i64,
    pub allow_single_track_meets: bool,
    pub prefer_double_track_routing: bool,
    pub single_track_meet_buffer_seconds: i64,
    pub allow_platform_reassignment: bool,
    pub optimize_platform_usage: bool,
    pub platform_buffer_seconds: i64,
    pub platform_change_cost_seconds: i64,
}

impl Default for ResolverConfig {
    fn default() -> ResolverConfig {
        ResolverConfig {
            delay_weight: 1.0,
            platform_change_weight: 0.5,
            reroute_weight: 0.8,
            passenger_impact_weight: 1.2,
            max_delay_minutes: 30.0,
            min_headway_seconds: 120,
            station_dwell_buffer_seconds: 60,
            allow_single_track_meets: true,
            prefer_double_track_routing: true,
            single_track_meet_buffer_seconds: 300,
            allow_platform_reassignment: true,
            optimize_platform_usage: true,
            platform_buffer_seconds: 180,
            platform_change_cost_seconds: 180,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Delay,
    Reroute,
    ChangePlatform,
    AdjustSpeed,
    AddMeetPoint,
    PriorityBased,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Delay => "delay",
            Strategy::Reroute => "reroute",
            Strategy::ChangePlatform => "change-platform",
            Strategy::AdjustSpeed => "adjust-speed",
            Strategy::AddMeetPoint => "add-meet-point",
            Strategy::PriorityBased => "priority-based",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolutionResult {
    pub success: bool,
    pub strategy: Strategy,
    pub description: String,
    pub modified_trains: Vec<TrainId>,
    pub total_delay: Span,
    pub quality_score: f64,
}

fn find_schedule_mut<'a>(
    schedules: &'a mut [TrainSchedule],
    train_id: &TrainId,
) -> Option<&'a mut TrainSchedule> {
    schedules.iter_mut().find(|s| s.train_id() == train_id)
}

fn find_schedule<'a>(schedules: &'a [TrainSchedule], train_id: &TrainId) -> Option<&'a TrainSchedule> {
    schedules.iter().find(|s| s.train_id() == train_id)
}

fn stop_index_at(schedule: &TrainSchedule, node_id: &NodeId) -> Option<usize> {
    schedule.stops().iter().position(|s| s.node_id() == node_id)
}

/// Applies strategy per conflict class, mutating schedules in place
/// (C5, §4.5).
pub struct RailwayAiResolver {
    config: ResolverConfig,
    accrued_delay_minutes: HashMap<TrainId, f64>,
}

impl RailwayAiResolver {
    pub fn new(config: ResolverConfig) -> RailwayAiResolver {
        RailwayAiResolver {
            config,
            accrued_delay_minutes: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn priority_of(&self, trains: &HashMap<TrainId, Train>, id: &TrainId) -> f64 {
        let kind = trains.get(id).map(|t| t.kind()).unwrap_or_default();
        let accrued = *self.accrued_delay_minutes.get(id).unwrap_or(&0.0);
        priority::priority(kind, accrued)
    }

    fn record_delay(&mut self, id: &TrainId, delay: Span) {
        *self.accrued_delay_minutes.entry(id.clone()).or_insert(0.0) += delay.minutes().abs();
    }

    /// One pass over `conflicts`, processed in descending severity
    /// order (§4.5, §5). Does not re-detect conflicts that reappear —
    /// callers re-run the detector and call `resolve_all` again for a
    /// further pass.
    pub fn resolve_all(
        &mut self,
        conflicts: &[Conflict],
        schedules: &mut [TrainSchedule],
        network: &RailwayNetwork,
        trains: &HashMap<TrainId, Train>,
    ) -> Vec<ResolutionResult> {
        let mut ordered: Vec<&Conflict> = conflicts.iter().collect();
        ordered.sort_by(|a, b| {
            b.severity
                .partial_cmp(&a.severity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.train1.as_str().cmp(b.train1.as_str()))
                .then_with(|| {
                    a.train2
                        .as_ref()
                        .map(|t| t.as_str())
                        .unwrap_or("")
                        .cmp(b.train2.as_ref().map(|t| t.as_str()).unwrap_or(""))
                })
        });

        ordered
            .into_iter()
            .map(|conflict| {
                let result = self.resolve_one(conflict, schedules, network, trains);
                log::info!(
                    "resolved {} conflict (severity {:.1}) via {}: success={} {}",
                    conflict.kind.label(),
                    conflict.severity,
                    result.strategy.label(),
                    result.success,
                    result.description,
                );
                result
            })
            .collect()
    }

    fn resolve_one(
        &mut self,
        conflict: &Conflict,
        schedules: &mut [TrainSchedule],
        network: &RailwayNetwork,
        trains: &HashMap<TrainId, Train>,
    ) -> ResolutionResult {
        match &conflict.kind {
            ConflictKind::SectionOverlap { from, to } => {
                self.resolve_section_overlap(conflict, from, to, schedules, network, trains)
            }
            ConflictKind::HeadOn { from, to } => {
                self.resolve_section_overlap(conflict, from, to, schedules, network, trains)
            }
            ConflictKind::PlatformConflict { platform } => {
                self.resolve_platform_conflict(conflict, *platform, schedules, trains)
            }
            ConflictKind::TimingViolation => self.resolve_timing_violation(conflict, schedules),
        }
    }

    fn resolve_section_overlap(
        &mut self,
        conflict: &Conflict,
        from: &NodeId,
        to: &NodeId,
        schedules: &mut [TrainSchedule],
        network: &RailwayNetwork,
        trains: &HashMap<TrainId, Train>,
    ) -> ResolutionResult {
        let Some(train2) = conflict.train2.clone() else {
            return self.infeasible("section-overlap conflict missing second train");
        };
        let train1 = conflict.train1.clone();

        let p1 = self.priority_of(trains, &train1);
        let p2 = self.priority_of(trains, &train2);
        let lower = priority::lower_priority((train1.as_str(), p1), (train2.as_str(), p2));
        let lower_id: TrainId = lower.into();

        let is_double = matches!(conflict.kind, ConflictKind::SectionOverlap { .. })
            && network
                .get_edge(from, to)
                .is_some_and(|e| e.track_type() == model::base_types::TrackType::Double);

        if is_double {
            let delay = Span::from_seconds(self.config.min_headway_seconds + 30);
            return self.apply_delay_at(
                schedules,
                &lower_id,
                from,
                delay,
                Strategy::AdjustSpeed,
                format!("adjust-speed: delay {lower_id} by min-headway+30s on {from}->{to}"),
            );
        }

        if self.config.allow_single_track_meets {
            if let Some(meet) = self.find_meet_point(&train1, &train2, schedules, network) {
                let delay = Span::from_seconds(self.config.single_track_meet_buffer_seconds);
                return self.apply_delay_at(
                    schedules,
                    &lower_id,
                    &meet,
                    delay,
                    Strategy::AddMeetPoint,
                    format!("meet point at {meet}: delay {lower_id} by single-track buffer"),
                );
            }
        }

        let delay = Span::from_seconds(2 * self.config.single_track_meet_buffer_seconds);
        self.apply_delay_at(
            schedules,
            &lower_id,
            from,
            delay,
            Strategy::PriorityBased,
            format!("no meet point found: priority-based delay of {lower_id} by 2x single-track buffer"),
        )
    }

    /// A station q is a meet-point candidate iff both trains' stop
    /// sequences contain q and q has passing capability (§4.5,
    /// §GLOSSARY: ≥ 2 platforms). First *qualifying* candidate in
    /// ascending node order is chosen for determinism.
    fn find_meet_point(
        &self,
        train1: &TrainId,
        train2: &TrainId,
        schedules: &[TrainSchedule],
        network: &RailwayNetwork,
    ) -> Option<NodeId> {
        let s1 = find_schedule(schedules, train1)?;
        let s2 = find_schedule(schedules, train2)?;
        let nodes2: std::collections::HashSet<&NodeId> = s2.stops().iter().map(|s| s.node_id()).collect();
        let mut candidates: Vec<&NodeId> = s1
            .stops()
            .iter()
            .map(|s| s.node_id())
            .filter(|n| nodes2.contains(n))
            .collect();
        candidates.sort();
        candidates.dedup();
        candidates
            .into_iter()
            .find(|n| network.get_node(n).is_some_and(|n| n.has_passing_capability()))
            .cloned()
    }

    fn resolve_platform_conflict(
        &mut self,
        conflict: &Conflict,
        platform: u32,
        schedules: &mut [TrainSchedule],
        trains: &HashMap<TrainId, Train>,
    ) -> ResolutionResult {
        let Some(train2) = conflict.train2.clone() else {
            return self.infeasible("platform conflict missing second train");
        };
        let train1 = conflict.train1.clone();
        let p1 = self.priority_of(trains, &train1);
        let p2 = self.priority_of(trains, &train2);
        let lower = priority::lower_priority((train1.as_str(), p1), (train2.as_str(), p2));
        let lower_id: TrainId = lower.into();
        let node = conflict.location.clone();

        if self.config.allow_platform_reassignment {
            let window = find_schedule(schedules, &lower_id)
                .and_then(|s| s.stops_at(&node).find(|s| s.platform() == Some(platform)))
                .map(|s| (s.arrival(), s.departure()));

            if let Some((start, end)) = window {
                let buffer = Span::from_seconds(self.config.platform_buffer_seconds);
                let other_id = if lower_id == train1 { &train2 } else { &train1 };
                let other_reservations: Vec<(u32, time::Instant, time::Instant)> = find_schedule(schedules, other_id)
                    .map(|s| {
                        s.stops_at(&node)
                            .filter_map(|st| st.platform().map(|p| (p, st.arrival(), st.departure())))
                            .collect()
                    })
                    .unwrap_or_default();

                // caller-side alternative search: lowest-numbered free
                // platform not equal to the conflicting one and not
                // overlapping the other train's reservation, with
                // buffer expansion (§4.5).
                if let Some(alt) = (1..=64u32).find(|&p| {
                    p != platform
                        && !other_reservations.iter().any(|(op, os, oe)| {
                            *op == p && (start - buffer) < (*oe + buffer) && (*os - buffer) < (end + buffer)
                        })
                }) {
                    if let Some(sched) = find_schedule_mut(schedules, &lower_id) {
                        for stop in sched.stops_mut().iter_mut().filter(|s| s.node_id() == &node) {
                            if stop.platform() == Some(platform) {
                                stop.set_platform(Some(alt));
                            }
                        }
                    }
                    return ResolutionResult {
                        success: true,
                        strategy: Strategy::ChangePlatform,
                        description: format!(
                            "reassigned {lower_id} from platform {platform} to {alt} at {node}"
                        ),
                        modified_trains: vec![lower_id],
                        total_delay: Span::ZERO,
                        quality_score: self.quality_score(Span::ZERO, 1, 1),
                    };
                }
            }
        }

        let delay = Span::from_seconds(
            self.config.platform_buffer_seconds + self.config.station_dwell_buffer_seconds,
        );
        self.apply_delay_at(
            schedules,
            &lower_id,
            &node,
            delay,
            Strategy::Delay,
            format!("no alternative platform: delay {lower_id} by platform+dwell buffer at {node}"),
        )
    }

    fn resolve_timing_violation(
        &mut self,
        conflict: &Conflict,
        schedules: &mut [TrainSchedule],
    ) -> ResolutionResult {
        let train = conflict.train1.clone();
        let node = conflict.location_to.clone().unwrap_or_else(|| conflict.location.clone());
        let delay = Span::from_seconds(self.config.min_headway_seconds);
        self.apply_delay_at(
            schedules,
            &train,
            &node,
            delay,
            Strategy::Delay,
            format!("timing violation: shift {train} from {node} by min-headway"),
        )
    }

    fn apply_delay_at(
        &mut self,
        schedules: &mut [TrainSchedule],
        train_id: &TrainId,
        node_id: &NodeId,
        delay: Span,
        strategy: Strategy,
        description: String,
    ) -> ResolutionResult {
        let Some(schedule) = find_schedule_mut(schedules, train_id) else {
            return self.infeasible(&format!("no schedule for train {train_id}"));
        };
        let Some(index) = stop_index_at(schedule, node_id) else {
            return self.infeasible(&format!("no stop at {node_id} for train {train_id}"));
        };
        let applied = match schedule.shift_from(index, delay) {
            Ok(applied) => applied,
            Err(e) => return self.infeasible(&e.to_string()),
        };
        self.record_delay(train_id, applied);

        ResolutionResult {
            success: true,
            strategy,
            description,
            modified_trains: vec![train_id.clone()],
            total_delay: applied,
            quality_score: self.quality_score(applied, 0, 1),
        }
    }

    fn quality_score(&self, total_delay: Span, platform_changes: u32, trains_modified: u32) -> f64 {
        let score = 1.0
            - (total_delay.minutes() / self.config.max_delay_minutes) * self.config.delay_weight * 0.3
            - (platform_changes as f64) * self.config.platform_change_weight * 0.1
            - (trains_modified as f64) * 0.05;
        score.clamp(0.0, 1.0)
    }

    fn infeasible(&self, reason: &str) -> ResolutionResult {
        ResolutionResult {
            success: false,
            strategy: Strategy::Delay,
            description: format!("resolution infeasible: {reason}"),
            modified_trains: Vec::new(),
            total_delay: Span::ZERO,
            quality_score: 0.0,
        }
    }
}
