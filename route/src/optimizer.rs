use model::network::{RailwayNetwork, Weight};
use model::{NodeId, Path};
use serde::{Deserialize, Serialize};
use solution::{ScheduleStop, TrainSchedule};
use solver::Conflict;
use std::collections::HashSet;
use time::{Instant, Span};

/// Config for the route optimizer (C6, §4.6). Weights are expected to
/// sum to 1.0, matching the contract's "combines with configured
/// weights summing to 1.0".
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteOptimizerConfig {
    pub max_alternatives: usize,
    pub max_distance_multiplier: f64,
    pub max_time_multiplier: f64,
    pub distance_weight: f64,
    pub time_weight: f64,
    pub conflict_weight: f64,
    pub track_quality_weight: f64,
    pub prefer_high_speed: bool,
    pub avoid_single_track: bool,
}

impl Default for RouteOptimizerConfig {
    fn default() -> RouteOptimizerConfig {
        RouteOptimizerConfig {
            max_alternatives: 3,
            max_distance_multiplier: 1.5,
            max_time_multiplier: 1.5,
            distance_weight: 0.3,
            time_weight: 0.3,
            conflict_weight: 0.25,
            track_quality_weight: 0.15,
            prefer_high_speed: false,
            avoid_single_track: false,
        }
    }
}

/// A candidate path together with its per-axis and combined scores
/// (§4.6).
#[derive(Clone, Debug)]
pub struct ScoredPath {
    pub path: Path,
    pub distance_score: f64,
    pub time_score: f64,
    pub conflict_score: f64,
    pub track_quality_score: f64,
    pub combined_score: f64,
}

fn ratio_score(ratio: f64, ceiling: f64) -> f64 {
    if ratio <= 1.0 {
        1.0
    } else if ratio <= ceiling {
        1.0 - (ratio - 1.0) / (ceiling - 1.0)
    } else {
        0.0
    }
}

fn conflict_touches_path(conflict: &Conflict, path: &Path) -> bool {
    match &conflict.location_to {
        Some(to) => path
            .nodes
            .windows(2)
            .any(|w| (w[0] == conflict.location && w[1] == *to) || (w[0] == *to && w[1] == conflict.location)),
        None => path.nodes.contains(&conflict.location),
    }
}

/// Evaluates alternative paths against distance/time/conflict/track
/// quality criteria (C6, §4.6).
#[derive(Clone, Debug)]
pub struct RouteOptimizer {
    config: RouteOptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(config: RouteOptimizerConfig) -> RouteOptimizer {
        RouteOptimizer { config }
    }

    pub fn config(&self) -> &RouteOptimizerConfig {
        &self.config
    }

    fn track_quality_score(&self, network: &RailwayNetwork, path: &Path) -> f64 {
        if path.edges.is_empty() {
            return 0.5;
        }
        let total = path.edges.len() as f64;
        let high_speed = path
            .edges
            .iter()
            .filter(|(f, t)| {
                network
                    .get_edge(f, t)
                    .is_some_and(|e| e.track_type() == model::base_types::TrackType::HighSpeed)
            })
            .count() as f64;
        let single = path
            .edges
            .iter()
            .filter(|(f, t)| network.get_edge(f, t).is_some_and(|e| e.track_type().is_single()))
            .count() as f64;

        let mut score = 0.5;
        if self.config.prefer_high_speed {
            score += 0.3 * (high_speed / total);
        }
        if self.config.avoid_single_track {
            score -= 0.2 * (single / total);
        }
        score.clamp(0.0, 1.0)
    }

    /// Up to `max_alternatives` alternative paths, filtered and scored
    /// against the base shortest path (§4.6 steps 1-4).
    pub fn evaluate_alternatives(
        &self,
        network: &RailwayNetwork,
        from: &NodeId,
        to: &NodeId,
        excluded_edges: &HashSet<(NodeId, NodeId)>,
        conflicts: &[Conflict],
    ) -> Vec<ScoredPath> {
        let base = network.shortest_path(from, to, Weight::Distance);
        if !base.is_valid() {
            return Vec::new();
        }
        let base_distance_km = base.total_distance.km();
        let base_time_hours = base.min_travel_time_hours;

        let k = (self.config.max_alternatives + 1).min(10).max(1);
        let Ok(ranked) = network.k_shortest_paths(from, to, k, Weight::Distance) else {
            return Vec::new();
        };

        let mut scored: Vec<ScoredPath> = ranked
            .into_iter()
            .map(|r| r.path)
            .filter(|p| p.nodes != base.nodes)
            .filter(|p| {
                !p.edges
                    .iter()
                    .any(|(f, t)| excluded_edges.contains(&(f.clone(), t.clone())) || excluded_edges.contains(&(t.clone(), f.clone())))
            })
            .filter(|p| {
                let distance_ratio = if base_distance_km > 0.0 { p.total_distance.km() / base_distance_km } else { 1.0 };
                let time_ratio = if base_time_hours > 0.0 { p.min_travel_time_hours / base_time_hours } else { 1.0 };
                distance_ratio <= self.config.max_distance_multiplier && time_ratio <= self.config.max_time_multiplier
            })
            .map(|p| {
                let distance_ratio = if base_distance_km > 0.0 { p.total_distance.km() / base_distance_km } else { 1.0 };
                let time_ratio = if base_time_hours > 0.0 { p.min_travel_time_hours / base_time_hours } else { 1.0 };
                let distance_score = ratio_score(distance_ratio, self.config.max_distance_multiplier);
                let time_score = ratio_score(time_ratio, self.config.max_time_multiplier);
                let touched = conflicts.iter().filter(|c| conflict_touches_path(c, &p)).count();
                let conflict_score = (1.0 - 0.2 * touched as f64).max(0.0);
                let track_quality_score = self.track_quality_score(network, &p);
                let combined_score = self.config.distance_weight * distance_score
                    + self.config.time_weight * time_score
                    + self.config.conflict_weight * conflict_score
                    + self.config.track_quality_weight * track_quality_score;
                ScoredPath {
                    path: p,
                    distance_score,
                    time_score,
                    conflict_score,
                    track_quality_score,
                    combined_score,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.combined_score.partial_cmp(&a.combined_score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.max_alternatives);
        log::debug!(
            "evaluate_alternatives {from}->{to}: {} candidates after filtering, best score {:.2}",
            scored.len(),
            scored.first().map(|s| s.combined_score).unwrap_or(0.0)
        );
        scored
    }

    /// The single best-scoring alternative, or `None` if none survive
    /// filtering (§4.6, S6).
    pub fn find_best_reroute(
        &self,
        network: &RailwayNetwork,
        from: &NodeId,
        to: &NodeId,
        excluded_edges: &HashSet<(NodeId, NodeId)>,
        conflicts: &[Conflict],
    ) -> Option<ScoredPath> {
        self.evaluate_alternatives(network, from, to, excluded_edges, conflicts)
            .into_iter()
            .next()
    }

    /// Regenerates a schedule's intermediate stops along `path`,
    /// preserving the first and last stop's original times except where
    /// the reroute would otherwise violate monotonic ordering (§4.6
    /// "Apply-reroute semantics", S6).
    pub fn apply_reroute(&self, schedule: &TrainSchedule, path: &Path, network: &RailwayNetwork) -> TrainSchedule {
        let mut new_schedule = TrainSchedule::new(schedule.id().clone(), schedule.train_id().clone());
        let (Some(first), Some(last)) = (schedule.stops().first(), schedule.stops().last()) else {
            return schedule.clone();
        };
        if path.nodes.len() < 2 {
            return schedule.clone();
        }

        new_schedule.append_stop(first.clone());
        let intermediate_dwell = Span::from_seconds(120);
        let mut current_time: Instant = first.departure();

        for (i, window) in path.nodes.windows(2).enumerate() {
            let (from, to) = (&window[0], &window[1]);
            let travel_hours = network.get_edge(from, to).map(|e| e.min_travel_time_hours()).unwrap_or(0.0);
            let travel = Span::from_seconds((travel_hours * 3600.0).round() as i64);
            let arrival = current_time + travel;
            let is_last_edge = i == path.nodes.len() - 2;

            if is_last_edge {
                let final_arrival = arrival.max(last.arrival());
                let final_departure = last.departure().max(final_arrival);
                new_schedule.append_stop(last.with_times(final_arrival, final_departure));
                current_time = final_departure;
            } else {
                let departure = arrival + intermediate_dwell;
                new_schedule.append_stop(ScheduleStop::new(to.clone(), arrival, departure, true, None));
                current_time = departure;
            }
        }

        new_schedule
    }
}
