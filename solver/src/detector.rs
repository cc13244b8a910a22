use crate::conflict::{Conflict, ConflictKind};
use itertools::Itertools;
use model::network::RailwayNetwork;
use model::NodeId;
use serde::{Deserialize, Serialize};
use solution::TrainSchedule;
use std::collections::HashSet;
use time::{Instant, Span};

/// Buffer and toggle knobs for each of the four detectors (§4.4).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub section_buffer_seconds: i64,
    pub platform_buffer_seconds: i64,
    pub head_on_buffer_seconds: i64,
    pub detect_section_overlap: bool,
    pub detect_platform_conflict: bool,
    pub detect_head_on: bool,
    pub detect_timing_violation: bool,
}

impl Default for DetectorConfig {
    fn default() -> DetectorConfig {
        // 119s, not 120s — matches the observed original default; see
        // SPEC_FULL.md §9 open question (retained, not "corrected").
        DetectorConfig {
            section_buffer_seconds: 119,
            platform_buffer_seconds: 300,
            head_on_buffer_seconds: 600,
            detect_section_overlap: true,
            detect_platform_conflict: true,
            detect_head_on: true,
            detect_timing_violation: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DetectorStats {
    pub section_overlap_count: u64,
    pub platform_conflict_count: u64,
    pub head_on_count: u64,
    pub timing_violation_count: u64,
    pub pairs_examined: u64,
    pub detect_calls: u64,
}

/// Enumerates pairwise schedule interactions and classifies/rates
/// conflicts (C4, §4.4).
#[derive(Clone, Debug)]
pub struct ConflictDetector {
    config: DetectorConfig,
    stats: DetectorStats,
}

struct Occupation<'a> {
    train: &'a str,
    from: &'a NodeId,
    to: &'a NodeId,
    start: Instant,
    end: Instant,
}

struct PlatformOccupation<'a> {
    train: &'a str,
    node: &'a NodeId,
    platform: u32,
    start: Instant,
    end: Instant,
}

fn overlap_seconds(start1: Instant, end1: Instant, start2: Instant, end2: Instant, buffer: i64) -> Option<f64> {
    let gap = (start1.max(start2) - end1.min(end2)).seconds();
    let overlap = 2 * buffer - gap;
    if overlap > 0 {
        Some(overlap as f64)
    } else {
        None
    }
}

fn severity_from_overlap(overlap_seconds: f64, is_head_on: bool) -> f64 {
    if is_head_on {
        return 10.0;
    }
    let severity = if overlap_seconds < 60.0 {
        1.0 + (overlap_seconds / 60.0) * 2.0
    } else if overlap_seconds < 300.0 {
        4.0 + ((overlap_seconds - 60.0) / 240.0) * 2.0
    } else if overlap_seconds < 600.0 {
        7.0 + ((overlap_seconds - 300.0) / 300.0) * 1.0
    } else {
        9.0 + ((overlap_seconds - 600.0) / 600.0).min(1.0)
    };
    severity.clamp(0.0, 10.0)
}

impl ConflictDetector {
    pub fn new(config: DetectorConfig) -> ConflictDetector {
        ConflictDetector {
            config,
            stats: DetectorStats::default(),
        }
    }

    pub fn stats(&self) -> DetectorStats {
        self.stats
    }

    pub fn detect_all(&mut self, schedules: &[TrainSchedule], network: &RailwayNetwork) -> Vec<Conflict> {
        self.stats.detect_calls += 1;
        let mut conflicts = Vec::new();
        let mut seen: HashSet<(String, String, String, &'static str)> = HashSet::new();

        if self.config.detect_section_overlap || self.config.detect_head_on {
            let sections: Vec<Occupation<'_>> = schedules
                .iter()
                .flat_map(|s| {
                    s.stops().windows(2).map(move |w| Occupation {
                        train: s.train_id().as_str(),
                        from: w[0].node_id(),
                        to: w[1].node_id(),
                        start: w[0].departure(),
                        end: w[1].arrival(),
                    })
                })
                .collect();

            for (a, b) in sections.iter().tuple_combinations() {
                if a.train == b.train {
                    continue;
                }
                self.stats.pairs_examined += 1;

                let same_direction = a.from == b.from && a.to == b.to;
                let opposite_direction = a.from == b.to && a.to == b.from;
                if !same_direction && !opposite_direction {
                    continue;
                }

                let edge = network.get_edge(a.from, a.to);
                let is_head_on = opposite_direction
                    && edge.is_some_and(|e| e.bidirectional() && e.track_type().is_single());

                if is_head_on && self.config.detect_head_on {
                    if let Some(overlap) =
                        overlap_seconds(a.start, a.end, b.start, b.end, self.config.head_on_buffer_seconds)
                    {
                        push_conflict(
                            &mut conflicts,
                            &mut seen,
                            Conflict {
                                kind: ConflictKind::HeadOn {
                                    from: a.from.clone(),
                                    to: a.to.clone(),
                                },
                                train1: a.train.into(),
                                train2: Some(b.train.into()),
                                location: a.from.clone(),
                                location_to: Some(a.to.clone()),
                                time: a.start.max(b.start),
                                description: format!(
                                    "head-on between {} and {} on {}->{}",
                                    a.train, b.train, a.from, a.to
                                ),
                                severity: severity_from_overlap(overlap, true),
                            },
                            &mut self.stats.head_on_count,
                        );
                    }
                } else if same_direction && self.config.detect_section_overlap {
                    if let Some(overlap) = overlap_seconds(
                        a.start,
                        a.end,
                        b.start,
                        b.end,
                        self.config.section_buffer_seconds,
                    ) {
                        push_conflict(
                            &mut conflicts,
                            &mut seen,
                            Conflict {
                                kind: ConflictKind::SectionOverlap {
                                    from: a.from.clone(),
                                    to: a.to.clone(),
                                },
                                train1: a.train.into(),
                                train2: Some(b.train.into()),
                                location: a.from.clone(),
                                location_to: Some(a.to.clone()),
                                time: a.start.max(b.start),
                                description: format!(
                                    "section overlap between {} and {} on {}->{}",
                                    a.train, b.train, a.from, a.to
                                ),
                                severity: severity_from_overlap(overlap, false),
                            },
                            &mut self.stats.section_overlap_count,
                        );
                    }
                }
            }
        }

        if self.config.detect_platform_conflict {
            let occupations: Vec<PlatformOccupation<'_>> = schedules
                .iter()
                .flat_map(|s| {
                    s.stops().iter().filter_map(move |stop| {
                        stop.platform().map(|p| PlatformOccupation {
                            train: s.train_id().as_str(),
                            node: stop.node_id(),
                            platform: p,
                            start: stop.arrival(),
                            end: stop.departure(),
                        })
                    })
                })
                .collect();

            for (a, b) in occupations.iter().tuple_combinations() {
                if a.train == b.train || a.node != b.node || a.platform != b.platform {
                    continue;
                }
                self.stats.pairs_examined += 1;
                if let Some(overlap) = overlap_seconds(
                    a.start,
                    a.end,
                    b.start,
                    b.end,
                    self.config.platform_buffer_seconds,
                ) {
                    push_conflict(
                        &mut conflicts,
                        &mut seen,
                        Conflict {
                            kind: ConflictKind::PlatformConflict { platform: a.platform },
                            train1: a.train.into(),
                            train2: Some(b.train.into()),
                            location: a.node.clone(),
                            location_to: None,
                            time: a.start.max(b.start),
                            description: format!(
                                "platform {} conflict between {} and {} at {}",
                                a.platform, a.train, b.train, a.node
                            ),
                            severity: severity_from_overlap(overlap, false),
                        },
                        &mut self.stats.platform_conflict_count,
                    );
                }
            }
        }

        if self.config.detect_timing_violation {
            for schedule in schedules {
                for w in schedule.stops().windows(2) {
                    let min_travel_time_hours = network
                        .shortest_path(w[0].node_id(), w[1].node_id(), model::network::Weight::TravelTime)
                        .min_travel_time_hours;
                    let scheduled = (w[1].arrival() - w[0].departure()).seconds() as f64 / 3600.0;
                    if min_travel_time_hours > 0.0 && scheduled < 0.8 * min_travel_time_hours {
                        self.stats.timing_violation_count += 1;
                        conflicts.push(Conflict {
                            kind: ConflictKind::TimingViolation,
                            train1: schedule.train_id().clone(),
                            train2: None,
                            location: w[0].node_id().clone(),
                            location_to: Some(w[1].node_id().clone()),
                            time: w[0].departure(),
                            description: format!(
                                "timing violation on {} between {} and {}: scheduled {:.1}min below 0.8x graph minimum",
                                schedule.train_id(),
                                w[0].node_id(),
                                w[1].node_id(),
                                scheduled * 60.0
                            ),
                            severity: 5.0,
                        });
                    }
                }
                // Dwell check runs over every stop, not just windowed
                // pairs, so stop index 0's dwell is checked too (§4.4).
                for stop in schedule.stops() {
                    if stop.is_stop() && stop.dwell() < Span::from_seconds(60) {
                        self.stats.timing_violation_count += 1;
                        conflicts.push(Conflict {
                            kind: ConflictKind::TimingViolation,
                            train1: schedule.train_id().clone(),
                            train2: None,
                            location: stop.node_id().clone(),
                            location_to: None,
                            time: stop.arrival(),
                            description: format!(
                                "dwell time at {} below 60s minimum",
                                stop.node_id()
                            ),
                            severity: 3.0,
                        });
                    }
                }
            }
        }

        log::info!(
            "detect_all: {} conflicts over {} schedules ({} section-overlap, {} platform, {} head-on, {} timing)",
            conflicts.len(),
            schedules.len(),
            self.stats.section_overlap_count,
            self.stats.platform_conflict_count,
            self.stats.head_on_count,
            self.stats.timing_violation_count,
        );
        conflicts
    }

}

fn push_conflict(
    conflicts: &mut Vec<Conflict>,
    seen: &mut HashSet<(String, String, String, &'static str)>,
    conflict: Conflict,
    counter: &mut u64,
) {
    let key = conflict.dedup_key();
    if seen.insert(key) {
        *counter += 1;
        conflicts.push(conflict);
    }
}
