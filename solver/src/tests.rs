use crate::detector::{ConflictDetector, DetectorConfig};
use crate::resolver::{RailwayAiResolver, ResolverConfig, Strategy};
use model::base_types::{NodeType, TrackType, TrainType};
use model::edge::Edge;
use model::network::RailwayNetwork;
use model::node::Node;
use model::{Distance, Train, TrainId};
use solution::{ScheduleStop, TrainSchedule};
use std::collections::HashMap;
use time::Instant;

fn minutes(m: i64) -> Instant {
    Instant::from_seconds_since_epoch(m * 60)
}

fn station(id: &str, platforms: u32) -> Node {
    Node::new(id, id, NodeType::Station, 0.0, 0.0, 1, platforms)
}

/// S1 — platform conflict at a small station.
#[test]
fn s1_platform_conflict_detected_with_expected_severity() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("MIL", 12)).unwrap();
    net.add_node(station("MON", 4)).unwrap();
    net.add_node(station("COM", 3)).unwrap();
    net.add_edge(Edge::new("MIL", "MON", Distance::from_km(15.0), TrackType::Double, 140.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("MON", "COM", Distance::from_km(30.0), TrackType::Single, 120.0, 1, true))
        .unwrap();

    let mut ic101 = TrainSchedule::new("IC101", "IC101");
    ic101.append_stop(ScheduleStop::new("MIL", minutes(8 * 60), minutes(8 * 60), true, Some(1)));
    ic101.append_stop(ScheduleStop::new("MON", minutes(8 * 60 + 8), minutes(8 * 60 + 10), true, Some(1)));
    ic101.append_stop(ScheduleStop::new("COM", minutes(8 * 60 + 25), minutes(8 * 60 + 25), true, Some(1)));

    let mut r205 = TrainSchedule::new("R205", "R205");
    r205.append_stop(ScheduleStop::new("COM", minutes(8 * 60 + 20), minutes(8 * 60 + 20), true, Some(1)));
    r205.append_stop(ScheduleStop::new("MON", minutes(8 * 60 + 35), minutes(8 * 60 + 37), true, Some(2)));
    r205.append_stop(ScheduleStop::new("MIL", minutes(8 * 60 + 47), minutes(8 * 60 + 47), true, Some(3)));

    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let conflicts = detector.detect_all(&[ic101, r205], &net);

    let platform_conflicts: Vec<_> = conflicts
        .iter()
        .filter(|c| matches!(c.kind, crate::conflict::ConflictKind::PlatformConflict { platform: 1 }))
        .collect();
    assert!(!platform_conflicts.is_empty(), "expected a platform-1 conflict at COM");
    assert!(platform_conflicts[0].severity >= 4.0);
    assert_eq!(platform_conflicts[0].location.as_str(), "COM");
}

/// S2 — head-on on single track, then resolved with a meet-point delay.
#[test]
fn s2_head_on_detected_and_resolved_with_meet_buffer_delay() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 3)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(35.0), TrackType::Single, 100.0, 1, true))
        .unwrap();

    let mut t1 = TrainSchedule::new("T1", "T1");
    t1.append_stop(ScheduleStop::new("A", minutes(10 * 60), minutes(10 * 60), true, Some(1)));
    t1.append_stop(ScheduleStop::new("B", minutes(10 * 60 + 25), minutes(10 * 60 + 25), true, Some(1)));

    let mut t2 = TrainSchedule::new("T2", "T2");
    t2.append_stop(ScheduleStop::new("B", minutes(10 * 60), minutes(10 * 60), true, Some(1)));
    t2.append_stop(ScheduleStop::new("A", minutes(10 * 60 + 25), minutes(10 * 60 + 25), true, Some(1)));

    let mut schedules = vec![t1, t2];
    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let conflicts = detector.detect_all(&schedules, &net);

    let head_ons: Vec<_> = conflicts
        .iter()
        .filter(|c| matches!(c.kind, crate::conflict::ConflictKind::HeadOn { .. }))
        .collect();
    assert_eq!(head_ons.len(), 1);
    assert_eq!(head_ons[0].severity, 10.0);

    let mut trains = HashMap::new();
    trains.insert(TrainId::new("T1"), Train::default_for("T1", "T1", TrainType::Regional));
    trains.insert(TrainId::new("T2"), Train::default_for("T2", "T2", TrainType::Regional));

    let mut resolver = RailwayAiResolver::new(ResolverConfig::default());
    let results = resolver.resolve_all(&conflicts, &mut schedules, &net, &trains);
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert!(results[0].total_delay.seconds() >= 300);
}

/// Meet-point search must skip a shared station lacking passing
/// capability and keep looking rather than falling through to the
/// priority-based fallback (§4.5).
#[test]
fn meet_point_search_skips_non_passing_station_for_a_later_candidate() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("AAST", 1)).unwrap();
    net.add_node(station("MID1", 1)).unwrap();
    net.add_node(station("MID2", 1)).unwrap();
    net.add_node(station("ZZST", 2)).unwrap();
    net.add_edge(Edge::new("AAST", "MID1", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("MID1", "MID2", Distance::from_km(10.0), TrackType::Single, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("MID2", "ZZST", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();

    let mut t1 = TrainSchedule::new("T1", "T1");
    t1.append_stop(ScheduleStop::new("AAST", minutes(0), minutes(0), true, Some(1)));
    t1.append_stop(ScheduleStop::new("MID1", minutes(10), minutes(10), true, Some(1)));
    t1.append_stop(ScheduleStop::new("MID2", minutes(20), minutes(20), true, Some(1)));
    t1.append_stop(ScheduleStop::new("ZZST", minutes(30), minutes(30), true, Some(1)));

    let mut t2 = TrainSchedule::new("T2", "T2");
    t2.append_stop(ScheduleStop::new("ZZST", minutes(0), minutes(0), true, Some(1)));
    t2.append_stop(ScheduleStop::new("MID2", minutes(10), minutes(10), true, Some(1)));
    t2.append_stop(ScheduleStop::new("MID1", minutes(20), minutes(20), true, Some(1)));
    t2.append_stop(ScheduleStop::new("AAST", minutes(30), minutes(30), true, Some(1)));

    let mut schedules = vec![t1, t2];
    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let conflicts = detector.detect_all(&schedules, &net);
    let head_ons: Vec<_> = conflicts
        .iter()
        .filter(|c| matches!(c.kind, crate::conflict::ConflictKind::HeadOn { .. }))
        .cloned()
        .collect();
    assert_eq!(head_ons.len(), 1);

    let trains = HashMap::from([
        (TrainId::new("T1"), Train::default_for("T1", "T1", TrainType::Regional)),
        (TrainId::new("T2"), Train::default_for("T2", "T2", TrainType::Regional)),
    ]);
    let config = ResolverConfig::default();
    let mut resolver = RailwayAiResolver::new(config);
    let results = resolver.resolve_all(&head_ons, &mut schedules, &net, &trains);

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].strategy, Strategy::AddMeetPoint);
    assert_eq!(results[0].total_delay.seconds(), config.single_track_meet_buffer_seconds);
}

/// S4 — timing violation: implied speed above the 0.8x minimum threshold
/// must NOT flag (sanity check for the boundary in the opposite direction
/// of what S4's literal scenario describes: the literal numbers given in
/// the scenario — 50km in 20min on a 100km/h track — imply 150km/h, which
/// is *above* track max and so is itself an invalid schedule; the
/// well-formed reading of S4 is the boundary check on the 0.8x threshold).
#[test]
fn timing_violation_fires_below_eighty_percent_of_graph_minimum() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(50.0), TrackType::Double, 100.0, 1, true))
        .unwrap();

    // Graph minimum travel time at 100km/h over 50km is 30 minutes.
    // Scheduling 20 minutes is 2/3 of that minimum, well below 0.8x.
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("A", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("B", minutes(20), minutes(20), true, Some(1)));

    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let conflicts = detector.detect_all(&[sched], &net);
    assert!(conflicts
        .iter()
        .any(|c| matches!(c.kind, crate::conflict::ConflictKind::TimingViolation)));
}

/// Dwell time is checked at every stop, including the first — a
/// `windows(2)`-only scan would never see stop index 0 (§4.4).
#[test]
fn dwell_violation_fires_on_the_first_stop() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();

    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("A", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("B", minutes(10), minutes(15), true, Some(1)));

    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let conflicts = detector.detect_all(&[sched], &net);
    assert!(conflicts.iter().any(|c| matches!(c.kind, crate::conflict::ConflictKind::TimingViolation)
        && c.location.as_str() == "A"));
}

#[test]
fn detector_is_idempotent_on_unchanged_input() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(35.0), TrackType::Single, 100.0, 1, true))
        .unwrap();

    let mut t1 = TrainSchedule::new("T1", "T1");
    t1.append_stop(ScheduleStop::new("A", minutes(600), minutes(600), true, Some(1)));
    t1.append_stop(ScheduleStop::new("B", minutes(625), minutes(625), true, Some(1)));
    let mut t2 = TrainSchedule::new("T2", "T2");
    t2.append_stop(ScheduleStop::new("B", minutes(600), minutes(600), true, Some(1)));
    t2.append_stop(ScheduleStop::new("A", minutes(625), minutes(625), true, Some(1)));
    let schedules = vec![t1, t2];

    let mut detector = ConflictDetector::new(DetectorConfig::default());
    let first = detector.detect_all(&schedules, &net);
    let second = detector.detect_all(&schedules, &net);

    let mut first_keys: Vec<_> = first.iter().map(|c| c.dedup_key()).collect();
    let mut second_keys: Vec<_> = second.iter().map(|c| c.dedup_key()).collect();
    first_keys.sort();
    second_keys.sort();
    assert_eq!(first_keys, second_keys);
}
