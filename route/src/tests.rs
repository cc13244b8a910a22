use crate::optimizer::{RouteOptimizer, RouteOptimizerConfig};
use model::base_types::{NodeType, TrackType};
use model::edge::Edge;
use model::network::RailwayNetwork;
use model::node::Node;
use model::Distance;
use solution::{ScheduleStop, TrainSchedule};
use std::collections::HashSet;
use time::Instant;

fn minutes(m: i64) -> Instant {
    Instant::from_seconds_since_epoch(m * 60)
}

fn station(id: &str, platforms: u32) -> Node {
    Node::new(id, id, NodeType::Station, 0.0, 0.0, 1, platforms)
}

/// S6 — reroute application: A -> ... -> E via a direct path, with an
/// alternative route avoiding a conflicted interior edge.
fn linear_network_with_detour() -> RailwayNetwork {
    let mut net = RailwayNetwork::new();
    for id in ["A", "B", "C", "D", "E"] {
        net.add_node(station(id, 2)).unwrap();
    }
    net.add_edge(Edge::new("A", "B", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("B", "E", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    // Detour avoiding B: A -> C -> D -> E, a bit longer.
    net.add_edge(Edge::new("A", "C", Distance::from_km(8.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("C", "D", Distance::from_km(8.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("D", "E", Distance::from_km(8.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net
}

#[test]
fn find_best_reroute_avoids_excluded_section_and_scores_positive() {
    let net = linear_network_with_detour();
    let optimizer = RouteOptimizer::new(RouteOptimizerConfig::default());

    let mut excluded = HashSet::new();
    excluded.insert(("B".into(), "E".into()));

    let best = optimizer
        .find_best_reroute(&net, &"A".into(), &"E".into(), &excluded, &[])
        .expect("a detour avoiding B->E should exist");

    assert!(!best.path.edges.contains(&("B".into(), "E".into())));
    assert!(best.combined_score > 0.0);
}

#[test]
fn apply_reroute_preserves_first_and_last_stop_times() {
    let net = linear_network_with_detour();
    let optimizer = RouteOptimizer::new(RouteOptimizerConfig::default());

    let mut schedule = TrainSchedule::new("S1", "T1");
    schedule.append_stop(ScheduleStop::new("A", minutes(0), minutes(0), true, Some(1)));
    schedule.append_stop(ScheduleStop::new("E", minutes(20), minutes(20), true, Some(1)));

    let mut excluded = HashSet::new();
    excluded.insert(("B".into(), "E".into()));
    let best = optimizer
        .find_best_reroute(&net, &"A".into(), &"E".into(), &excluded, &[])
        .unwrap();

    let rerouted = optimizer.apply_reroute(&schedule, &best.path, &net);
    assert_eq!(rerouted.stops().first().unwrap().arrival(), minutes(0));
    assert_eq!(rerouted.stops().first().unwrap().node_id(), &"A".into());
    assert_eq!(rerouted.stops().last().unwrap().node_id(), &"E".into());
    assert!(rerouted.stops().last().unwrap().arrival() >= minutes(20));
    let node_sequence: Vec<_> = rerouted.stops().iter().map(|s| s.node_id().clone()).collect();
    assert_eq!(node_sequence, best.path.nodes);
}

#[test]
fn evaluate_alternatives_filters_out_base_path() {
    let net = linear_network_with_detour();
    let optimizer = RouteOptimizer::new(RouteOptimizerConfig::default());
    let scored = optimizer.evaluate_alternatives(&net, &"A".into(), &"E".into(), &HashSet::new(), &[]);
    assert!(scored.iter().all(|s| s.path.nodes != vec!["A".into(), "B".into(), "E".into()]));
}
