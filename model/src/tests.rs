use crate::base_types::{Distance, NodeType, TrackType};
use crate::edge::Edge;
use crate::network::{RailwayNetwork, Weight};
use crate::node::Node;
use time::Instant;

fn station(id: &str, platforms: u32) -> Node {
    Node::new(id, id, NodeType::Station, 0.0, 0.0, 1, platforms)
}

#[test]
fn add_edge_fails_on_unknown_endpoint() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    let err = net.add_edge(Edge::new(
        "A",
        "B",
        Distance::from_km(10.0),
        TrackType::Double,
        100.0,
        1,
        true,
    ));
    assert!(err.is_err());
}

#[test]
fn remove_node_severs_incident_edges() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.remove_node(&"A".into()).unwrap();
    assert!(!net.has_edge(&"A".into(), &"B".into()));
    assert_eq!(net.get_all_edges().count(), 0);
}

#[test]
fn shortest_path_unreachable_is_empty_not_error() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    let path = net.shortest_path(&"A".into(), &"B".into(), Weight::Distance);
    assert!(!path.is_valid());
}

#[test]
fn shortest_path_self_loop_is_zero_cost_single_node() {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    let path = net.shortest_path(&"A".into(), &"A".into(), Weight::Distance);
    assert_eq!(path.nodes, vec!["A".into()]);
    assert_eq!(path.total_distance.km(), 0.0);
}

/// S3 — k-shortest uniqueness.
#[test]
fn k_shortest_paths_finds_both_edge_disjoint_routes() {
    let mut net = RailwayNetwork::new();
    for id in ["A", "B", "C", "D"] {
        net.add_node(station(id, 2)).unwrap();
    }
    net.add_edge(Edge::new("A", "B", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("B", "C", Distance::from_km(10.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("A", "D", Distance::from_km(30.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net.add_edge(Edge::new("D", "C", Distance::from_km(30.0), TrackType::Double, 100.0, 1, true))
        .unwrap();

    let ranked = net
        .k_shortest_paths(&"A".into(), &"C".into(), 3, Weight::Distance)
        .unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].delta_from_shortest, 0.0);
    assert!(ranked[1].delta_from_shortest > 0.0);
    assert!(ranked[0].path.total_distance.km() <= ranked[1].path.total_distance.km());
}

#[test]
fn k_shortest_paths_rejects_out_of_range_k() {
    let net = RailwayNetwork::new();
    assert!(net
        .k_shortest_paths(&"A".into(), &"B".into(), 0, Weight::Distance)
        .is_err());
    assert!(net
        .k_shortest_paths(&"A".into(), &"B".into(), 11, Weight::Distance)
        .is_err());
}

#[test]
fn platform_ledger_rejects_overlap_and_allows_adjacent() {
    let mut node = station("MIL", 2);
    let t0 = Instant::from_seconds_since_epoch(0);
    let t1 = Instant::from_seconds_since_epoch(600);
    let t2 = Instant::from_seconds_since_epoch(1200);

    node.reserve_platform(1, "IC1".into(), t0, t1).unwrap();
    assert!(node.reserve_platform(1, "IC2".into(), t0, t1).is_err());
    // closed-open: [t1, t2) does not overlap [t0, t1)
    node.reserve_platform(1, "IC2".into(), t1, t2).unwrap();
}

#[test]
fn first_free_platform_is_lowest_numbered() {
    let mut node = station("MON", 3);
    let t0 = Instant::from_seconds_since_epoch(0);
    let t1 = Instant::from_seconds_since_epoch(600);
    node.reserve_platform(1, "IC1".into(), t0, t1).unwrap();
    assert_eq!(node.first_free_platform(t0, t1), Some(2));
}

#[test]
fn platform_zero_is_invalid_argument() {
    let node = station("MON", 3);
    let t0 = Instant::from_seconds_since_epoch(0);
    let t1 = Instant::from_seconds_since_epoch(600);
    assert!(node.is_platform_free(0, t0, t1).is_err());
}
