use crate::config::RealTimeConfig;
use crate::optimizer::RealTimeOptimizer;
use crate::position::TrainPosition;
use model::base_types::{NodeType, TrackType};
use model::edge::Edge;
use model::network::RailwayNetwork;
use model::node::Node;
use model::Distance;
use time::Instant;

fn station(id: &str, platforms: u32) -> Node {
    Node::new(id, id, NodeType::Station, 0.0, 0.0, 1, platforms)
}

fn network() -> RailwayNetwork {
    let mut net = RailwayNetwork::new();
    net.add_node(station("A", 2)).unwrap();
    net.add_node(station("B", 2)).unwrap();
    net.add_edge(Edge::new("A", "B", Distance::from_km(20.0), TrackType::Double, 100.0, 1, true))
        .unwrap();
    net
}

/// S5 — real-time conflict prediction: two trains approaching the same
/// next node with close progress and known positive speeds.
#[test]
fn predicts_conflict_for_converging_trains() {
    let net = network();
    let mut optimizer = RealTimeOptimizer::new(RealTimeConfig::balanced());
    let now = Instant::from_seconds_since_epoch(0);

    optimizer.update_position(TrainPosition {
        train_id: "T1".into(),
        current_node: "A".into(),
        next_node: Some("B".into()),
        progress: 0.70,
        speed_kmh: 100.0,
        timestamp: now,
        coordinates: None,
    });
    optimizer.update_position(TrainPosition {
        train_id: "T2".into(),
        current_node: "A".into(),
        next_node: Some("B".into()),
        progress: 0.75,
        speed_kmh: 100.0,
        timestamp: now,
        coordinates: None,
    });

    let predictions = optimizer.predict_conflicts(&net);
    assert!(!predictions.is_empty());
    assert!(predictions.iter().any(|p| p.confidence >= 0.7));
}

#[test]
fn invalid_position_report_is_skipped_not_panicking() {
    let mut optimizer = RealTimeOptimizer::new(RealTimeConfig::balanced());
    optimizer.update_position(TrainPosition {
        train_id: "T1".into(),
        current_node: "A".into(),
        next_node: Some("B".into()),
        progress: 1.5,
        speed_kmh: 100.0,
        timestamp: Instant::from_seconds_since_epoch(0),
        coordinates: None,
    });
    assert!(optimizer.positions().is_empty());
    assert_eq!(optimizer.stats().position_updates, 0);
}

#[test]
fn config_presets_match_contract_constants() {
    let conservative = RealTimeConfig::conservative();
    assert_eq!(conservative.horizon_seconds, 15 * 60);
    assert_eq!(conservative.confidence_threshold, 0.8);

    let aggressive = RealTimeConfig::aggressive();
    assert_eq!(aggressive.horizon_seconds, 45 * 60);
    assert!(aggressive.enable_stop_skip);

    let default_config = RealTimeConfig::default();
    assert_eq!(default_config.horizon_seconds, RealTimeConfig::balanced().horizon_seconds);
}
