use model::base_types::{NodeType, TrackType};
use model::edge::Edge;
use model::network::RailwayNetwork;
use model::node::Node;
use model::Distance;
use railway_core::{CoreConfig, Planner};
use solution::{ScheduleStop, TrainSchedule};
use std::collections::HashMap;
use std::time as stdtime;
use time::Instant;

fn minutes(m: i64) -> Instant {
    Instant::from_seconds_since_epoch(m * 60)
}

/// A small Milan-Monza-Como corridor: double track to Monza, single
/// track onward, matching SPEC_FULL.md §8's S1/S2 scenarios.
fn build_network() -> RailwayNetwork {
    let mut network = RailwayNetwork::new();
    network
        .add_node(Node::new("MIL", "Milano Centrale", NodeType::Station, 45.486, 9.204, 1, 12))
        .unwrap();
    network
        .add_node(Node::new("MON", "Monza", NodeType::Station, 45.584, 9.274, 1, 4))
        .unwrap();
    network
        .add_node(Node::new("COM", "Como", NodeType::Station, 45.808, 9.085, 1, 3))
        .unwrap();
    network
        .add_edge(Edge::new("MIL", "MON", Distance::from_km(15.0), TrackType::Double, 140.0, 1, true))
        .unwrap();
    network
        .add_edge(Edge::new("MON", "COM", Distance::from_km(30.0), TrackType::Single, 120.0, 1, true))
        .unwrap();
    network
}

fn build_schedules() -> Vec<TrainSchedule> {
    let mut ic101 = TrainSchedule::new("S-IC101", "IC101");
    ic101.append_stop(ScheduleStop::new("MIL", minutes(8 * 60), minutes(8 * 60), true, Some(1)));
    ic101.append_stop(ScheduleStop::new("MON", minutes(8 * 60 + 8), minutes(8 * 60 + 10), true, Some(1)));
    ic101.append_stop(ScheduleStop::new("COM", minutes(8 * 60 + 25), minutes(8 * 60 + 25), true, Some(1)));

    let mut r205 = TrainSchedule::new("S-R205", "R205");
    r205.append_stop(ScheduleStop::new("COM", minutes(8 * 60 + 20), minutes(8 * 60 + 20), true, Some(1)));
    r205.append_stop(ScheduleStop::new("MON", minutes(8 * 60 + 35), minutes(8 * 60 + 37), true, Some(2)));
    r205.append_stop(ScheduleStop::new("MIL", minutes(8 * 60 + 47), minutes(8 * 60 + 47), true, Some(3)));

    vec![ic101, r205]
}

fn main() {
    env_logger::init();
    let start_time = stdtime::Instant::now();

    let network = build_network();
    let mut schedules = build_schedules();
    let trains = HashMap::new();

    let net_stats = network.network_stats();
    println!(
        "Network with {} nodes and {} edges loaded (elapsed time: {:0.2}sec)",
        net_stats.node_count,
        net_stats.edge_count,
        start_time.elapsed().as_secs_f32()
    );

    let mut planner = Planner::new(CoreConfig::default());
    let (conflicts, results) = planner.plan(&mut schedules, &network, &trains);

    println!("\nConflicts detected: {}", conflicts.len());
    for conflict in &conflicts {
        println!("  - {} (severity {:.1}): {}", conflict.kind.label(), conflict.severity, conflict.description);
    }

    println!("\nResolutions applied:");
    for result in &results {
        println!(
            "  - {} via {}: success={} (quality {:.2}) {}",
            result.modified_trains.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(","),
            result.strategy.label(),
            result.success,
            result.quality_score,
            result.description,
        );
    }

    let remaining = planner.detect(&schedules, &network);
    println!("\nConflicts remaining after one pass: {}", remaining.len());

    let runtime_duration = stdtime::Instant::now().duration_since(start_time);
    println!("\nRunning time: {:0.2}sec", runtime_duration.as_secs_f32());
}
