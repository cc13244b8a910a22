use crate::schedule::TrainSchedule;
use crate::stop::ScheduleStop;
use model::base_types::{NodeType, TrackType};
use model::edge::Edge;
use model::network::RailwayNetwork;
use model::node::Node;
use model::Distance;
use time::{Instant, Span};

fn minutes(m: i64) -> Instant {
    Instant::from_seconds_since_epoch(m * 60)
}

fn small_network() -> RailwayNetwork {
    let mut net = RailwayNetwork::new();
    net.add_node(Node::new("MIL", "Milano", NodeType::Station, 0.0, 0.0, 1, 12))
        .unwrap();
    net.add_node(Node::new("MON", "Monza", NodeType::Station, 0.0, 0.0, 1, 4))
        .unwrap();
    net.add_edge(Edge::new(
        "MIL",
        "MON",
        Distance::from_km(15.0),
        TrackType::Double,
        140.0,
        1,
        true,
    ))
    .unwrap();
    net
}

#[test]
fn chronological_schedule_is_valid() {
    let net = small_network();
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MIL", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("MON", minutes(8), minutes(10), true, Some(2)));
    assert!(sched.is_valid(&net));
}

#[test]
fn out_of_order_arrivals_fail_chronological_check() {
    let net = small_network();
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MIL", minutes(10), minutes(10), true, Some(1)));
    sched.append_stop(ScheduleStop::new("MON", minutes(5), minutes(5), true, Some(2)));
    assert!(!sched.is_chronological());
    assert!(!sched.is_valid(&net));
}

#[test]
fn disconnected_nodes_fail_topological_check() {
    let net = small_network();
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MIL", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("NOWHERE", minutes(8), minutes(10), true, None));
    assert!(!sched.is_topological(&net));
}

#[test]
fn platform_out_of_range_fails_platform_check() {
    let net = small_network();
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MON", minutes(0), minutes(0), true, Some(99)));
    assert!(!sched.is_platform_valid(&net));
}

#[test]
fn shift_from_moves_all_downstream_stops() {
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MIL", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("MON", minutes(8), minutes(10), true, Some(2)));
    sched.append_stop(ScheduleStop::new("MIL", minutes(20), minutes(20), true, Some(1)));

    let applied = sched.shift_from(1, Span::from_minutes(5.0)).unwrap();
    assert_eq!(applied, Span::from_minutes(5.0));
    assert_eq!(sched.stops()[0].arrival(), minutes(0));
    assert_eq!(sched.stops()[1].arrival(), minutes(13));
    assert_eq!(sched.stops()[2].arrival(), minutes(25));
}

#[test]
fn total_distance_sums_consecutive_graph_distances() {
    let net = small_network();
    let mut sched = TrainSchedule::new("S1", "T1");
    sched.append_stop(ScheduleStop::new("MIL", minutes(0), minutes(0), true, Some(1)));
    sched.append_stop(ScheduleStop::new("MON", minutes(8), minutes(10), true, Some(2)));
    assert_eq!(sched.total_distance(&net).km(), 15.0);
}
