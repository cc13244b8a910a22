use crate::base_types::{Distance, NodeId};

/// A simple path through the graph (§4.1). `edges[i]` connects
/// `nodes[i]` to `nodes[i + 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub total_distance: Distance,
    pub min_travel_time_hours: f64,
}

impl Path {
    pub fn empty() -> Path {
        Path::default()
    }

    pub fn is_valid(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn single_node(node: NodeId) -> Path {
        Path {
            nodes: vec![node],
            edges: Vec::new(),
            total_distance: Distance::ZERO,
            min_travel_time_hours: 0.0,
        }
    }
}

/// A `Path` together with its delta from the shortest path in the same
/// `k_shortest_paths` call (§4.1).
#[derive(Clone, Debug)]
pub struct RankedPath {
    pub path: Path,
    pub delta_from_shortest: f64,
}
