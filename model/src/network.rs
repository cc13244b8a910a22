use crate::base_types::{Distance, NodeId};
use crate::edge::Edge;
use crate::error::ModelError;
use crate::node::Node;
use crate::path::{Path, RankedPath};
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};
use std::cmp::Ordering;

/// Which quantity `shortest_path`/`k_shortest_paths` minimize (§4.1).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Weight {
    Distance,
    TravelTime,
}

#[derive(Clone, Debug, Default)]
pub struct NetworkStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub total_length: Distance,
    pub count_by_track_type: HashMap<&'static str, usize>,
    pub min_edge_length: Option<Distance>,
    pub max_edge_length: Option<Distance>,
    pub avg_edge_length: Option<Distance>,
}

/// The directed multigraph of stations and track sections (C2). Nodes
/// own their platform ledgers; edges are stored flat and indexed by
/// adjacency so parallel edges between the same endpoints are never
/// collapsed (§4.1).
#[derive(Clone, Debug, Default)]
pub struct RailwayNetwork {
    nodes: BTreeMap<NodeId, Node>,
    edges: Vec<Edge>,
    // adjacency[node] = indices into `edges` of edges departing `node`,
    // including the reverse direction of bidirectional edges ending at
    // `node` (materialized eagerly, per §4.1 edge case policy).
    adjacency: HashMap<NodeId, Vec<usize>>,
}

impl RailwayNetwork {
    pub fn new() -> RailwayNetwork {
        RailwayNetwork::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), ModelError> {
        if self.nodes.contains_key(node.id()) {
            return Err(ModelError::DuplicateId(node.id().clone()));
        }
        log::debug!("adding node {} ({})", node.id(), node.kind());
        self.adjacency.entry(node.id().clone()).or_default();
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    pub fn remove_node(&mut self, id: &NodeId) -> Result<(), ModelError> {
        if !self.nodes.contains_key(id) {
            return Err(ModelError::UnknownNode(id.clone()));
        }
        log::debug!("removing node {id} and its incident edges");
        self.nodes.remove(id);
        self.adjacency.remove(id);
        let keep: Vec<Edge> = self
            .edges
            .drain(..)
            .filter(|e| e.from() != id && e.to() != id)
            .collect();
        self.edges = keep;
        self.rebuild_adjacency();
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), ModelError> {
        if !self.nodes.contains_key(edge.from()) {
            return Err(ModelError::UnknownNode(edge.from().clone()));
        }
        if !self.nodes.contains_key(edge.to()) {
            return Err(ModelError::UnknownNode(edge.to().clone()));
        }
        log::debug!(
            "adding edge {}->{} ({}, {:.1}km)",
            edge.from(),
            edge.to(),
            edge.track_type(),
            edge.length().km()
        );
        let idx = self.edges.len();
        self.adjacency.entry(edge.from().clone()).or_default().push(idx);
        if edge.bidirectional() {
            self.adjacency.entry(edge.to().clone()).or_default().push(idx);
        }
        self.edges.push(edge);
        Ok(())
    }

    fn rebuild_adjacency(&mut self) {
        self.adjacency.clear();
        for id in self.nodes.keys() {
            self.adjacency.insert(id.clone(), Vec::new());
        }
        for (idx, edge) in self.edges.iter().enumerate() {
            self.adjacency.entry(edge.from().clone()).or_default().push(idx);
            if edge.bidirectional() {
                self.adjacency.entry(edge.to().clone()).or_default().push(idx);
            }
        }
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// True on the first matching edge between `from` and `to`, direct
    /// or via a bidirectional reverse traversal (§4.1: never
    /// deduplicates, but `has_edge` reports on the first match).
    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        self.get_edge(from, to).is_some()
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn get_all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn get_all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// First edge (in insertion order) permitting direct or
    /// bidirectional-reverse traversal from `from` to `to`.
    pub fn get_edge(&self, from: &NodeId, to: &NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.permits_direction(from, to))
    }

    pub fn get_edges_from_node(&self, id: &NodeId) -> Vec<&Edge> {
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.edges[idx])
            .collect()
    }

    /// Outgoing adjacency: node ids directly reachable from `id` in one
    /// traversal (§4.1).
    pub fn get_neighbors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.adjacency
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| other_end(&self.edges[idx], id))
            .filter(|n| seen.insert(n.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    /// Whether the underlying undirected graph (ignoring direction, but
    /// not ignoring which nodes edges actually connect) is a single
    /// connected component.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.nodes.keys().next() else {
            return true;
        };
        let mut visited = HashSet::new();
        let mut stack = vec![start.clone()];
        visited.insert(start.clone());
        while let Some(n) = stack.pop() {
            for edge in &self.edges {
                let other = if edge.from() == &n {
                    Some(edge.to().clone())
                } else if edge.to() == &n {
                    Some(edge.from().clone())
                } else {
                    None
                };
                if let Some(other) = other {
                    if visited.insert(other.clone()) {
                        stack.push(other);
                    }
                }
            }
        }
        visited.len() == self.nodes.len()
    }

    pub fn network_stats(&self) -> NetworkStats {
        let mut stats = NetworkStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            ..Default::default()
        };
        if self.edges.is_empty() {
            return stats;
        }
        let mut min = self.edges[0].length();
        let mut max = self.edges[0].length();
        for edge in &self.edges {
            stats.total_length = stats.total_length + edge.length();
            *stats.count_by_track_type.entry(edge.track_type().as_str()).or_insert(0) += 1;
            if edge.length().km() < min.km() {
                min = edge.length();
            }
            if edge.length().km() > max.km() {
                max = edge.length();
            }
        }
        stats.min_edge_length = Some(min);
        stats.max_edge_length = Some(max);
        stats.avg_edge_length = Some(Distance::from_km(
            stats.total_length.km() / self.edges.len() as f64,
        ));
        stats
    }

    fn edge_cost(&self, edge: &Edge, weight: Weight) -> f64 {
        match weight {
            Weight::Distance => edge.length().km(),
            Weight::TravelTime => edge.min_travel_time_hours(),
        }
    }

    /// Dijkstra over non-negative weights (§4.1).
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId, weight: Weight) -> Path {
        self.shortest_path_excluding(from, to, weight, &HashSet::new(), &HashSet::new())
    }

    fn shortest_path_excluding(
        &self,
        from: &NodeId,
        to: &NodeId,
        weight: Weight,
        excluded_edges: &HashSet<(NodeId, NodeId)>,
        excluded_nodes: &HashSet<NodeId>,
    ) -> Path {
        if !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return Path::empty();
        }
        if from == to {
            return Path::single_node(from.clone());
        }

        let mut dist: HashMap<NodeId, f64> = HashMap::new();
        let mut prev: HashMap<NodeId, (NodeId, usize)> = HashMap::new();
        let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::new();

        dist.insert(from.clone(), 0.0);
        heap.push(HeapEntry { cost: 0.0, node: from.clone() });

        while let Some(HeapEntry { cost, node }) = heap.pop() {
            if node == *to {
                break;
            }
            if cost > *dist.get(&node).unwrap_or(&f64::INFINITY) {
                continue;
            }
            if excluded_nodes.contains(&node) && node != *from {
                continue;
            }
            let Some(edge_indices) = self.adjacency.get(&node) else {
                continue;
            };
            for &idx in edge_indices {
                let edge = &self.edges[idx];
                let next = other_end(edge, &node);
                if excluded_nodes.contains(&next) {
                    continue;
                }
                if excluded_edges.contains(&(node.clone(), next.clone())) {
                    continue;
                }
                let next_cost = cost + self.edge_cost(edge, weight);
                if next_cost < *dist.get(&next).unwrap_or(&f64::INFINITY) {
                    dist.insert(next.clone(), next_cost);
                    prev.insert(next.clone(), (node.clone(), idx));
                    heap.push(HeapEntry { cost: next_cost, node: next });
                }
            }
        }

        if !dist.contains_key(to) {
            return Path::empty();
        }

        let mut nodes = vec![to.clone()];
        let mut edges = Vec::new();
        let mut cur = to.clone();
        while let Some((p, idx)) = prev.get(&cur) {
            edges.push((self.edges[*idx].from().clone(), self.edges[*idx].to().clone()));
            nodes.push(p.clone());
            cur = p.clone();
        }
        nodes.reverse();
        edges.reverse();

        let total_distance = Distance::from_km(
            edges.iter().map(|(f, t)| self.edge_cost(self.get_edge(f, t).unwrap(), Weight::Distance)).sum(),
        );
        let min_travel_time_hours = edges
            .iter()
            .map(|(f, t)| self.edge_cost(self.get_edge(f, t).unwrap(), Weight::TravelTime))
            .sum();

        Path {
            nodes,
            edges,
            total_distance,
            min_travel_time_hours,
        }
    }

    /// Yen's algorithm (§4.1, §9): up to `k` loopless simple paths in
    /// non-decreasing cost order, deduplicated by node sequence.
    pub fn k_shortest_paths(
        &self,
        from: &NodeId,
        to: &NodeId,
        k: usize,
        weight: Weight,
    ) -> Result<Vec<RankedPath>, ModelError> {
        if !(1..=10).contains(&k) {
            return Err(ModelError::InvalidArgument(format!(
                "k must be in [1, 10], got {k}"
            )));
        }

        let shortest = self.shortest_path(from, to, weight);
        if !shortest.is_valid() {
            return Ok(Vec::new());
        }

        let mut found: Vec<Path> = vec![shortest];
        let mut candidates: Vec<Path> = Vec::new();
        let mut seen_sequences: HashSet<Vec<NodeId>> = HashSet::new();
        seen_sequences.insert(found[0].nodes.clone());

        while found.len() < k {
            let prev_path = found.last().unwrap().clone();
            for i in 0..prev_path.nodes.len().saturating_sub(1) {
                let spur_node = &prev_path.nodes[i];
                let root_nodes: Vec<NodeId> = prev_path.nodes[..=i].to_vec();

                let mut excluded_edges = HashSet::new();
                for path in &found {
                    if path.nodes.len() > i && path.nodes[..=i] == root_nodes[..] {
                        if let Some(next) = path.nodes.get(i + 1) {
                            excluded_edges.insert((spur_node.clone(), next.clone()));
                        }
                    }
                }
                let excluded_nodes: HashSet<NodeId> =
                    root_nodes[..i].iter().cloned().collect();

                let spur_path =
                    self.shortest_path_excluding(spur_node, to, weight, &excluded_edges, &excluded_nodes);
                if !spur_path.is_valid() {
                    continue;
                }

                let mut total_nodes = root_nodes[..i].to_vec();
                total_nodes.extend(spur_path.nodes.iter().cloned());
                if seen_sequences.contains(&total_nodes) {
                    continue;
                }

                let mut total_edges: Vec<(NodeId, NodeId)> = prev_path.edges[..i].to_vec();
                total_edges.extend(spur_path.edges.iter().cloned());
                let total_distance = Distance::from_km(
                    total_edges
                        .iter()
                        .map(|(f, t)| self.edge_cost(self.get_edge(f, t).unwrap(), Weight::Distance))
                        .sum(),
                );
                let min_travel_time_hours = total_edges
                    .iter()
                    .map(|(f, t)| self.edge_cost(self.get_edge(f, t).unwrap(), Weight::TravelTime))
                    .sum();

                candidates.push(Path {
                    nodes: total_nodes,
                    edges: total_edges,
                    total_distance,
                    min_travel_time_hours,
                });
            }

            candidates.sort_by(|a, b| {
                cost_of(a, weight).partial_cmp(&cost_of(b, weight)).unwrap_or(Ordering::Equal)
            });
            let Some(pos) = candidates.iter().position(|p| !seen_sequences.contains(&p.nodes)) else {
                break;
            };
            let next_best = candidates.remove(pos);
            seen_sequences.insert(next_best.nodes.clone());
            found.push(next_best);
        }

        let base_cost = cost_of(&found[0], weight);
        Ok(found
            .into_iter()
            .map(|path| {
                let delta = cost_of(&path, weight) - base_cost;
                RankedPath {
                    path,
                    delta_from_shortest: delta,
                }
            })
            .collect())
    }
}

fn cost_of(path: &Path, weight: Weight) -> f64 {
    match weight {
        Weight::Distance => path.total_distance.km(),
        Weight::TravelTime => path.min_travel_time_hours,
    }
}

fn other_end(edge: &Edge, from: &NodeId) -> NodeId {
    if edge.from() == from {
        edge.to().clone()
    } else {
        edge.from().clone()
    }
}

#[derive(Debug)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for a min-heap over a max-heap BinaryHeap; ties break
        // on ascending node id (§9 Determinism).
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}
