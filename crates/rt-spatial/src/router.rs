//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The route planner calls routing via the [`Router`] trait, so applications
//! can swap in A* or contraction hierarchies without touching the pipeline.
//!
//! # Cost units
//!
//! Costs are the edge weights written by [`crate::assign_weights`]: minutes
//! as `f64`.  A route query against a network that has not been weighted
//! fails with [`SpatialError::Unweighted`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::warn;

use rt_core::{EdgeId, GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes visited in order, origin first and destination last.  Never
    /// empty.
    pub nodes: Vec<NodeId>,
    /// Edges traversed in order; one fewer than `nodes`.
    pub edges: Vec<EdgeId>,
    /// Sum of the traversed edge weights in minutes.
    pub total_minutes: f64,
}

impl Route {
    /// `true` if the origin and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn origin(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Physical length of the route in metres (missing edge lengths count
    /// as the default length).
    pub fn length_m(&self, network: &RoadNetwork) -> f64 {
        self.edges
            .iter()
            .map(|&e| f64::from(network.effective_length_m(e)))
            .sum()
    }

    /// Node positions along the route, for renderers.
    pub fn coordinates(&self, network: &RoadNetwork) -> Vec<GeoPoint> {
        self.nodes.iter().map(|n| network.node_pos[n.index()]).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so an outer driver may share one
/// router across requests running on different threads.
pub trait Router: Send + Sync {
    /// Compute a minimum-weight route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route rather than an error.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NoRoute`] if `to` is unreachable (a normal outcome).
    /// - [`SpatialError::NodeNotFound`] for ids outside the network.
    /// - [`SpatialError::Unweighted`] if weights were never assigned.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph with a binary-heap
/// priority queue keyed by tentative minutes.
///
/// Edge weights are sanitised on the fly: a negative weight is clamped to 0
/// and a non-finite weight makes the edge impassable.  With well-formed
/// lengths neither occurs.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        if network.weighted_for.is_none() {
            return Err(SpatialError::Unweighted);
        }
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Heap entry.  Ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// cost first; equal costs pop the lowest `NodeId` first.
#[derive(Copy, Clone, Debug)]
struct State {
    cost: f64,
    node: NodeId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Edge cost usable by Dijkstra, or `None` for an impassable edge.
#[inline]
fn edge_cost(network: &RoadNetwork, edge: EdgeId) -> Option<f64> {
    let w = network.edge_weight_min[edge.index()];
    if !w.is_finite() {
        return None;
    }
    if w < 0.0 {
        warn!("negative weight {w} on {edge}, clamping to 0");
        return Some(0.0);
    }
    Some(w)
}

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    if from == to {
        return Ok(Route { nodes: vec![from], edges: vec![], total_minutes: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known cost (minutes) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: from });

    while let Some(State { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let Some(w) = edge_cost(network, edge) else {
                continue;
            };
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + w;

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(State { cost: new_cost, node: neighbor });
            }
        }
    }

    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    total_minutes: f64,
) -> Route {
    let mut edges = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert_ne!(e, EdgeId::INVALID);
        edges.push(e);
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    edges.reverse();
    nodes.reverse();
    Route { nodes, edges, total_minutes }
}
