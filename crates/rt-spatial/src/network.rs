//! The per-request road graph and its builder.
//!
//! # Layout
//!
//! Edges are stored grouped by their tail node (compressed sparse rows), so
//! the edges leaving node `n` are exactly the `EdgeId`s in
//!
//! ```text
//! node_out_start[n] .. node_out_start[n + 1]
//! ```
//!
//! and `edge_from`, `edge_to`, `edge_length_m` and `edge_weight_min` are all
//! indexed by that `EdgeId`.  A two-way street is two directed edges;
//! parallel edges between one pair of nodes stay distinct.
//!
//! # Lengths and weights
//!
//! Lengths come from the map source and never change.  Weights are minutes,
//! `NaN` until [`assign_weights`](crate::assign_weights) runs, and always
//! belong to the single mode recorded in [`RoadNetwork::weighted_for`].
//!
//! # Snapping
//!
//! Node positions are bulk-loaded into an `rstar` R-tree keyed on
//! `[lat, lon]` for nearest-node lookups.

use std::ops::Range;

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use rt_core::{EdgeId, GeoPoint, NodeId, TransitMode};

/// Length assumed for an edge whose source data carried none.
pub const DEFAULT_EDGE_LENGTH_M: f32 = 1.0;

// ── Snapping index ────────────────────────────────────────────────────────────

#[derive(Clone)]
struct SnapPoint {
    lat_lon: [f32; 2],
    node:    NodeId,
}

impl RTreeObject for SnapPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.lat_lon)
    }
}

impl PointDistance for SnapPoint {
    /// Squared planar distance in degrees.  Over a few kilometres this ranks
    /// candidates the same way a great-circle distance would.
    fn distance_2(&self, query: &[f32; 2]) -> f32 {
        let [lat, lon] = self.lat_lon;
        (lat - query[0]).powi(2) + (lon - query[1]).powi(2)
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed, length-annotated road graph covering one request's region.
///
/// Fields are `pub` for indexed access from the router and weighting code.
/// Build one with [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Position of every node, by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Identifier of each node in the map data it was loaded from (OSM node
    /// id, CSV id, …), by `NodeId`.  Diagnostic only.
    pub node_source_id: Vec<i64>,

    /// Row offsets: `node_count + 1` entries, the last equal to
    /// `edge_count`.
    pub node_out_start: Vec<u32>,

    /// Tail node of each edge (needed to walk a route back from its end).
    pub edge_from: Vec<NodeId>,

    /// Head node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Physical length of each edge in metres; `None` when the source data
    /// had no length for it.
    pub edge_length_m: Vec<Option<f32>>,

    /// Traversal time in minutes; the cost Dijkstra minimises.
    pub edge_weight_min: Vec<f64>,

    /// The mode the current weights were computed for.
    pub weighted_for: Option<TransitMode>,

    snap_index: RTree<SnapPoint>,
}

impl RoadNetwork {
    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// `true` when the region held no roads of the requested type.
    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` indexes a node of this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    /// Position of `node`, or `None` if it is not part of this network.
    #[inline]
    pub fn position(&self, node: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(node.index()).copied()
    }

    #[inline]
    fn out_range(&self, node: NodeId) -> Range<usize> {
        let n = node.index();
        self.node_out_start[n] as usize..self.node_out_start[n + 1] as usize
    }

    /// Edges leaving `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_range(node).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_range(node).len()
    }

    /// Length used for weighting and route totals: the recorded length, or
    /// [`DEFAULT_EDGE_LENGTH_M`] when absent.
    #[inline]
    pub fn effective_length_m(&self, edge: EdgeId) -> f32 {
        self.edge_length_m[edge.index()].unwrap_or(DEFAULT_EDGE_LENGTH_M)
    }

    /// Node closest to `pos`; `None` only for an empty network.
    ///
    /// Equidistant candidates resolve to the lowest `NodeId`.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        let mut candidates = self
            .snap_index
            .nearest_neighbor_iter_with_distance_2(&[pos.lat, pos.lon]);
        let (first, best_d2) = candidates.next()?;
        let tied = candidates
            .take_while(|&(_, d2)| d2 <= best_d2)
            .map(|(p, _)| p.node)
            .min();
        Some(tied.map_or(first.node, |t| t.min(first.node)))
    }

    /// The `k` nodes closest to `pos`, nearest first.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.snap_index
            .nearest_neighbor_iter(&[pos.lat, pos.lon])
            .take(k)
            .map(|p| p.node)
            .collect()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Mutable staging area for a [`RoadNetwork`].
///
/// Map sources fill a builder and hand it to the loader, which runs the
/// topology passes in [`crate::simplify`] before calling
/// [`build`](Self::build).  Nodes and edges may be added in any order.
///
/// # Example
///
/// ```
/// use rt_core::GeoPoint;
/// use rt_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let home = b.add_node(GeoPoint::new(4.607, -74.074));
/// let campus = b.add_node(GeoPoint::new(4.596, -74.069));
/// b.add_road(home, campus, Some(1_400.0));
///
/// let net = b.build();
/// assert_eq!((net.node_count(), net.edge_count()), (2, 2));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RoadNetworkBuilder {
    pub(crate) nodes:      Vec<GeoPoint>,
    pub(crate) source_ids: Vec<i64>,
    pub(crate) raw_edges:  Vec<RawEdge>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RawEdge {
    pub(crate) from:     NodeId,
    pub(crate) to:       NodeId,
    pub(crate) length_m: Option<f32>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            source_ids: Vec::with_capacity(nodes),
            raw_edges:  Vec::with_capacity(edges),
        }
    }

    /// Add a node whose source id is its own `NodeId`.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let source_id = self.nodes.len() as i64;
        self.add_source_node(source_id, pos)
    }

    /// Add a node that carries its identifier from the map data.  Ids are
    /// handed out sequentially from 0.
    pub fn add_source_node(&mut self, source_id: i64, pos: GeoPoint) -> NodeId {
        let node = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.source_ids.push(source_id);
        node
    }

    /// Add a one-way edge.  Both nodes must already exist.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: Option<f32>) {
        debug_assert!(from.index() < self.nodes.len() && to.index() < self.nodes.len());
        self.raw_edges.push(RawEdge { from, to, length_m });
    }

    /// Add a two-way street as a pair of opposite edges of equal length.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: Option<f32>) {
        self.add_directed_edge(a, b, length_m);
        self.add_directed_edge(b, a, length_m);
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, node: NodeId) -> GeoPoint {
        self.nodes[node.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Keep only the nodes with `keep[n] == true` and the edges between
    /// them.  Surviving nodes are renumbered densely in their original order.
    pub(crate) fn retain_nodes(self, keep: &[bool]) -> RoadNetworkBuilder {
        debug_assert_eq!(keep.len(), self.nodes.len());

        let mut remap = vec![NodeId::INVALID; self.nodes.len()];
        let kept = keep.iter().filter(|k| **k).count();
        let mut out = RoadNetworkBuilder::with_capacity(kept, self.raw_edges.len());

        for (i, (&pos, &src)) in self.nodes.iter().zip(&self.source_ids).enumerate() {
            if keep[i] {
                remap[i] = out.add_source_node(src, pos);
            }
        }
        for e in &self.raw_edges {
            let (from, to) = (remap[e.from.index()], remap[e.to.index()]);
            if from != NodeId::INVALID && to != NodeId::INVALID {
                out.add_directed_edge(from, to, e.length_m);
            }
        }
        out
    }

    /// Freeze into an unweighted [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let RoadNetworkBuilder { nodes, source_ids, mut raw_edges } = self;

        // Stable: parallel edges keep their insertion order.
        raw_edges.sort_by_key(|e| e.from);

        let mut node_out_start = Vec::with_capacity(nodes.len() + 1);
        let mut cursor = 0usize;
        for n in 0..nodes.len() {
            node_out_start.push(cursor as u32);
            while cursor < raw_edges.len() && raw_edges[cursor].from.index() == n {
                cursor += 1;
            }
        }
        node_out_start.push(cursor as u32);
        debug_assert_eq!(cursor, raw_edges.len());

        let snap_points = nodes
            .iter()
            .enumerate()
            .map(|(i, p)| SnapPoint { lat_lon: [p.lat, p.lon], node: NodeId(i as u32) })
            .collect();

        RoadNetwork {
            node_source_id:  source_ids,
            node_out_start,
            edge_from:       raw_edges.iter().map(|e| e.from).collect(),
            edge_to:         raw_edges.iter().map(|e| e.to).collect(),
            edge_length_m:   raw_edges.iter().map(|e| e.length_m).collect(),
            edge_weight_min: vec![f64::NAN; raw_edges.len()],
            weighted_for:    None,
            snap_index:      RTree::bulk_load(snap_points),
            node_pos:        nodes,
        }
    }
}
