//! Snapping raw coordinates to graph nodes.

use rt_core::{GeoPoint, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Return the node of `network` nearest to `pos`.
///
/// Distance is planar in lat/lon space (see the R-tree in
/// [`crate::network`]); equidistant nodes resolve to the lowest `NodeId`, so
/// the answer is deterministic for a given network.
///
/// # Errors
///
/// [`SpatialError::EmptyNetwork`] if the network has no nodes.
pub fn nearest_node(network: &RoadNetwork, pos: GeoPoint) -> SpatialResult<NodeId> {
    network.snap_to_node(pos).ok_or(SpatialError::EmptyNetwork)
}
