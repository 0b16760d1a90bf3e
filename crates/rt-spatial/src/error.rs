//! Spatial-subsystem error type.

use thiserror::Error;

use rt_core::NodeId;

/// Errors produced by `rt-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The map source could not supply data for the requested region.
    #[error("map data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// The network has no nodes, so no coordinate can be snapped.
    #[error("road network is empty")]
    EmptyNetwork,

    /// The destination is unreachable from the origin.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("{0} not found in network")]
    NodeNotFound(NodeId),

    #[error("edge weights have not been assigned")]
    Unweighted,

    #[error("buffer radius must be a positive number of kilometres, got {0}")]
    InvalidBuffer(f64),

    #[error("average speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),
}

impl SpatialError {
    pub(crate) fn unavailable(source_name: &str, reason: impl ToString) -> Self {
        SpatialError::DataUnavailable {
            source_name: source_name.to_owned(),
            reason:      reason.to_string(),
        }
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
