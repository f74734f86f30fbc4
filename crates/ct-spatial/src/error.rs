//! Spatial-subsystem error type.

use thiserror::Error;

use ct_core::NodeId;

/// Errors produced by `ct-spatial`.
///
/// `NoRoute` is a per-pair condition: batched queries turn it into an empty
/// [`RawRoute`](crate::RawRoute) instead of failing the whole batch.  Every
/// other variant is a provider-level failure.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no edge from {from} to {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("road network for the requested area has no nodes")]
    EmptyNetwork,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
