use thiserror::Error;

use crate::pathing_node::{ArcId, NodeId};

/// Construction and lookup failures. A search that simply finds no route is not an error, see
/// [SearchOutcome](crate::SearchOutcome).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathingError {
    /// A nearest, furthest or random node was requested from a graph without nodes.
    #[error("pathing graph has no nodes")]
    EmptyGraph,

    /// A traversal cost was requested between two nodes that share no arc.
    #[error("no arc links {from} to {to}")]
    DisconnectedQuery { from: NodeId, to: NodeId },

    /// An arc was asked for the neighbour of a node it does not touch, or was never linked.
    #[error("{arc} does not touch {node}")]
    InvalidArc { arc: ArcId, node: NodeId },

    /// A handle from a destroyed graph, or from another graph entirely.
    #[error("{0} does not belong to this graph")]
    StaleHandle(Handle),
}

/// The handle carried by [PathingError::StaleHandle].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Node(NodeId),
    Arc(ArcId),
}

impl core::fmt::Display for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Handle::Node(id) => write!(f, "{id}"),
            Handle::Arc(id) => write!(f, "{id}"),
        }
    }
}

pub type PathingResult<T> = Result<T, PathingError>;
