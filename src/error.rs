use crate::handle::NodeId;
use crate::node::Side;

/// Outcomes of tree operations that didn't go as asked.
///
/// [`NotFound`][Error::NotFound] and [`DuplicateKey`][Error::DuplicateKey] are ordinary results
/// a caller is expected to handle. [`InvalidRotation`][Error::InvalidRotation] and
/// [`StaleHandle`][Error::StaleHandle] mean the caller's view of the tree shape is wrong. The
/// panicking rotations abort with these, the `try_` rotations hand them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The key isn't in the tree.
    #[error("key not found")]
    NotFound,
    /// The key is already in the tree, held by the given node.
    #[error("key already present at node {0}")]
    DuplicateKey(NodeId),
    /// The rotation needs a child on this side and the node has none.
    #[error("invalid rotation: node has no {0} child")]
    InvalidRotation(Side),
    /// The handle refers to a node that has since been deleted.
    #[error("stale node handle {0}")]
    StaleHandle(NodeId),
}

/// Result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
