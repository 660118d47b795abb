use crate::reference::NodeId;

/// Error type for checked access to a [`Bdd`][crate::bdd::Bdd].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BddError {
    /// The identifier was not produced by this manager.
    InvalidNode { id: NodeId, size: usize },
    /// The operation expects a variable node.
    NotAVariable(NodeId),
    /// The unique table violates a structural invariant.
    CorruptedStore(String),
}

impl std::fmt::Display for BddError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BddError::InvalidNode { id, size } => {
                write!(f, "Invalid node {}: unique table has {} nodes", id, size)
            }
            BddError::NotAVariable(id) => write!(f, "Node {} is not a variable", id),
            BddError::CorruptedStore(msg) => write!(f, "Corrupted unique table: {}", msg),
        }
    }
}

impl std::error::Error for BddError {}
