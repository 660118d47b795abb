use std::fmt::{Display, Formatter};

/// Identifier of a node in the unique table.
///
/// Identifiers are assigned densely in creation order and are never reused,
/// so they stay valid for the whole lifetime of the manager that produced
/// them. They are the only stable handle to a node: the manager may grow its
/// tables during any operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The constant `false` terminal.
    pub const FALSE: NodeId = NodeId(0);
    /// The constant `true` terminal.
    pub const TRUE: NodeId = NodeId(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the internal representation of the identifier.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the index of the node in the unique table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl From<bool> for NodeId {
    fn from(value: bool) -> Self {
        if value {
            NodeId::TRUE
        } else {
            NodeId::FALSE
        }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
