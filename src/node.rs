use crate::reference::NodeId;
use crate::utils::{pairing3, MyHash};

/// Structural triple of a node: the decision variable and both children.
///
/// Terminals are self-referential: `FALSE = (FALSE, FALSE, FALSE)` and
/// `TRUE = (TRUE, TRUE, TRUE)`. A variable node `v` is `(v, TRUE, FALSE)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Node {
    pub variable: NodeId,
    pub high: NodeId,
    pub low: NodeId,
}

impl Node {
    pub const fn new(variable: NodeId, high: NodeId, low: NodeId) -> Self {
        Self { variable, high, low }
    }

    /// The self-referential terminal node for `id`.
    pub const fn terminal(id: NodeId) -> Self {
        Self::new(id, id, id)
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::terminal(NodeId::FALSE)
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        pairing3(
            self.variable.get() as u64,
            self.high.get() as u64,
            self.low.get() as u64,
        )
    }
}
