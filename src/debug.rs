//! Inspection helpers for the unique table.
//!
//! Everything here returns owned data, so the result can be handed to an
//! external consumer (a renderer, a test, a log line) while the manager keeps
//! growing.

use std::fmt::Write;

use crate::bdd::Bdd;
use crate::reference::NodeId;

/// Detailed information about a single node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NodeInfo {
    /// The identifier of this node
    pub id: NodeId,
    /// Variable tested at this node (None for terminals)
    pub variable: Option<NodeId>,
    /// Label of the tested variable
    pub label: Option<String>,
    /// High child (None for terminals)
    pub high: Option<NodeId>,
    /// Low child (None for terminals)
    pub low: Option<NodeId>,
    /// Is this a variable node
    pub is_variable: bool,
}

impl NodeInfo {
    pub fn is_terminal(&self) -> bool {
        self.id.is_terminal()
    }
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            NodeId::TRUE => write!(f, "ONE"),
            NodeId::FALSE => write!(f, "ZERO"),
            _ => write!(
                f,
                "{}(var={}, high={}, low={})",
                self.id,
                self.label.clone().unwrap_or_else(|| "?".to_string()),
                self.high.map_or("?".to_string(), |r| r.to_string()),
                self.low.map_or("?".to_string(), |r| r.to_string()),
            ),
        }
    }
}

/// All nodes reachable from a root, ordered by identifier.
#[derive(Debug, Clone)]
pub struct BddTree {
    pub root: NodeId,
    pub nodes: Vec<NodeInfo>,
}

impl std::fmt::Display for BddTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "BDD Tree (root = {}):", self.root)?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}

impl Bdd {
    /// Get detailed information about a single node.
    pub fn node_info(&self, id: NodeId) -> NodeInfo {
        let node = self.node(id);
        if id.is_terminal() {
            return NodeInfo {
                id,
                variable: None,
                label: None,
                high: None,
                low: None,
                is_variable: false,
            };
        }

        NodeInfo {
            id,
            variable: Some(node.variable),
            label: self.var_label(node.variable),
            high: Some(node.high),
            low: Some(node.low),
            is_variable: node.variable == id,
        }
    }

    /// Get a tree representation of the diagram rooted at `root`.
    pub fn debug_tree(&self, root: NodeId) -> BddTree {
        let nodes = self
            .reachable_nodes(root)
            .into_iter()
            .map(|id| self.node_info(id))
            .collect();
        BddTree { root, nodes }
    }

    /// Render the whole unique table, one node per line.
    pub fn table_string(&self) -> String {
        let mut result = String::new();

        writeln!(&mut result, "  ID | High |  Low | TopVar | Label").unwrap();
        writeln!(&mut result, "-----+------+------+--------+------").unwrap();
        for i in 0..self.size() {
            let id = NodeId::new(i as u32);
            let node = self.node(id);
            let label = match id {
                NodeId::FALSE => "False".to_string(),
                NodeId::TRUE => "True".to_string(),
                _ => self
                    .var_label(node.variable)
                    .unwrap_or_else(|| node.variable.to_string()),
            };
            writeln!(
                &mut result,
                "{:>4} | {:>4} | {:>4} | {:>6} | {}",
                id.get(),
                node.high.get(),
                node.low.get(),
                node.variable.get(),
                label
            )
            .unwrap();
        }
        result
    }

    /// Check `root` against `expected_fn` on every assignment of `vars`.
    ///
    /// Returns the assignments where the diagram disagrees, together with
    /// the expected and the actual value.
    ///
    /// # Panics
    ///
    /// Panics if `vars` has 64 or more entries.
    pub fn verify_truth_table(
        &self,
        root: NodeId,
        vars: &[NodeId],
        expected_fn: impl Fn(&[bool]) -> bool,
    ) -> Vec<(Vec<bool>, bool, bool)> {
        let mut failures = Vec::new();
        let n = vars.len();
        assert!(n < 64, "Truth table over {} variables is too large", n);

        for bits in 0..(1u64 << n) {
            let assignment: Vec<bool> = (0..n).map(|i| (bits >> i) & 1 == 1).collect();

            let actual = self.evaluate(root, |v| {
                vars.iter()
                    .position(|&w| w == v)
                    .map_or(false, |i| assignment[i])
            });
            let expected = expected_fn(&assignment);

            if actual != expected {
                failures.push((assignment, expected, actual));
            }
        }

        failures
    }
}
