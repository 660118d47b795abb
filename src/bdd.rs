use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use log::{debug, trace};

use crate::cache::{Cache, CacheStats};
use crate::error::BddError;
use crate::node::Node;
use crate::reference::NodeId;
use crate::table::Table;

type Storage = Table<Node>;

impl Storage {
    pub fn variable(&self, index: usize) -> NodeId {
        self.value(index).variable
    }
    pub fn high(&self, index: usize) -> NodeId {
        self.value(index).high
    }
    pub fn low(&self, index: usize) -> NodeId {
        self.value(index).low
    }
}

/// Configuration of a [`Bdd`] manager.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// Initial capacity of the unique table is `2^storage_bits` nodes.
    pub storage_bits: usize,
    /// Initial capacity of each operation cache is `2^cache_bits` entries.
    pub cache_bits: usize,
    /// Whether the ITE and cofactor results are memoized.
    pub caching: bool,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 12,
            cache_bits: 12,
            caching: true,
        }
    }
}

impl BddConfig {
    pub fn with_storage_bits(mut self, bits: usize) -> Self {
        self.storage_bits = bits;
        self
    }
    pub fn with_cache_bits(mut self, bits: usize) -> Self {
        self.cache_bits = bits;
        self
    }
    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }
}

/// Variable declarations: label <-> variable node.
#[derive(Default)]
struct Labels {
    ids: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
    /// Declared variables in creation (= ordering) order.
    vars: Vec<NodeId>,
}

type IteKey = (NodeId, NodeId, NodeId);
type CofactorKey = (NodeId, NodeId);

/// The BDD manager.
///
/// Owns the unique table, the variable declarations and the three
/// memoization caches. Every function is a [`NodeId`] into this manager;
/// two functions are equal iff their identifiers are equal.
///
/// All operations take `&self`. The tables live in [`RefCell`]s and are
/// borrowed only for the duration of a single lookup or insertion, so the
/// recursive algorithms may grow them at any depth.
pub struct Bdd {
    config: BddConfig,
    storage: RefCell<Storage>,
    labels: RefCell<Labels>,
    ite_cache: RefCell<Cache<IteKey, NodeId>>,
    cofactor_true_cache: RefCell<Cache<CofactorKey, NodeId>>,
    cofactor_false_cache: RefCell<Cache<CofactorKey, NodeId>>,
}

impl Bdd {
    pub fn new(config: BddConfig) -> Self {
        let mut storage = Storage::new(config.storage_bits);

        // Allocate the terminal nodes:
        let zero = storage.put(Node::terminal(NodeId::FALSE));
        assert_eq!(zero, NodeId::FALSE.index()); // Make sure the terminal node is (0).
        let one = storage.put(Node::terminal(NodeId::TRUE));
        assert_eq!(one, NodeId::TRUE.index()); // Make sure the terminal node is (1).

        fn new_cache<K, V>(config: &BddConfig) -> RefCell<Cache<K, V>> {
            if config.caching {
                RefCell::new(Cache::new(config.cache_bits))
            } else {
                RefCell::new(Cache::disabled())
            }
        }

        Self {
            config,
            storage: RefCell::new(storage),
            labels: RefCell::new(Labels::default()),
            ite_cache: new_cache(&config),
            cofactor_true_cache: new_cache(&config),
            cofactor_false_cache: new_cache(&config),
        }
    }
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::new(BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("size", &self.size())
            .field("vars", &self.num_vars())
            .field("caching", &self.config.caching)
            .finish()
    }
}

// Boundary checks.
impl Bdd {
    /// Check that `f` was produced by this manager.
    pub fn check_node(&self, f: NodeId) -> Result<NodeId, BddError> {
        let size = self.size();
        if f.index() < size {
            Ok(f)
        } else {
            Err(BddError::InvalidNode { id: f, size })
        }
    }

    /// Check that `x` is a variable node of this manager.
    pub fn check_var(&self, x: NodeId) -> Result<NodeId, BddError> {
        self.check_node(x)?;
        if self.is_variable_unchecked(x) {
            Ok(x)
        } else {
            Err(BddError::NotAVariable(x))
        }
    }

    /// Get the structural triple of `f`, if it exists.
    pub fn try_node(&self, f: NodeId) -> Result<Node, BddError> {
        self.check_node(f)?;
        Ok(self.raw_node(f))
    }

    /// Fail fast on foreign identifiers.
    pub(crate) fn validate(&self, f: NodeId) -> NodeId {
        match self.check_node(f) {
            Ok(f) => f,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fail fast unless `x` is a variable or a terminal.
    fn validate_var_or_terminal(&self, x: NodeId) -> NodeId {
        self.validate(x);
        if x.is_terminal() {
            return x;
        }
        match self.check_var(x) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

// Node store.
impl Bdd {
    pub fn config(&self) -> &BddConfig {
        &self.config
    }

    pub fn zero(&self) -> NodeId {
        NodeId::FALSE
    }
    pub fn one(&self) -> NodeId {
        NodeId::TRUE
    }

    /// Total number of nodes in the unique table, terminals included.
    ///
    /// This is also the identifier the next new node will receive.
    pub fn size(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Number of declared variables.
    pub fn num_vars(&self) -> usize {
        self.labels.borrow().vars.len()
    }

    /// Declared variables in order.
    pub fn vars(&self) -> Vec<NodeId> {
        self.labels.borrow().vars.clone()
    }

    /// Copy of the node triple. Never hand out references into the table.
    fn raw_node(&self, f: NodeId) -> Node {
        *self.storage.borrow().value(f.index())
    }

    /// Get the structural triple of `f`.
    pub fn node(&self, f: NodeId) -> Node {
        self.raw_node(self.validate(f))
    }

    /// Decision variable tested at `f`. Terminals are their own top variable.
    pub fn top_var(&self, f: NodeId) -> NodeId {
        self.storage.borrow().variable(self.validate(f).index())
    }
    pub fn high(&self, f: NodeId) -> NodeId {
        self.storage.borrow().high(self.validate(f).index())
    }
    pub fn low(&self, f: NodeId) -> NodeId {
        self.storage.borrow().low(self.validate(f).index())
    }

    pub fn is_zero(&self, f: NodeId) -> bool {
        f == NodeId::FALSE
    }
    pub fn is_one(&self, f: NodeId) -> bool {
        f == NodeId::TRUE
    }

    /// True exactly for the two terminals.
    pub fn is_constant(&self, f: NodeId) -> bool {
        self.validate(f).is_terminal()
    }

    /// True iff `f` is the node created for a declared variable.
    pub fn is_variable(&self, f: NodeId) -> bool {
        self.is_variable_unchecked(self.validate(f))
    }

    fn is_variable_unchecked(&self, f: NodeId) -> bool {
        !f.is_terminal() && self.storage.borrow().variable(f.index()) == f
    }

    /// Declare the variable `label`, or return it if it is already declared.
    ///
    /// Variables are ordered by their first declaration.
    pub fn mk_var(&self, label: &str) -> NodeId {
        if let Some(v) = self.find_var(label) {
            debug!("mk_var({:?}) -> {} (existing)", label, v);
            return v;
        }

        let v = {
            let mut storage = self.storage.borrow_mut();
            let next = storage.next_index();
            assert!(next < u32::MAX as usize, "Unique table is full");
            let v = NodeId::new(next as u32);
            let i = storage.put(Node::new(v, NodeId::TRUE, NodeId::FALSE));
            assert_eq!(i, next, "Variable node must be freshly allocated");
            v
        };

        let mut labels = self.labels.borrow_mut();
        labels.ids.insert(label.to_string(), v);
        labels.names.insert(v, label.to_string());
        labels.vars.push(v);

        debug!("mk_var({:?}) -> {}", label, v);
        v
    }

    /// Canonical node `(v, high, low)`.
    ///
    /// Returns `high` when both children coincide, the existing node when the
    /// triple is already stored, and a freshly allocated node otherwise.
    ///
    /// # Panics
    ///
    /// Panics if any identifier is foreign, if `v` is not a variable, or if a
    /// non-terminal child tests a variable that is not strictly after `v`.
    pub fn mk_node(&self, v: NodeId, high: NodeId, low: NodeId) -> NodeId {
        if let Err(e) = self.check_var(v) {
            panic!("{}", e);
        }
        for child in [self.validate(high), self.validate(low)] {
            if !child.is_terminal() {
                let w = self.storage.borrow().variable(child.index());
                assert!(
                    w > v,
                    "Variable order violated: child {} tests {} which is not after {}",
                    child,
                    w,
                    v
                );
            }
        }
        self.make_node(v, high, low)
    }

    /// The single path by which non-terminal nodes are created.
    fn make_node(&self, v: NodeId, high: NodeId, low: NodeId) -> NodeId {
        if high == low {
            trace!("mk({}, {}, {}) => {} (redundant test)", v, high, low, high);
            return high;
        }

        let mut storage = self.storage.borrow_mut();
        let next = storage.next_index();
        let i = storage.put(Node::new(v, high, low));
        if i == next {
            assert!(i < u32::MAX as usize, "Unique table is full");
            debug!("mk({}, {}, {}) -> @{} (new)", v, high, low, i);
        } else {
            trace!("mk({}, {}, {}) -> @{} (existing)", v, high, low, i);
        }
        NodeId::new(i as u32)
    }
}

// Labels.
impl Bdd {
    /// Identifier of the variable declared as `label`, without declaring it.
    pub fn find_var(&self, label: &str) -> Option<NodeId> {
        self.labels.borrow().ids.get(label).copied()
    }

    /// Label of the variable `v`.
    pub fn var_label(&self, v: NodeId) -> Option<String> {
        self.labels.borrow().names.get(&v).cloned()
    }

    /// Label of the top variable of `f`, or `None` for terminals.
    pub fn top_var_name(&self, f: NodeId) -> Option<String> {
        let v = self.top_var(f);
        self.var_label(v)
    }
}

// Cofactors.
impl Bdd {
    /// Positive cofactor `f|x=1`.
    pub fn cofactor_true(&self, f: NodeId, x: NodeId) -> NodeId {
        self.validate(f);
        self.validate_var_or_terminal(x);
        self.cofactor(f, x, true)
    }

    /// Negative cofactor `f|x=0`.
    pub fn cofactor_false(&self, f: NodeId, x: NodeId) -> NodeId {
        self.validate(f);
        self.validate_var_or_terminal(x);
        self.cofactor(f, x, false)
    }

    /// Positive cofactor with respect to the top variable of `f`.
    pub fn top_cofactor_true(&self, f: NodeId) -> NodeId {
        let x = self.top_var(f);
        self.cofactor(f, x, true)
    }

    /// Negative cofactor with respect to the top variable of `f`.
    pub fn top_cofactor_false(&self, f: NodeId) -> NodeId {
        let x = self.top_var(f);
        self.cofactor(f, x, false)
    }

    fn cofactor(&self, f: NodeId, x: NodeId, polarity: bool) -> NodeId {
        if f.is_terminal() || x.is_terminal() {
            return f;
        }

        let node = self.raw_node(f);
        if node.variable > x {
            // `f` cannot depend on `x`.
            return f;
        }
        if node.variable == x {
            return if polarity { node.high } else { node.low };
        }

        let cache = if polarity {
            &self.cofactor_true_cache
        } else {
            &self.cofactor_false_cache
        };
        let key = (f, x);
        let cached = cache.borrow_mut().get(&key);
        if let Some(res) = cached {
            trace!("cache: cofactor(f = {}, x = {}, {}) -> {}", f, x, polarity, res);
            return res;
        }

        let high = self.cofactor(node.high, x, polarity);
        let low = self.cofactor(node.low, x, polarity);
        let res = self.make_node(node.variable, high, low);
        trace!("computed: cofactor(f = {}, x = {}, {}) -> {}", f, x, polarity, res);

        cache.borrow_mut().insert(key, res);
        res
    }
}

// ITE.
impl Bdd {
    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(i, t, e) = (i ∧ t) ∨ (¬i ∧ e)
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let a = bdd.mk_var("a");
    /// let b = bdd.mk_var("b");
    /// let c = bdd.mk_var("c");
    /// let f = bdd.apply_ite(a, b, c);
    /// assert_eq!(f, bdd.mk_node(a, b, c));
    /// let a_and_b = bdd.apply_and(a, b);
    /// let not_a_and_c = bdd.apply_and(bdd.apply_not(a), c);
    /// assert_eq!(f, bdd.apply_or(a_and_b, not_a_and_c));
    /// ```
    pub fn apply_ite(&self, i: NodeId, t: NodeId, e: NodeId) -> NodeId {
        self.validate(i);
        self.validate(t);
        self.validate(e);
        self.ite(i, t, e)
    }

    fn ite(&self, i: NodeId, t: NodeId, e: NodeId) -> NodeId {
        trace!("ite(i = {}, t = {}, e = {})", i, t, e);

        // Terminal cases:
        //   ite(1,T,E) => T
        //   ite(0,T,E) => E
        //   ite(I,T,T) => T
        //   ite(I,1,0) => I
        if i == NodeId::TRUE {
            return t;
        }
        if i == NodeId::FALSE {
            return e;
        }
        if t == e {
            return t;
        }
        if t == NodeId::TRUE && e == NodeId::FALSE {
            return i;
        }

        let key = (i, t, e);
        let cached = self.ite_cache.borrow_mut().get(&key);
        if let Some(res) = cached {
            trace!("cache: ite(i = {}, t = {}, e = {}) -> {}", i, t, e, res);
            return res;
        }

        let top = self.expansion_var(i, t, e);
        trace!("expanding ite(i = {}, t = {}, e = {}) on {}", i, t, e, top);

        let high = self.ite(
            self.cofactor(i, top, true),
            self.cofactor(t, top, true),
            self.cofactor(e, top, true),
        );
        let low = self.ite(
            self.cofactor(i, top, false),
            self.cofactor(t, top, false),
            self.cofactor(e, top, false),
        );

        let res = self.make_node(top, high, low);
        debug!("computed: ite(i = {}, t = {}, e = {}) -> {}", i, t, e, res);

        self.ite_cache.borrow_mut().insert(key, res);
        res
    }

    /// Smallest top variable among the non-terminal operands.
    fn expansion_var(&self, i: NodeId, t: NodeId, e: NodeId) -> NodeId {
        debug_assert!(!i.is_terminal());
        let storage = self.storage.borrow();
        let mut top = storage.variable(i.index());
        for f in [t, e] {
            if !f.is_terminal() {
                top = top.min(storage.variable(f.index()));
            }
        }
        top
    }
}

// Boolean operators.
impl Bdd {
    pub fn apply_not(&self, f: NodeId) -> NodeId {
        self.validate(f);
        self.not(f)
    }

    fn not(&self, f: NodeId) -> NodeId {
        self.ite(f, NodeId::FALSE, NodeId::TRUE)
    }

    pub fn apply_and(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, v, NodeId::FALSE)
    }

    pub fn apply_or(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, NodeId::TRUE, v)
    }

    pub fn apply_xor(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, self.not(v), v)
    }

    pub fn apply_nand(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, self.not(v), NodeId::TRUE)
    }

    pub fn apply_nor(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, NodeId::FALSE, self.not(v))
    }

    pub fn apply_xnor(&self, u: NodeId, v: NodeId) -> NodeId {
        self.validate(u);
        self.validate(v);
        self.ite(u, v, self.not(v))
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        let mut res = NodeId::TRUE;
        for node in nodes {
            res = self.apply_and(res, node);
        }
        res
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        let mut res = NodeId::FALSE;
        for node in nodes {
            res = self.apply_or(res, node);
        }
        res
    }
}

// Traversal and queries.
impl Bdd {
    /// All nodes reachable from `root`, `root` and terminals included.
    pub fn reachable_nodes(&self, root: NodeId) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![self.validate(root)];

        while let Some(node) = stack.pop() {
            if visited.insert(node) && !node.is_terminal() {
                let Node { high, low, .. } = self.raw_node(node);
                stack.push(low);
                stack.push(high);
            }
        }

        visited
    }

    /// Variables tested by some node reachable from `root`.
    pub fn reachable_vars(&self, root: NodeId) -> BTreeSet<NodeId> {
        let storage = self.storage.borrow();
        self.reachable_nodes(root)
            .into_iter()
            .filter(|f| !f.is_terminal())
            .map(|f| storage.variable(f.index()))
            .collect()
    }

    /// Number of nodes reachable from `f`, terminals included.
    pub fn node_count(&self, f: NodeId) -> usize {
        self.reachable_nodes(f).len()
    }

    /// Evaluate `f` under the given assignment of variables.
    pub fn evaluate(&self, f: NodeId, assignment: impl Fn(NodeId) -> bool) -> bool {
        let mut current = self.validate(f);
        while !current.is_terminal() {
            let node = self.raw_node(current);
            current = if assignment(node.variable) {
                node.high
            } else {
                node.low
            };
        }
        current == NodeId::TRUE
    }
}

// Caches.
impl Bdd {
    pub fn ite_cache_stats(&self) -> CacheStats {
        self.ite_cache.borrow().stats()
    }

    /// Combined statistics of both cofactor caches.
    pub fn cofactor_cache_stats(&self) -> CacheStats {
        self.cofactor_true_cache.borrow().stats() + self.cofactor_false_cache.borrow().stats()
    }

    /// Drop every memoized result. Does not affect any identifier.
    pub fn clear_caches(&self) {
        debug!("clear_caches()");
        self.ite_cache.borrow_mut().clear();
        self.cofactor_true_cache.borrow_mut().clear();
        self.cofactor_false_cache.borrow_mut().clear();
    }
}

// Invariants.
impl Bdd {
    /// Walk the whole unique table and check every structural invariant.
    pub fn check_invariants(&self) -> Result<(), BddError> {
        let storage = self.storage.borrow();
        let corrupted = |msg: String| Err(BddError::CorruptedStore(msg));

        for (i, node) in storage.iter().enumerate() {
            let id = NodeId::new(i as u32);

            if storage.find(node) != Some(i) {
                return corrupted(format!("node {} is not canonical", id));
            }

            if id.is_terminal() {
                if *node != Node::terminal(id) {
                    return corrupted(format!("terminal {} is {:?}", id, node));
                }
                continue;
            }

            if node.high == node.low {
                return corrupted(format!("node {} has equal children", id));
            }
            if node.high >= id || node.low >= id {
                return corrupted(format!("node {} points forward", id));
            }
            if node.variable.is_terminal() || storage.variable(node.variable.index()) != node.variable {
                return corrupted(format!("node {} tests non-variable {}", id, node.variable));
            }
            if node.variable == id && (node.high != NodeId::TRUE || node.low != NodeId::FALSE) {
                return corrupted(format!("variable node {} is {:?}", id, node));
            }
            for child in [node.high, node.low] {
                if !child.is_terminal() && storage.variable(child.index()) <= node.variable {
                    return corrupted(format!("node {} breaks the order at child {}", id, child));
                }
            }
        }

        let labels = self.labels.borrow();
        for (label, &v) in labels.ids.iter() {
            if v.index() >= storage.len() || storage.variable(v.index()) != v {
                return corrupted(format!("label {:?} maps to non-variable {}", label, v));
            }
            if labels.names.get(&v) != Some(label) {
                return corrupted(format!("label {:?} is not registered for {}", label, v));
            }
        }
        if labels.vars.windows(2).any(|w| w[0] >= w[1]) {
            return corrupted("variables are not in creation order".to_string());
        }

        Ok(())
    }

    pub fn to_bracket_string(&self, f: NodeId) -> String {
        if self.is_zero(f) {
            return "(0)".to_string();
        } else if self.is_one(f) {
            return "(1)".to_string();
        }

        let node = self.node(f);
        let name = self
            .var_label(node.variable)
            .unwrap_or_else(|| node.variable.to_string());

        format!(
            "{}:({}, {}, {})",
            f,
            name,
            self.to_bracket_string(node.high),
            self.to_bracket_string(node.low)
        )
    }
}
