use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::NodeId;

impl Bdd {
    /// Returns one satisfying path of `f`, if any exists.
    ///
    /// The path lists the tested variables with their values, in variable
    /// order. Variables not on the path are free.
    ///
    /// Returns `None` if `f` is the constant false function.
    pub fn one_sat(&self, f: NodeId) -> Option<Vec<(NodeId, bool)>> {
        if self.is_zero(f) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;

        // In a reduced diagram every non-zero node reaches ONE.
        while !self.is_one(current) {
            let node = self.node(current);
            if !self.is_zero(node.high) {
                path.push((node.variable, true));
                current = node.high;
            } else {
                path.push((node.variable, false));
                current = node.low;
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments of `f` over all declared variables.
    pub fn sat_count(&self, f: NodeId) -> BigUint {
        self.sat_count_over(f, self.num_vars())
    }

    /// Number of satisfying assignments of `f` over `num_vars` variables.
    ///
    /// `num_vars` must be at least the number of variables `f` depends on.
    pub fn sat_count_over(&self, f: NodeId, num_vars: usize) -> BigUint {
        let max = BigUint::from(1u32) << num_vars;
        let mut cache = HashMap::new();
        self._sat_count(self.validate(f), &max, &mut cache)
    }

    fn _sat_count(&self, f: NodeId, max: &BigUint, cache: &mut HashMap<NodeId, BigUint>) -> BigUint {
        if self.is_zero(f) {
            return BigUint::ZERO;
        } else if self.is_one(f) {
            return max.clone();
        }

        if let Some(count) = cache.get(&f) {
            return count.clone();
        }

        let node = self.node(f);
        let count_high = self._sat_count(node.high, max, cache);
        let count_low = self._sat_count(node.low, max, cache);

        let count: BigUint = (count_high + count_low) >> 1;
        cache.insert(f, count.clone());
        count
    }
}
