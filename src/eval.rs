use std::ops::{BitAnd, BitOr, BitXor, Not};

use crate::bdd::Bdd;
use crate::reference::NodeId;

pub struct BddAndOp<F, G> {
    f: F,
    g: G,
}

pub struct BddOrOp<F, G> {
    f: F,
    g: G,
}

pub struct BddXorOp<F, G> {
    f: F,
    g: G,
}

pub struct BddNotOp<F> {
    f: F,
}

impl BitAnd for NodeId {
    type Output = BddAndOp<NodeId, NodeId>;

    fn bitand(self, rhs: Self) -> Self::Output {
        BddAndOp { f: self, g: rhs }
    }
}

impl BitOr for NodeId {
    type Output = BddOrOp<NodeId, NodeId>;

    fn bitor(self, rhs: Self) -> Self::Output {
        BddOrOp { f: self, g: rhs }
    }
}

impl BitXor for NodeId {
    type Output = BddXorOp<NodeId, NodeId>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        BddXorOp { f: self, g: rhs }
    }
}

impl Not for NodeId {
    type Output = BddNotOp<NodeId>;

    fn not(self) -> Self::Output {
        BddNotOp { f: self }
    }
}

/// A deferred Boolean expression over nodes of a [`Bdd`].
pub trait Eval {
    fn eval(&self, bdd: &Bdd) -> NodeId;
}

impl Bdd {
    /// Evaluate a deferred expression built with `&`, `|`, `^` and `!`.
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let a = bdd.mk_var("a");
    /// let b = bdd.mk_var("b");
    /// assert_eq!(bdd.eval(a & b), bdd.apply_and(a, b));
    /// assert_eq!(bdd.eval(!a), bdd.apply_not(a));
    /// ```
    pub fn eval(&self, value: impl Eval) -> NodeId {
        value.eval(self)
    }
}

impl Eval for NodeId {
    fn eval(&self, _bdd: &Bdd) -> NodeId {
        *self
    }
}

impl<F: Eval, G: Eval> Eval for BddAndOp<F, G> {
    fn eval(&self, bdd: &Bdd) -> NodeId {
        bdd.apply_and(self.f.eval(bdd), self.g.eval(bdd))
    }
}

impl<F: Eval, G: Eval> Eval for BddOrOp<F, G> {
    fn eval(&self, bdd: &Bdd) -> NodeId {
        bdd.apply_or(self.f.eval(bdd), self.g.eval(bdd))
    }
}

impl<F: Eval, G: Eval> Eval for BddXorOp<F, G> {
    fn eval(&self, bdd: &Bdd) -> NodeId {
        bdd.apply_xor(self.f.eval(bdd), self.g.eval(bdd))
    }
}

impl<F: Eval> Eval for BddNotOp<F> {
    fn eval(&self, bdd: &Bdd) -> NodeId {
        bdd.apply_not(self.f.eval(bdd))
    }
}
