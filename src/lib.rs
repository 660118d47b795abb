//! # robdd: Reduced Ordered Binary Decision Diagrams
//!
//! **`robdd`** is a small, manager-centric library for building **Reduced Ordered
//! Binary Decision Diagrams (ROBDDs)**: canonical, maximally shared
//! representations of Boolean functions over an ordered set of variables.
//!
//! ## Key Features
//!
//! - **Hash consing**: every node lives once in the unique table of a
//!   [`Bdd`][crate::bdd::Bdd] manager, so two functions are equivalent iff
//!   their [`NodeId`][crate::reference::NodeId]s are equal.
//! - **One primitive**: all connectives are fixed calls into the ITE
//!   (if-then-else) operator, which performs Shannon expansion and reduces
//!   the result through the unique table.
//! - **Memoization**: ITE and both cofactors have their own computed table.
//!   The caches can be disabled without changing any result.
//! - **Append-only store**: identifiers are dense, assigned in creation order
//!   and never reused. The variable order is the declaration order.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//!
//! // Variables are declared by label; redeclaring returns the same node.
//! let a = bdd.mk_var("a");
//! let b = bdd.mk_var("b");
//! assert_eq!(bdd.mk_var("a"), a);
//!
//! // f = a AND (NOT b)
//! let f = bdd.apply_and(a, bdd.apply_not(b));
//! assert!(!bdd.is_constant(f));
//!
//! // Restrict a=1, b=0: the function becomes TRUE.
//! let g = bdd.cofactor_false(bdd.cofactor_true(f, a), b);
//! assert!(bdd.is_one(g));
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: the [`Bdd`][crate::bdd::Bdd] manager: unique table, ITE, cofactors, operators, traversal.
//! - **[`cache`]**: memoization caches.
//! - **[`debug`]**: owned node descriptions for renderers and tests.
//! - **[`sat`]**: satisfying assignments and model counting.

pub mod bdd;
pub mod cache;
pub mod debug;
pub mod error;
pub mod eval;
pub mod node;
pub mod reference;
pub mod sat;
pub mod table;
pub mod utils;
