//! Double dispatch over the closed set of node kinds.
//!
//! Implement [`Visitor`] (or [`VisitorMut`]) and hand it to
//! [`Node::apply`](crate::Node::apply); the node calls back the method for its
//! own kind. Every callback defaults to doing nothing, so a visitor only
//! overrides the kinds it cares about.
//!
//! For one-off dispatch, [`FnVisitor`] and [`FnVisitorMut`] take one closure
//! per kind instead of a dedicated type:
//!
//! ```
//! use nodetree::{FnVisitor, Node};
//!
//! let (mut lists, mut scalars, mut maps) = (0, 0, 0);
//! {
//!     let mut count = FnVisitor::new(|_| lists += 1, |_| scalars += 1, |_| maps += 1);
//!     Node::list("xs").apply(&mut count);
//!     Node::scalar("x", 1.0).apply(&mut count);
//! }
//! assert_eq!((lists, scalars, maps), (1, 1, 0));
//! ```
use crate::node::{ListNode, MapNode, ScalarNode};

/// Per-kind callbacks over shared references.
pub trait Visitor {
    /// Called for a list.
    fn visit_list(&mut self, _node: &ListNode) {}
    /// Called for a scalar.
    fn visit_scalar(&mut self, _node: &ScalarNode) {}
    /// Called for a map.
    fn visit_map(&mut self, _node: &MapNode) {}
}

/// Per-kind callbacks over exclusive references.
pub trait VisitorMut {
    /// Called for a list.
    fn visit_list(&mut self, _node: &mut ListNode) {}
    /// Called for a scalar.
    fn visit_scalar(&mut self, _node: &mut ScalarNode) {}
    /// Called for a map.
    fn visit_map(&mut self, _node: &mut MapNode) {}
}

/// A [`Visitor`] assembled from three closures, one per kind.
pub struct FnVisitor<L, S, M> {
    on_list: L,
    on_scalar: S,
    on_map: M,
}

impl<L, S, M> FnVisitor<L, S, M>
where
    L: FnMut(&ListNode),
    S: FnMut(&ScalarNode),
    M: FnMut(&MapNode),
{
    /// Bundles one closure per node kind.
    pub fn new(on_list: L, on_scalar: S, on_map: M) -> Self {
        Self {
            on_list,
            on_scalar,
            on_map,
        }
    }
}

impl<L, S, M> Visitor for FnVisitor<L, S, M>
where
    L: FnMut(&ListNode),
    S: FnMut(&ScalarNode),
    M: FnMut(&MapNode),
{
    fn visit_list(&mut self, node: &ListNode) {
        (self.on_list)(node);
    }

    fn visit_scalar(&mut self, node: &ScalarNode) {
        (self.on_scalar)(node);
    }

    fn visit_map(&mut self, node: &MapNode) {
        (self.on_map)(node);
    }
}

/// A [`VisitorMut`] assembled from three closures, one per kind.
pub struct FnVisitorMut<L, S, M> {
    on_list: L,
    on_scalar: S,
    on_map: M,
}

impl<L, S, M> FnVisitorMut<L, S, M>
where
    L: FnMut(&mut ListNode),
    S: FnMut(&mut ScalarNode),
    M: FnMut(&mut MapNode),
{
    /// Bundles one closure per node kind.
    pub fn new(on_list: L, on_scalar: S, on_map: M) -> Self {
        Self {
            on_list,
            on_scalar,
            on_map,
        }
    }
}

impl<L, S, M> VisitorMut for FnVisitorMut<L, S, M>
where
    L: FnMut(&mut ListNode),
    S: FnMut(&mut ScalarNode),
    M: FnMut(&mut MapNode),
{
    fn visit_list(&mut self, node: &mut ListNode) {
        (self.on_list)(node);
    }

    fn visit_scalar(&mut self, node: &mut ScalarNode) {
        (self.on_scalar)(node);
    }

    fn visit_map(&mut self, node: &mut MapNode) {
        (self.on_map)(node);
    }
}
