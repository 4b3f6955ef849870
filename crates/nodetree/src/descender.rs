//! Recursive descent over a tree with enter/exit callbacks.
//!
//! A [`Descender`] sees every node twice, on entry and on exit, together with
//! the node's depth (0 for the node traversal started at). Entry and exit of
//! the same node always observe the same depth; children sit one level
//! deeper. Composites are entered, then their children are walked in
//! insertion order, then they are exited.
//!
//! [`descend`] recurses on the call stack. [`descend_iterative`] produces the
//! same callback sequence with a heap-allocated stack, for trees whose nesting
//! may be deeper than the call stack tolerates.
use alloc::vec::Vec;

use crate::{
    node::{ListNode, MapNode, Node, ScalarNode},
    visitor::Visitor,
};

/// Enter/exit callbacks for each node kind. All default to no-ops.
pub trait Descender {
    /// Before the list's children.
    fn on_enter_list(&mut self, _node: &ListNode, _depth: usize) {}
    /// After the list's children.
    fn on_exit_list(&mut self, _node: &ListNode, _depth: usize) {}
    /// On reaching a scalar.
    fn on_enter_scalar(&mut self, _node: &ScalarNode, _depth: usize) {}
    /// Right after [`on_enter_scalar`](Self::on_enter_scalar).
    fn on_exit_scalar(&mut self, _node: &ScalarNode, _depth: usize) {}
    /// Before the map's children.
    fn on_enter_map(&mut self, _node: &MapNode, _depth: usize) {}
    /// After the map's children.
    fn on_exit_map(&mut self, _node: &MapNode, _depth: usize) {}
}

/// Adapts a [`Descender`] into a [`Visitor`] that recurses into children.
struct Descent<'a, D: ?Sized> {
    inner: &'a mut D,
    depth: usize,
}

impl<D: Descender + ?Sized> Descent<'_, D> {
    fn children(&mut self, children: &[Node]) {
        self.depth += 1;
        for child in children {
            child.apply(self);
        }
        self.depth -= 1;
    }
}

impl<D: Descender + ?Sized> Visitor for Descent<'_, D> {
    fn visit_list(&mut self, node: &ListNode) {
        self.inner.on_enter_list(node, self.depth);
        self.children(node.children());
        self.inner.on_exit_list(node, self.depth);
    }

    fn visit_scalar(&mut self, node: &ScalarNode) {
        self.inner.on_enter_scalar(node, self.depth);
        self.inner.on_exit_scalar(node, self.depth);
    }

    fn visit_map(&mut self, node: &MapNode) {
        self.inner.on_enter_map(node, self.depth);
        self.children(node.children());
        self.inner.on_exit_map(node, self.depth);
    }
}

/// Walks `node` and its descendants, recursing once per nesting level.
pub fn descend<D: Descender + ?Sized>(node: &Node, descender: &mut D) {
    node.apply(&mut Descent {
        inner: descender,
        depth: 0,
    });
}

enum Step<'a> {
    Enter(&'a Node, usize),
    Exit(&'a Node, usize),
}

/// Same traversal as [`descend`], driven by an explicit stack.
pub fn descend_iterative<D: Descender + ?Sized>(node: &Node, descender: &mut D) {
    let mut steps = Vec::from([Step::Enter(node, 0)]);
    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node, depth) => {
                match node {
                    Node::List(n) => descender.on_enter_list(n, depth),
                    Node::Scalar(n) => descender.on_enter_scalar(n, depth),
                    Node::Map(n) => descender.on_enter_map(n, depth),
                }
                steps.push(Step::Exit(node, depth));
                steps.extend(
                    node.children()
                        .iter()
                        .rev()
                        .map(|child| Step::Enter(child, depth + 1)),
                );
            }
            Step::Exit(node, depth) => match node {
                Node::List(n) => descender.on_exit_list(n, depth),
                Node::Scalar(n) => descender.on_exit_scalar(n, depth),
                Node::Map(n) => descender.on_exit_map(n, depth),
            },
        }
    }
}
