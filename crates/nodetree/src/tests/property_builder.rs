use alloc::{format, string::String, vec::Vec};

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::arbitrary::Shape;
use crate::{
    Descender, ListNode, MapNode, Node, ScalarNode, TreeBuilder, TreeEvent, TreeOptions,
    assemble, descend, descend_iterative, render_debug,
};

fn tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Events for `shape` assemble into exactly the hand-built tree.
#[test]
fn assembled_tree_matches_hand_built() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(shape: Shape) -> bool {
        assemble(shape.events(), TreeOptions::default()).ok() == Some(shape.to_node("RootNode"))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Shape) -> bool);
}

/// Drives the builder directly: every open is matched by a close, the stack
/// ends empty, and one more close fails.
#[test]
fn balanced_sequences_leave_an_empty_stack() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(shape: Shape) -> bool {
        let expected = shape.to_node("RootNode");
        let mut builder = TreeBuilder::new();
        let mut pending = Vec::from([(&expected, false)]);
        let mut max_seen = 0;

        // Replays the expected tree as adds and closes, in pre-order.
        while let Some((node, closing)) = pending.pop() {
            if closing {
                if builder.close_parent().is_err() {
                    return false;
                }
                continue;
            }
            let empty = match node {
                Node::Scalar(n) => Node::Scalar(n.clone()),
                Node::List(n) => Node::list(n.name()),
                Node::Map(n) => Node::map(n.name()),
            };
            if builder.add_child(empty).is_err() {
                return false;
            }
            if node.kind().is_composite() {
                max_seen = max_seen.max(builder.depth());
                pending.push((node, true));
                pending.extend(node.children().iter().rev().map(|child| (child, false)));
            }
        }

        let balanced = builder.depth() == 0 && builder.is_complete();
        let extra_close = builder.close_parent().is_err_and(|e| e.is_invalid_operation());
        balanced
            && extra_close
            && max_seen == max_nesting(&shape)
            && builder.get_root().ok() == Some(expected)
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Shape) -> bool);
}

fn max_nesting(shape: &Shape) -> usize {
    match shape {
        Shape::Scalar(_) => 0,
        Shape::List(items) => 1 + items.iter().map(max_nesting).max().unwrap_or(0),
        Shape::Map(entries) => 1 + entries.iter().map(|(_, s)| max_nesting(s)).max().unwrap_or(0),
    }
}

#[quickcheck]
fn unbalanced_close_is_invalid(shape: Shape) -> bool {
    let mut events = shape.events();
    events.push(TreeEvent::ListEnd);
    assemble(events, TreeOptions::default()).is_err_and(|e| e.is_invalid_operation())
}

#[quickcheck]
fn truncated_streams_never_yield_a_root(shape: Shape) -> bool {
    let mut events = shape.events();
    if shape.composite_count() == 0 {
        return true;
    }
    events.pop();
    assemble(events, TreeOptions::default()).is_err()
}

#[derive(Default)]
struct Log(Vec<String>);

impl Descender for Log {
    fn on_enter_list(&mut self, node: &ListNode, depth: usize) {
        self.0.push(format!("+{}@{depth}", node.name()));
    }
    fn on_exit_list(&mut self, node: &ListNode, depth: usize) {
        self.0.push(format!("-{}@{depth}", node.name()));
    }
    fn on_enter_scalar(&mut self, node: &ScalarNode, depth: usize) {
        self.0.push(format!("+{}@{depth}", node.name()));
    }
    fn on_exit_scalar(&mut self, node: &ScalarNode, depth: usize) {
        self.0.push(format!("-{}@{depth}", node.name()));
    }
    fn on_enter_map(&mut self, node: &MapNode, depth: usize) {
        self.0.push(format!("+{}@{depth}", node.name()));
    }
    fn on_exit_map(&mut self, node: &MapNode, depth: usize) {
        self.0.push(format!("-{}@{depth}", node.name()));
    }
}

#[quickcheck]
fn traversals_agree(shape: Shape) -> bool {
    let tree = shape.to_node("RootNode");
    let mut recursive = Log::default();
    let mut iterative = Log::default();
    descend(&tree, &mut recursive);
    descend_iterative(&tree, &mut iterative);
    recursive.0 == iterative.0
}

#[quickcheck]
fn debug_rendering_is_an_indented_preorder(shape: Shape) -> bool {
    fn expected(node: &Node, depth: usize, out: &mut String) {
        out.push_str(&" ".repeat(depth * 2));
        out.push_str(&node.debug_label());
        out.push('\n');
        for child in node.children() {
            expected(child, depth + 1, out);
        }
    }
    let tree = shape.to_node("RootNode");
    let mut out = String::new();
    expected(&tree, 0, &mut out);
    render_debug(&tree) == out
}
