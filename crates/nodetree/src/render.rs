//! Indented one-line-per-node dump of a tree.
//!
//! Each node becomes `<indent><label>\n` in pre-order, where the indent is two
//! spaces per level of depth and the label is [`Node::debug_label`]:
//!
//! ```text
//! map{RootNode}
//!   scalar<string>{name}
//!   list{tags}
//!     scalar<string>{tags[0]}
//! ```
use alloc::string::String;
use core::fmt;

use crate::{
    descender::{Descender, descend},
    node::{ListNode, MapNode, Node, ScalarNode},
};

const INDENT: usize = 2;

/// A [`Descender`] that appends one indented line per entered node.
#[derive(Debug, Default)]
pub struct DebugRenderer {
    out: String,
}

impl DebugRenderer {
    /// A renderer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `node` and its descendants, discarding any earlier output.
    pub fn render(&mut self, node: &Node) -> &str {
        self.out.clear();
        descend(node, self);
        &self.out
    }

    fn line(&mut self, depth: usize, label: &str) {
        self.out.extend(core::iter::repeat_n(' ', depth * INDENT));
        self.out.push_str(label);
        self.out.push('\n');
    }
}

impl Descender for DebugRenderer {
    fn on_enter_list(&mut self, node: &ListNode, depth: usize) {
        self.line(depth, &node.debug_label());
    }

    fn on_enter_scalar(&mut self, node: &ScalarNode, depth: usize) {
        self.line(depth, &node.debug_label());
    }

    fn on_enter_map(&mut self, node: &MapNode, depth: usize) {
        self.line(depth, &node.debug_label());
    }
}

/// Convenience wrapper around [`DebugRenderer::render`].
#[must_use]
pub fn render_debug(node: &Node) -> String {
    let mut renderer = DebugRenderer::new();
    renderer.render(node);
    renderer.out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_debug(self))
    }
}
