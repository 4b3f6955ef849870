//! Stack discipline for rebuilding a tree from a flat, balanced sequence of
//! additions and closes.
//!
//! The builder owns the tree while it grows. Open composites are tracked as a
//! path of child indices from the root, innermost last, so no node is ever
//! shared between the tree and the stack. Kind-specific behavior (how to
//! attach, whether to open) is chosen through visitor dispatch.
//!
//! ```
//! use nodetree::{Node, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! builder.add_child(Node::map("RootNode"))?;
//! builder.add_child(Node::list("tags"))?;
//! builder.add_child(Node::scalar("tags[0]", "a"))?;
//! builder.close_parent()?;
//! builder.add_child(Node::scalar("alive", true))?;
//! builder.close_parent()?;
//!
//! let root = builder.get_root()?;
//! assert_eq!(root.children().len(), 2);
//! # Ok::<(), nodetree::NodeError>(())
//! ```
use alloc::{format, vec::Vec};
use core::cell::Cell;

use tracing::trace;

use crate::{
    error::{NodeError, Result},
    node::{ListNode, MapNode, Node, ScalarNode},
    visitor::{FnVisitor, FnVisitorMut},
};

/// Reassembles one tree from a sequence of [`add_child`](Self::add_child) and
/// [`close_parent`](Self::close_parent) calls.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    root: Option<Node>,
    /// Child-index path of every open container. The first entry stands for
    /// the root itself and carries no index.
    open: Vec<usize>,
    max_depth: Option<usize>,
}

impl TreeBuilder {
    /// An empty builder with no depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder that refuses to open more than `max_depth` containers at
    /// once.
    #[must_use]
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Adds `node` to the innermost open container, or records it as the root
    /// if nothing has been added yet. A list or map is then opened so that
    /// following additions land inside it.
    ///
    /// # Errors
    ///
    /// - [`NodeError::InvalidOperation`] if the root is already complete, or
    ///   the innermost open node is a scalar.
    /// - [`NodeError::DuplicateKey`] if the innermost container is a map that
    ///   already has a child with this name.
    /// - [`NodeError::UnsupportedElement`] if opening `node` would exceed the
    ///   configured maximum depth.
    ///
    /// The builder is unchanged when an error is returned.
    pub fn add_child(&mut self, node: Node) -> Result<()> {
        let opens = opens_container(&node);
        if opens && self.max_depth.is_some_and(|max| self.open.len() >= max) {
            return Err(NodeError::UnsupportedElement(format!(
                "opening {} would nest deeper than {} levels",
                node.debug_label(),
                self.open.len()
            )));
        }

        trace!(
            name = node.name(),
            kind = node.kind().as_str(),
            depth = self.open.len(),
            "adding node"
        );

        if self.open.is_empty() {
            if let Some(root) = &self.root {
                return Err(NodeError::InvalidOperation(format!(
                    "cannot add {}: root {} is already complete",
                    node.debug_label(),
                    root.debug_label()
                )));
            }
            self.root = Some(node);
            if opens {
                self.open.push(0);
            }
            return Ok(());
        }

        let index = self.attach(node)?;
        if opens {
            self.open.push(index);
        }
        Ok(())
    }

    /// Closes the innermost open container.
    ///
    /// # Errors
    ///
    /// [`NodeError::InvalidOperation`] if no container is open.
    pub fn close_parent(&mut self) -> Result<()> {
        if self.open.pop().is_none() {
            return Err(NodeError::InvalidOperation(
                "cannot close a container: none is open".into(),
            ));
        }
        trace!(depth = self.open.len(), "closed container");
        Ok(())
    }

    /// The innermost open container.
    ///
    /// # Errors
    ///
    /// [`NodeError::NoSuchElement`] if no container is open, either because
    /// nothing was added yet, every container was closed, or the root is a
    /// scalar.
    pub fn last_parent(&self) -> Result<&Node> {
        self.open_container()
            .ok_or_else(|| NodeError::NoSuchElement("no container is open".into()))
    }

    /// Number of currently open containers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// The root recorded so far, complete or not.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Whether a root exists and every container has been closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.root.is_some() && self.open.is_empty()
    }

    /// Hands over the finished tree.
    ///
    /// # Errors
    ///
    /// - [`NodeError::InvalidOperation`] if containers are still open.
    /// - [`NodeError::NoSuchElement`] if nothing was ever added.
    pub fn get_root(self) -> Result<Node> {
        if !self.open.is_empty() {
            return Err(NodeError::InvalidOperation(format!(
                "tree is incomplete: {} containers are still open",
                self.open.len()
            )));
        }
        self.root
            .ok_or_else(|| NodeError::NoSuchElement("no root node has been added".into()))
    }

    /// Attaches `node` to the innermost open container and returns its child
    /// index there.
    fn attach(&mut self, node: Node) -> Result<usize> {
        let Some(parent) = self.open_container_mut() else {
            return Err(NodeError::InvalidOperation(
                "open container path no longer resolves".into(),
            ));
        };

        let child = Cell::new(Some(node));
        let outcome = Cell::new(Ok(0));
        parent.apply_mut(&mut FnVisitorMut::new(
            |list: &mut ListNode| {
                if let Some(child) = child.take() {
                    list.add_child(child);
                    outcome.set(Ok(list.len() - 1));
                }
            },
            |scalar: &mut ScalarNode| {
                outcome.set(Err(NodeError::InvalidOperation(format!(
                    "cannot add children to {}",
                    scalar.debug_label()
                ))));
            },
            |map: &mut MapNode| {
                if let Some(child) = child.take() {
                    outcome.set(map.add_child(child).map(|()| map.len() - 1));
                }
            },
        ));
        outcome.into_inner()
    }

    fn open_container(&self) -> Option<&Node> {
        let (_, path) = self.open.split_first()?;
        let mut node = self.root.as_ref()?;
        for &index in path {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    fn open_container_mut(&mut self) -> Option<&mut Node> {
        let (_, path) = self.open.split_first()?;
        let mut node = self.root.as_mut()?;
        for &index in path {
            node = node.child_mut(index)?;
        }
        Some(node)
    }
}

/// Whether `node` becomes an open container once added.
fn opens_container(node: &Node) -> bool {
    let opens = Cell::new(false);
    node.apply(&mut FnVisitor::new(
        |_: &ListNode| opens.set(true),
        |_: &ScalarNode| opens.set(false),
        |_: &MapNode| opens.set(true),
    ));
    opens.get()
}
