//! Event vocabulary and the adapter that turns an event stream into builder
//! calls.
//!
//! An event source (a tokenizer, a deserializer, a hand-written test) emits
//! [`TreeEvent`]s in properly nested order. [`TreeAssembler`] names each new
//! node through a [`NodeNamer`] and forwards it to a [`TreeBuilder`], so the
//! builder itself knows nothing about keys or naming.
//!
//! # Examples
//!
//! ```
//! use nodetree::{Node, TreeAssembler, TreeEvent};
//!
//! let mut assembler = TreeAssembler::new();
//! for event in [
//!     TreeEvent::ListStart,
//!     TreeEvent::Value(1.2.into()),
//!     TreeEvent::Value(3.4.into()),
//!     TreeEvent::ListEnd,
//! ] {
//!     assembler.push(event)?;
//! }
//! let root = assembler.finish()?;
//!
//! let names: Vec<_> = root.children().iter().map(Node::name).collect();
//! assert_eq!(names, ["RootNode[0]", "RootNode[1]"]);
//! # Ok::<(), nodetree::NodeError>(())
//! ```
use alloc::{format, string::String};

use tracing::trace;

use crate::{
    builder::TreeBuilder,
    error::{NodeError, Result},
    node::{ListNode, Node, NodeKind, Scalar},
    options::TreeOptions,
    visitor::FnVisitor,
};

/// One step of a nested construction sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// Opens a list.
    ListStart,
    /// Closes the innermost list.
    ListEnd,
    /// Opens a map.
    MapStart,
    /// Closes the innermost map.
    MapEnd,
    /// Names the next value. Only valid directly inside a map.
    Key(String),
    /// A leaf value.
    Value(Scalar),
}

impl From<Scalar> for TreeEvent {
    fn from(value: Scalar) -> Self {
        Self::Value(value)
    }
}

/// Decides the name of every node created from an event stream.
///
/// In order of precedence, a new node is named:
/// 1. after the pending key, which is consumed;
/// 2. with the configured root name, if it is the first node of the stream;
/// 3. `<list>[<i>]` when the innermost open container is a list, `i` being
///    that list's length before insertion;
/// 4. with a placeholder `<prefix><Kind><n>` otherwise.
#[derive(Debug, Clone)]
pub struct NodeNamer {
    root_name: String,
    unnamed_prefix: String,
    pending_key: Option<String>,
    named_root: bool,
    unnamed: usize,
}

impl NodeNamer {
    /// A namer using the root name and placeholder prefix of `options`.
    #[must_use]
    pub fn new(options: &TreeOptions) -> Self {
        Self {
            root_name: options.root_name.clone(),
            unnamed_prefix: options.unnamed_prefix.clone(),
            pending_key: None,
            named_root: false,
            unnamed: 0,
        }
    }

    /// Stores `key` as the name of the next node.
    ///
    /// # Errors
    ///
    /// [`NodeError::InvalidOperation`] if a key is already pending.
    pub fn set_key(&mut self, key: String) -> Result<()> {
        if let Some(pending) = &self.pending_key {
            return Err(NodeError::InvalidOperation(format!(
                "key {key} follows key {pending} without a value in between"
            )));
        }
        self.pending_key = Some(key);
        Ok(())
    }

    /// The key waiting for its value, if any.
    #[must_use]
    pub fn pending_key(&self) -> Option<&str> {
        self.pending_key.as_deref()
    }

    /// Picks the name of the next node; `kind` fills placeholder names.
    pub fn next_name(&mut self, builder: &TreeBuilder, kind: &str) -> String {
        let first = !core::mem::replace(&mut self.named_root, true);
        if let Some(key) = self.pending_key.take() {
            return key;
        }
        if first {
            return self.root_name.clone();
        }
        if let Some(name) = builder.last_parent().ok().and_then(list_index_name) {
            return name;
        }
        let name = format!("{}{kind}{}", self.unnamed_prefix, self.unnamed);
        self.unnamed += 1;
        name
    }
}

fn list_index_name(parent: &Node) -> Option<String> {
    let mut name = None;
    parent.apply(&mut FnVisitor::new(
        |list: &ListNode| name = Some(format!("{}[{}]", list.name(), list.len())),
        |_| {},
        |_| {},
    ));
    name
}

fn placeholder_kind(value: &Scalar) -> &'static str {
    match value {
        Scalar::Bool(_) => "Bool",
        Scalar::Null => "Null",
        Scalar::Number(_) => "Number",
        Scalar::Text(_) => "String",
    }
}

/// Maps each [`TreeEvent`] to exactly one [`TreeBuilder`] call.
///
/// Besides the builder's own checks, the assembler enforces the event
/// contract: keys only inside maps, one value per key, and closes that match
/// the container they close. The first error poisons the assembler; every
/// later call fails.
#[derive(Debug)]
pub struct TreeAssembler {
    builder: TreeBuilder,
    namer: NodeNamer,
    poisoned: bool,
}

impl Default for TreeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeAssembler {
    /// An assembler with default [`TreeOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(TreeOptions::default())
    }

    /// An assembler naming and bounding trees according to `options`.
    #[must_use]
    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            builder: TreeBuilder::with_max_depth(options.max_depth),
            namer: NodeNamer::new(&options),
            poisoned: false,
        }
    }

    /// Feeds one event.
    ///
    /// # Errors
    ///
    /// Any [`NodeError`] raised by the builder, plus
    /// [`NodeError::InvalidOperation`] for events that break the nesting
    /// contract or arrive after an earlier failure.
    pub fn push(&mut self, event: TreeEvent) -> Result<()> {
        if self.poisoned {
            return Err(NodeError::InvalidOperation(
                "the tree assembler failed earlier and cannot be resumed".into(),
            ));
        }
        let result = self.apply(event);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Whether an earlier event failed.
    #[cfg(any(test, feature = "fuzzing"))]
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// The builder, for inspecting the partially assembled tree.
    #[must_use]
    pub fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Returns the assembled root.
    ///
    /// # Errors
    ///
    /// [`NodeError::InvalidOperation`] if an earlier event failed, a key is
    /// still waiting for its value, or containers are still open;
    /// [`NodeError::NoSuchElement`] if no event produced a node.
    pub fn finish(self) -> Result<Node> {
        if self.poisoned {
            return Err(NodeError::InvalidOperation(
                "the tree assembler failed earlier and has no tree".into(),
            ));
        }
        if let Some(key) = self.namer.pending_key() {
            return Err(NodeError::InvalidOperation(format!(
                "key {key} never received a value"
            )));
        }
        self.builder.get_root()
    }

    fn apply(&mut self, event: TreeEvent) -> Result<()> {
        trace!(?event, depth = self.builder.depth(), "tree event");
        match event {
            TreeEvent::Key(key) => {
                let inside_map = self
                    .builder
                    .last_parent()
                    .is_ok_and(|parent| parent.kind() == NodeKind::Map);
                if !inside_map {
                    return Err(NodeError::InvalidOperation(format!(
                        "key {key} is only valid directly inside a map"
                    )));
                }
                self.namer.set_key(key)
            }
            TreeEvent::Value(value) => {
                let name = self.namer.next_name(&self.builder, placeholder_kind(&value));
                self.builder.add_child(Node::scalar(name, value))
            }
            TreeEvent::ListStart => {
                let name = self.namer.next_name(&self.builder, "List");
                self.builder.add_child(Node::list(name))
            }
            TreeEvent::MapStart => {
                let name = self.namer.next_name(&self.builder, "Map");
                self.builder.add_child(Node::map(name))
            }
            TreeEvent::ListEnd => self.close(NodeKind::List),
            TreeEvent::MapEnd => self.close(NodeKind::Map),
        }
    }

    fn close(&mut self, kind: NodeKind) -> Result<()> {
        if let Some(key) = self.namer.pending_key() {
            return Err(NodeError::InvalidOperation(format!(
                "{kind} closed while key {key} was waiting for a value"
            )));
        }
        if let Ok(parent) = self.builder.last_parent() {
            if parent.kind() != kind {
                return Err(NodeError::InvalidOperation(format!(
                    "cannot close {} as a {kind}",
                    parent.debug_label()
                )));
            }
        }
        self.builder.close_parent()
    }
}

/// Assembles a whole event sequence into one tree.
///
/// # Errors
///
/// The first error raised by [`TreeAssembler::push`] or
/// [`TreeAssembler::finish`].
pub fn assemble<I>(events: I, options: TreeOptions) -> Result<Node>
where
    I: IntoIterator<Item = TreeEvent>,
{
    let mut assembler = TreeAssembler::with_options(options);
    for event in events {
        assembler.push(event)?;
    }
    assembler.finish()
}

impl TreeEvent {
    /// Shorthand for [`TreeEvent::Key`].
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Shorthand for [`TreeEvent::Value`].
    pub fn value(value: impl Into<Scalar>) -> Self {
        Self::Value(value.into())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use rstest::rstest;

    use super::*;

    fn names(node: &Node) -> Vec<&str> {
        node.children().iter().map(Node::name).collect()
    }

    #[test]
    fn keys_are_consumed_once() {
        let root = assemble(
            [
                TreeEvent::MapStart,
                TreeEvent::key("a"),
                TreeEvent::value(1.0),
                TreeEvent::key("b"),
                TreeEvent::ListStart,
                TreeEvent::value(true),
                TreeEvent::ListEnd,
                TreeEvent::MapEnd,
            ],
            TreeOptions::default(),
        )
        .unwrap();
        assert_eq!(names(&root), ["a", "b"]);
        assert_eq!(names(&root.children()[1]), ["b[0]"]);
    }

    #[test]
    fn nested_lists_index_by_their_own_name() {
        let root = assemble(
            [
                TreeEvent::ListStart,
                TreeEvent::ListStart,
                TreeEvent::value(()),
                TreeEvent::value(()),
                TreeEvent::ListEnd,
                TreeEvent::value("x"),
                TreeEvent::ListEnd,
            ],
            TreeOptions::default(),
        )
        .unwrap();
        assert_eq!(names(&root), ["RootNode[0]", "RootNode[1]"]);
        assert_eq!(names(&root.children()[0]), ["RootNode[0][0]", "RootNode[0][1]"]);
    }

    #[test]
    fn keyless_map_values_get_placeholders() {
        let root = assemble(
            [
                TreeEvent::MapStart,
                TreeEvent::value("s"),
                TreeEvent::MapStart,
                TreeEvent::MapEnd,
                TreeEvent::value(2.0),
                TreeEvent::MapEnd,
            ],
            TreeOptions {
                unnamed_prefix: "Anon".into(),
                ..TreeOptions::default()
            },
        )
        .unwrap();
        assert_eq!(names(&root), ["AnonString0", "AnonMap1", "AnonNumber2"]);
    }

    #[test]
    fn root_name_is_configurable() {
        let root = assemble(
            [TreeEvent::value(1.0)],
            TreeOptions {
                root_name: "doc".into(),
                ..TreeOptions::default()
            },
        )
        .unwrap();
        assert_eq!(root, Node::scalar("doc", 1.0));
    }

    #[rstest]
    #[case::key_outside_map(&[TreeEvent::ListStart, TreeEvent::key("k")])]
    #[case::key_before_root(&[TreeEvent::key("k")])]
    #[case::key_after_key(&[TreeEvent::MapStart, TreeEvent::key("a"), TreeEvent::key("b")])]
    #[case::close_with_pending_key(&[TreeEvent::MapStart, TreeEvent::key("a"), TreeEvent::MapEnd])]
    #[case::list_closed_as_map(&[TreeEvent::ListStart, TreeEvent::MapEnd])]
    #[case::map_closed_as_list(&[TreeEvent::MapStart, TreeEvent::ListEnd])]
    #[case::extra_close(&[TreeEvent::ListStart, TreeEvent::ListEnd, TreeEvent::ListEnd])]
    #[case::second_root(&[TreeEvent::value(1.0), TreeEvent::value(2.0)])]
    fn contract_violations_are_invalid(#[case] events: &[TreeEvent]) {
        let mut assembler = TreeAssembler::new();
        let (last, init) = events.split_last().unwrap();
        for event in init {
            assembler.push(event.clone()).unwrap();
        }
        assert!(assembler.push(last.clone()).unwrap_err().is_invalid_operation());
    }

    #[test]
    fn failure_poisons_the_assembler() {
        let mut assembler = TreeAssembler::new();
        assembler.push(TreeEvent::MapStart).unwrap();
        assembler.push(TreeEvent::key("a")).unwrap();
        assembler.push(TreeEvent::value(1.0)).unwrap();
        assembler.push(TreeEvent::key("a")).unwrap();
        assert!(assembler.push(TreeEvent::value(2.0)).unwrap_err().is_duplicate_key());

        assert!(assembler.is_poisoned());
        // Even a well-formed continuation is refused.
        assert!(assembler.push(TreeEvent::MapEnd).unwrap_err().is_invalid_operation());
        assert!(assembler.finish().unwrap_err().is_invalid_operation());
    }

    #[test]
    fn dangling_key_blocks_finish() {
        let mut assembler = TreeAssembler::new();
        assembler.push(TreeEvent::MapStart).unwrap();
        assembler.push(TreeEvent::key("orphan")).unwrap();
        let err = assembler.finish().unwrap_err();
        assert!(err.is_invalid_operation());
        assert!(err.to_string().contains("orphan never received a value"), "{err}");
    }

    #[test]
    fn unfinished_streams_have_no_root() {
        let mut open = TreeAssembler::new();
        open.push(TreeEvent::MapStart).unwrap();
        assert!(open.finish().unwrap_err().is_invalid_operation());

        assert!(TreeAssembler::new().finish().unwrap_err().is_no_such_element());
    }

    #[test]
    fn depth_limit_applies_to_events() {
        let err = assemble(
            [TreeEvent::ListStart, TreeEvent::ListStart, TreeEvent::ListStart],
            TreeOptions {
                max_depth: Some(2),
                ..TreeOptions::default()
            },
        )
        .unwrap_err();
        assert!(err.is_unsupported_element());
    }

    #[test]
    fn keys_keep_their_exact_text() {
        let root = assemble(
            [
                TreeEvent::MapStart,
                TreeEvent::Key(" spaced key ".to_string()),
                TreeEvent::value(()),
                TreeEvent::MapEnd,
            ],
            TreeOptions::default(),
        )
        .unwrap();
        assert_eq!(names(&root), [" spaced key "]);
    }
}
