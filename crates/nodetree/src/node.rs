//! The node hierarchy: one scalar kind and two composite kinds.
//!
//! A tree is a [`Node`] that exclusively owns its children. Names are fixed
//! at construction. Composites only grow through their own `add_child`, which
//! is how [`TreeBuilder`](crate::TreeBuilder) assembles them; once a tree is
//! built, consumers only read it.
//!
//! # Examples
//!
//! ```
//! use nodetree::{MapNode, Node};
//!
//! let mut person = MapNode::new("RootNode");
//! person.add_child(Node::scalar("name", "John")).unwrap();
//! person.add_child(Node::scalar("age", 7.0)).unwrap();
//! assert!(person.add_child(Node::scalar("age", 8.0)).is_err());
//!
//! assert_eq!(person.get_child("age").unwrap().name(), "age");
//! ```
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use crate::{
    error::{NodeError, Result},
    visitor::{Visitor, VisitorMut},
};

/// The closed set of values a scalar node can hold.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// `true` or `false`.
    Bool(bool),
    /// The absent value.
    Null,
    /// Every number, integral or not, is held as a double.
    Number(f64),
    /// A string, stored unescaped.
    Text(String),
}

impl Scalar {
    /// Short name of the held value type, used in debug labels.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }
}

// NaN compares equal to itself so that structural equality stays reflexive.
impl PartialEq for Scalar {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl fmt::Display for Scalar {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Self::Null => f.write_str("null"),
            // Whole numbers drop the decimal point entirely.
            Self::Number(n) if *n % 1.0 == 0.0 => write!(f, "{n:.0}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<()> for Scalar {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Tag identifying the concrete kind of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A [`ScalarNode`].
    Scalar,
    /// A [`ListNode`].
    List,
    /// A [`MapNode`].
    Map,
}

impl NodeKind {
    /// Stable tag string for the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    /// Whether nodes of this kind may own children.
    #[must_use]
    pub fn is_composite(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A leaf holding exactly one [`Scalar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    name: String,
    value: Scalar,
}

impl ScalarNode {
    /// Creates a scalar called `name` holding `value`.
    pub fn new(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The held value.
    #[must_use]
    pub fn value(&self) -> &Scalar {
        &self.value
    }

    /// Canonical text of the held value. Text is returned verbatim, without
    /// quoting or escaping.
    #[must_use]
    pub fn render(&self) -> String {
        self.value.to_string()
    }

    /// `scalar<type>{name}`, e.g. `scalar<number>{age}`.
    #[must_use]
    pub fn debug_label(&self) -> String {
        format!("scalar<{}>{{{}}}", self.value.type_name(), self.name)
    }
}

/// An ordered composite. Child names are informational and may repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    name: String,
    children: Vec<Node>,
}

impl ListNode {
    /// Creates an empty list called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// The name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `list{name}`.
    #[must_use]
    pub fn debug_label(&self) -> String {
        format!("list{{{}}}", self.name)
    }

    /// Appends `child`; its index is the current length.
    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Returns the child at `index`.
    ///
    /// # Errors
    ///
    /// [`NodeError::NoSuchElement`] if `index` is not below [`len`](Self::len).
    pub fn get_child(&self, index: usize) -> Result<&Node> {
        self.children.get(index).ok_or_else(|| {
            NodeError::NoSuchElement(format!(
                "list {} does not contain an element at index {index}",
                self.name
            ))
        })
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the list has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Gives up ownership of the children, in insertion order.
    #[must_use]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }
}

/// A keyed composite. Children keep insertion order and have unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapNode {
    name: String,
    children: Vec<Node>,
}

impl MapNode {
    /// Creates an empty map called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// The name given at construction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `map{name}`.
    #[must_use]
    pub fn debug_label(&self) -> String {
        format!("map{{{}}}", self.name)
    }

    /// Appends `child` unless a child with the same name is already present.
    ///
    /// # Errors
    ///
    /// [`NodeError::DuplicateKey`] if the name is taken. The map is left
    /// untouched in that case.
    pub fn add_child(&mut self, child: impl Into<Node>) -> Result<()> {
        let child = child.into();
        if self.contains(child.name()) {
            return Err(NodeError::DuplicateKey {
                parent: self.name.clone(),
                key: child.name().to_string(),
            });
        }
        self.children.push(child);
        Ok(())
    }

    /// Returns the child called `name`.
    ///
    /// # Errors
    ///
    /// [`NodeError::NoSuchElement`] if no child has that name.
    pub fn get_child(&self, name: &str) -> Result<&Node> {
        self.children
            .iter()
            .find(|child| child.name() == name)
            .ok_or_else(|| {
                NodeError::NoSuchElement(format!(
                    "map {} does not contain an element with name {name}",
                    self.name
                ))
            })
    }

    /// Whether a child called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|child| child.name() == name)
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the map has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Gives up ownership of the children, in insertion order.
    #[must_use]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }
}

/// One element of a tree.
///
/// Equality is structural: kinds and names must match, scalars must hold
/// equal values, and composites must hold equal children in the same order.
/// A list and a map never compare equal, whatever their contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf.
    Scalar(ScalarNode),
    /// An ordered composite.
    List(ListNode),
    /// A keyed composite.
    Map(MapNode),
}

impl Node {
    /// Creates a named scalar.
    pub fn scalar(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::Scalar(ScalarNode::new(name, value))
    }

    /// Creates an empty named list.
    pub fn list(name: impl Into<String>) -> Self {
        Self::List(ListNode::new(name))
    }

    /// Creates an empty named map.
    pub fn map(name: impl Into<String>) -> Self {
        Self::Map(MapNode::new(name))
    }

    /// The node's name, whatever its kind.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(n) => n.name(),
            Self::List(n) => n.name(),
            Self::Map(n) => n.name(),
        }
    }

    /// Which of the three kinds this node is.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Scalar(_) => NodeKind::Scalar,
            Self::List(_) => NodeKind::List,
            Self::Map(_) => NodeKind::Map,
        }
    }

    /// Label combining kind and name, e.g. `map{RootNode}` or
    /// `scalar<number>{age}`.
    #[must_use]
    pub fn debug_label(&self) -> String {
        match self {
            Self::Scalar(n) => n.debug_label(),
            Self::List(n) => n.debug_label(),
            Self::Map(n) => n.debug_label(),
        }
    }

    /// Children in insertion order; always empty for scalars.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Scalar(_) => &[],
            Self::List(n) => n.children(),
            Self::Map(n) => n.children(),
        }
    }

    /// Calls the `visitor` callback matching this node's kind.
    pub fn apply<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Scalar(n) => visitor.visit_scalar(n),
            Self::List(n) => visitor.visit_list(n),
            Self::Map(n) => visitor.visit_map(n),
        }
    }

    /// Mutable counterpart of [`apply`](Self::apply).
    pub fn apply_mut<V: VisitorMut + ?Sized>(&mut self, visitor: &mut V) {
        match self {
            Self::Scalar(n) => visitor.visit_scalar(n),
            Self::List(n) => visitor.visit_list(n),
            Self::Map(n) => visitor.visit_map(n),
        }
    }

    /// The scalar, if this node is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            Self::Scalar(n) => Some(n),
            _ => None,
        }
    }

    /// The list, if this node is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            Self::List(n) => Some(n),
            _ => None,
        }
    }

    /// The map, if this node is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&MapNode> {
        match self {
            Self::Map(n) => Some(n),
            _ => None,
        }
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        match self {
            Self::Scalar(_) => None,
            Self::List(n) => n.child_mut(index),
            Self::Map(n) => n.child_mut(index),
        }
    }
}

impl From<ScalarNode> for Node {
    fn from(n: ScalarNode) -> Self {
        Self::Scalar(n)
    }
}

impl From<ListNode> for Node {
    fn from(n: ListNode) -> Self {
        Self::List(n)
    }
}

impl From<MapNode> for Node {
    fn from(n: MapNode) -> Self {
        Self::Map(n)
    }
}
