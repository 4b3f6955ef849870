//! A generic tree document model for JSON-shaped data.
//!
//! A tree is made of named [`Node`]s of three kinds: scalars holding one
//! [`Scalar`] value, ordered lists, and maps with unique child names. Trees
//! are rebuilt from flat, nested [`TreeEvent`] streams by a [`TreeAssembler`],
//! which names nodes and drives a stack-based [`TreeBuilder`]. Consumers
//! inspect finished trees through [`Visitor`] double dispatch or a
//! depth-aware [`Descender`].
//!
//! With the `json` feature, [`json::parse`] builds a tree from JSON text:
//!
//! ```
//! # #[cfg(feature = "json")] {
//! use nodetree::{json, render_debug};
//!
//! let root = json::parse(r#"{"name": "John", "age": 7, "alive": true}"#).unwrap();
//! assert_eq!(
//!     render_debug(&root),
//!     "map{RootNode}\n  scalar<string>{name}\n  scalar<number>{age}\n  scalar<bool>{alive}\n"
//! );
//! # }
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod descender;
mod error;
mod event;
mod node;
mod options;
mod render;
mod visitor;

#[cfg(feature = "json")]
pub mod json;

#[cfg(test)]
mod tests;

pub use builder::TreeBuilder;
pub use descender::{Descender, descend, descend_iterative};
pub use error::{NodeError, Result};
pub use event::{NodeNamer, TreeAssembler, TreeEvent, assemble};
pub use node::{ListNode, MapNode, Node, NodeKind, Scalar, ScalarNode};
pub use options::{DEFAULT_ROOT_NAME, DEFAULT_UNNAMED_PREFIX, TreeOptions};
pub use render::{DebugRenderer, render_debug};
pub use visitor::{FnVisitor, FnVisitorMut, Visitor, VisitorMut};
