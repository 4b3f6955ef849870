use alloc::string::{String, ToString};

/// Name given to the first node of every tree unless configured otherwise.
pub const DEFAULT_ROOT_NAME: &str = "RootNode";

/// Prefix of the placeholder names given to nodes that have no key and no
/// enclosing list.
pub const DEFAULT_UNNAMED_PREFIX: &str = "Unnamed";

/// Configuration for building trees from event streams.
///
/// # Examples
///
/// ```rust
/// use nodetree::{TreeAssembler, TreeOptions};
///
/// let options = TreeOptions {
///     root_name: "document".into(),
///     max_depth: Some(64),
///     ..Default::default()
/// };
/// let assembler = TreeAssembler::with_options(options);
/// ```
///
/// # Default
///
/// Root named [`DEFAULT_ROOT_NAME`], placeholders prefixed with
/// [`DEFAULT_UNNAMED_PREFIX`], no depth limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Name of the first node added, the eventual root.
    ///
    /// # Default
    ///
    /// `"RootNode"`
    pub root_name: String,

    /// Prefix for placeholder names.
    ///
    /// A value that arrives with no pending key and no enclosing list is named
    /// `<prefix><Kind><n>`, e.g. `UnnamedString0`, where `n` counts every
    /// placeholder issued so far in the build.
    ///
    /// # Default
    ///
    /// `"Unnamed"`
    pub unnamed_prefix: String,

    /// Maximum number of containers that may be open at once.
    ///
    /// Opening a container beyond this depth fails with
    /// [`NodeError::UnsupportedElement`](crate::NodeError::UnsupportedElement).
    /// Bounding depth keeps recursive consumers such as
    /// [`descend`](crate::descend) within their stack on hostile input.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub max_depth: Option<usize>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            unnamed_prefix: DEFAULT_UNNAMED_PREFIX.to_string(),
            max_depth: None,
        }
    }
}
