use alloc::string::String;

/// Errors raised while building or querying a node tree.
///
/// Every variant is final at the point it is raised: a builder or assembler
/// that returned one of these must be discarded rather than resumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    /// A map already holds a child with this name.
    #[error("unable to add {key} to {parent}: an element with that name already exists")]
    DuplicateKey {
        /// Name of the map that refused the child.
        parent: String,
        /// The name that was already taken.
        key: String,
    },

    /// The operation is not valid for the node or builder state, e.g. adding
    /// a child to a scalar or closing a container when none is open.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An index, name, or open container that does not exist was requested.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// The event source produced something the tree cannot represent, such
    /// as a binary payload or a syntax error in the source text.
    #[error("unsupported element: {0}")]
    UnsupportedElement(String),
}

impl NodeError {
    /// A stable tag naming the error variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::InvalidOperation(_) => "invalid_operation",
            Self::NoSuchElement(_) => "no_such_element",
            Self::UnsupportedElement(_) => "unsupported_element",
        }
    }

    /// Whether this is [`NodeError::DuplicateKey`].
    #[must_use]
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    /// Whether this is [`NodeError::InvalidOperation`].
    #[must_use]
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation(_))
    }

    /// Whether this is [`NodeError::NoSuchElement`].
    #[must_use]
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement(_))
    }

    /// Whether this is [`NodeError::UnsupportedElement`].
    #[must_use]
    pub fn is_unsupported_element(&self) -> bool {
        matches!(self, Self::UnsupportedElement(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, NodeError>;
