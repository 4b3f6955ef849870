#![allow(missing_docs, unused_macros)]

/// Compares two trees, showing both debug renderings when they differ.
macro_rules! assert_node_eq {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (&nodetree::Node, &nodetree::Node) = (&$left, &$right);
        assert!(
            left == right,
            "trees differ\n--- left ---\n{}--- right ---\n{}",
            nodetree::render_debug(left),
            nodetree::render_debug(right),
        );
    }};
}

pub(crate) use assert_node_eq;
