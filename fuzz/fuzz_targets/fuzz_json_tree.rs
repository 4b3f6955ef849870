#![no_main]

use libfuzzer_sys::fuzz_target;
use nodetree::{TreeOptions, json, render_debug};

/// Number of nodes plus the line breaks hidden inside their names.
fn line_breaks(node: &nodetree::Node) -> usize {
    1 + node.name().matches('\n').count()
        + node.children().iter().map(line_breaks).sum::<usize>()
}

fn json_tree(data: &[u8]) {
    let Some((&limit, text)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(text) else {
        return;
    };

    // The first byte picks a depth bound, zero meaning unbounded.
    let options = TreeOptions {
        max_depth: (limit != 0).then_some(usize::from(limit)),
        ..TreeOptions::default()
    };
    let Ok(root) = json::parse_with_options(text, options) else {
        return;
    };

    assert_eq!(render_debug(&root).matches('\n').count(), line_breaks(&root));

    let serialized = json::to_string(&root).expect("parsed trees serialize");
    serde_json::from_str::<serde_json::Value>(&serialized).expect("serialized trees are JSON");
    let reparsed = json::parse(&serialized).expect("serialized trees parse again");
    assert_eq!(reparsed.kind(), root.kind());
    assert_eq!(reparsed.children().len(), root.children().len());
}

fuzz_target!(|data: &[u8]| json_tree(data));
