#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nodetree::{Scalar, TreeAssembler, TreeEvent, descend, descend_iterative, render_debug};

#[derive(Debug, Arbitrary)]
enum Event {
    ListStart,
    ListEnd,
    MapStart,
    MapEnd,
    Key(String),
    Bool(bool),
    Null,
    Number(f64),
    Text(String),
}

impl From<Event> for TreeEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::ListStart => TreeEvent::ListStart,
            Event::ListEnd => TreeEvent::ListEnd,
            Event::MapStart => TreeEvent::MapStart,
            Event::MapEnd => TreeEvent::MapEnd,
            Event::Key(key) => TreeEvent::Key(key),
            Event::Bool(b) => TreeEvent::Value(Scalar::Bool(b)),
            Event::Null => TreeEvent::Value(Scalar::Null),
            Event::Number(n) => TreeEvent::Value(Scalar::Number(n)),
            Event::Text(s) => TreeEvent::Value(Scalar::Text(s)),
        }
    }
}

#[derive(Default)]
struct Depths(Vec<usize>);

fn line_breaks(node: &nodetree::Node) -> usize {
    1 + node.name().matches('\n').count()
        + node.children().iter().map(line_breaks).sum::<usize>()
}

impl nodetree::Descender for Depths {
    fn on_enter_list(&mut self, _: &nodetree::ListNode, depth: usize) {
        self.0.push(depth);
    }
    fn on_enter_scalar(&mut self, _: &nodetree::ScalarNode, depth: usize) {
        self.0.push(depth);
    }
    fn on_enter_map(&mut self, _: &nodetree::MapNode, depth: usize) {
        self.0.push(depth);
    }
}

fn events(events: Vec<Event>) {
    let mut assembler = TreeAssembler::new();
    for event in events {
        if assembler.push(event.into()).is_err() {
            // A poisoned assembler refuses everything afterwards.
            assert!(assembler.is_poisoned());
            assert!(assembler.push(TreeEvent::ListStart).is_err());
            return;
        }
    }
    let Ok(root) = assembler.finish() else {
        return;
    };

    let mut recursive = Depths::default();
    let mut iterative = Depths::default();
    descend(&root, &mut recursive);
    descend_iterative(&root, &mut iterative);
    assert_eq!(recursive.0, iterative.0);
    assert_eq!(render_debug(&root).matches('\n').count(), line_breaks(&root));
}

fuzz_target!(|input: Vec<Event>| events(input));
