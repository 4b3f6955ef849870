#![allow(missing_docs)]

mod common;

use common::assert_node_eq;
use nodetree::{
    MapNode, Node, NodeKind, TreeAssembler, TreeEvent, TreeOptions, assemble, render_debug,
};

fn person_events() -> Vec<TreeEvent> {
    vec![
        TreeEvent::MapStart,
        TreeEvent::key("name"),
        TreeEvent::value("John"),
        TreeEvent::key("age"),
        TreeEvent::value(7.0),
        TreeEvent::key("alive"),
        TreeEvent::value(true),
        TreeEvent::MapEnd,
    ]
}

#[test]
fn keyed_values_build_a_named_map() {
    let root = assemble(person_events(), TreeOptions::default()).unwrap();

    let mut expected = MapNode::new("RootNode");
    expected.add_child(Node::scalar("name", "John")).unwrap();
    expected.add_child(Node::scalar("age", 7.0)).unwrap();
    expected.add_child(Node::scalar("alive", true)).unwrap();
    assert_node_eq!(root, Node::from(expected));

    insta::assert_snapshot!(render_debug(&root), @r"
    map{RootNode}
      scalar<string>{name}
      scalar<number>{age}
      scalar<bool>{alive}
    ");
}

#[test]
fn list_elements_are_named_by_index() {
    let root = assemble(
        [
            TreeEvent::ListStart,
            TreeEvent::value(1.2),
            TreeEvent::value(3.4),
            TreeEvent::value(28.0),
            TreeEvent::ListEnd,
        ],
        TreeOptions::default(),
    )
    .unwrap();

    let names: Vec<&str> = root.children().iter().map(Node::name).collect();
    assert_eq!(names, ["RootNode[0]", "RootNode[1]", "RootNode[2]"]);
    assert_eq!(root.kind(), NodeKind::List);
}

#[test]
fn assembler_reports_progress_through_its_builder() {
    let mut assembler = TreeAssembler::new();
    let mut depths = Vec::new();
    for event in person_events() {
        assembler.push(event).unwrap();
        depths.push(assembler.builder().depth());
    }
    assert_eq!(depths, [1, 1, 1, 1, 1, 1, 1, 0]);
    assert!(assembler.builder().is_complete());
    assert_eq!(assembler.finish().unwrap().children().len(), 3);
}

#[test]
fn nested_containers_close_in_order() {
    let events = [
        TreeEvent::MapStart,
        TreeEvent::key("rows"),
        TreeEvent::ListStart,
        TreeEvent::MapStart,
        TreeEvent::key("id"),
        TreeEvent::value(1.0),
        TreeEvent::MapEnd,
        TreeEvent::ListStart,
        TreeEvent::ListEnd,
        TreeEvent::ListEnd,
        TreeEvent::key("done"),
        TreeEvent::value(()),
        TreeEvent::MapEnd,
    ];
    let root = assemble(events, TreeOptions::default()).unwrap();

    insta::assert_snapshot!(root.to_string(), @r"
    map{RootNode}
      list{rows}
        map{rows[0]}
          scalar<number>{id}
        list{rows[1]}
      scalar<null>{done}
    ");
}

#[test]
fn custom_root_name_and_placeholders() {
    let options = TreeOptions {
        root_name: "doc".into(),
        unnamed_prefix: "Anon".into(),
        ..TreeOptions::default()
    };
    let root = assemble(
        [
            TreeEvent::MapStart,
            TreeEvent::value("loose"),
            TreeEvent::MapEnd,
        ],
        options,
    )
    .unwrap();

    assert_eq!(root.name(), "doc");
    assert_eq!(root.children()[0].name(), "AnonString0");
}

#[test]
fn unbalanced_streams_are_rejected() {
    let mut events = person_events();
    events.pop();
    let err = assemble(events, TreeOptions::default()).unwrap_err();
    assert!(err.is_invalid_operation(), "{err}");

    let mut events = person_events();
    events.push(TreeEvent::MapEnd);
    let err = assemble(events, TreeOptions::default()).unwrap_err();
    assert!(err.is_invalid_operation(), "{err}");

    let err = assemble(Vec::new(), TreeOptions::default()).unwrap_err();
    assert!(err.is_no_such_element(), "{err}");
}
