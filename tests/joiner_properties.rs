//! Invariants of the joiner's variadic inputs under arbitrary user edits

use proptest::prelude::*;
use vibe_nodes::nodes::{ConnectionOrigin, GraphSnapshot, NodeGraph, NodeId, NodeRegistry};
use vibe_nodes::{BackendClient, BackendRequest, ExtensionConfig, VibeExtension};
use std::rc::Rc;

struct NullBackend;

impl BackendClient for NullBackend {
    fn send(&self, _request: BackendRequest) {}
}

fn setup() -> (NodeGraph, NodeId, NodeId) {
    let extension = VibeExtension::new(ExtensionConfig::default(), Rc::new(NullBackend));
    let mut registry = NodeRegistry::new();
    extension.register(&mut registry);
    let mut graph = NodeGraph::new(registry);
    let source = graph.create_node("StringPrimitive").unwrap();
    let joiner = graph.create_node("StringListJoiner").unwrap();
    (graph, source, joiner)
}

fn names(graph: &NodeGraph, joiner: NodeId) -> Vec<String> {
    graph.node(joiner).unwrap().inputs.iter().map(|p| p.name.clone()).collect()
}

fn expected_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("arg{}", i)).collect()
}

fn connected_slots(graph: &NodeGraph, joiner: NodeId) -> Vec<usize> {
    graph
        .node(joiner)
        .unwrap()
        .inputs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_connected())
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Connect { slot: usize, source: usize },
    Disconnect(usize),
    /// Delete one of the string sources and add a fresh one in its place
    ReplaceSource(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..16, 0usize..3).prop_map(|(slot, source)| Op::Connect { slot, source }),
        (0usize..16).prop_map(Op::Disconnect),
        (0usize..3).prop_map(Op::ReplaceSource),
    ]
}

proptest! {
    #[test]
    fn joiner_inputs_stay_contiguous_with_one_free_slot(ops in prop::collection::vec(op(), 0..40)) {
        let (mut graph, source, joiner) = setup();
        let mut sources = vec![source];
        for _ in 1..3 {
            sources.push(graph.create_node("StringPrimitive").unwrap());
        }

        for op in ops {
            match op {
                Op::Connect { slot, source } => {
                    let slot = slot % graph.node(joiner).unwrap().inputs.len();
                    graph.connect(sources[source], 0, joiner, slot, ConnectionOrigin::UserAction).unwrap();
                }
                Op::Disconnect(choice) => {
                    let connected = connected_slots(&graph, joiner);
                    if !connected.is_empty() {
                        let slot = connected[choice % connected.len()];
                        graph.disconnect_input(joiner, slot, ConnectionOrigin::UserAction);
                    }
                }
                Op::ReplaceSource(index) => {
                    graph.remove_node(sources[index]);
                    sources[index] = graph.create_node("StringPrimitive").unwrap();
                }
            }

            let node = graph.node(joiner).unwrap();
            let count = node.inputs.len();
            prop_assert!(count >= 1);
            prop_assert_eq!(names(&graph, joiner), expected_names(count));
            prop_assert!(!node.inputs[count - 1].is_connected());
            prop_assert_eq!(connected_slots(&graph, joiner).len() + 1, count);

            // Every link still points at the slot that holds it
            for link in graph.input_links(joiner) {
                prop_assert_eq!(node.inputs[link.to_port].link, Some(link.id));
            }
        }
    }
}

#[test]
fn disconnecting_only_slot_keeps_one_slot() {
    let (mut graph, source, joiner) = setup();
    graph.connect(source, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();
    graph.disconnect_input(joiner, 1, ConnectionOrigin::UserAction);
    assert_eq!(names(&graph, joiner), expected_names(2));

    graph.disconnect_input(joiner, 0, ConnectionOrigin::UserAction);

    assert_eq!(names(&graph, joiner), expected_names(1));
    assert!(connected_slots(&graph, joiner).is_empty());
}

#[test]
fn connect_then_disconnect_round_trip() {
    let (mut graph, source, joiner) = setup();
    graph.connect(source, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();
    graph.connect(source, 0, joiner, 1, ConnectionOrigin::UserAction).unwrap();
    let before_names = names(&graph, joiner);
    let before_connected = connected_slots(&graph, joiner);

    graph.connect(source, 0, joiner, 2, ConnectionOrigin::UserAction).unwrap();
    assert_eq!(names(&graph, joiner), expected_names(4));
    graph.disconnect_input(joiner, 2, ConnectionOrigin::UserAction);

    assert_eq!(names(&graph, joiner), before_names);
    assert_eq!(connected_slots(&graph, joiner), before_connected);
}

#[test]
fn removing_middle_slot_shifts_links() {
    let (mut graph, source, joiner) = setup();
    let first = graph.connect(source, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();
    graph.connect(source, 0, joiner, 1, ConnectionOrigin::UserAction).unwrap();
    let third = graph.connect(source, 0, joiner, 2, ConnectionOrigin::UserAction).unwrap();

    graph.disconnect_input(joiner, 1, ConnectionOrigin::UserAction);

    assert_eq!(names(&graph, joiner), expected_names(3));
    assert_eq!(graph.link(first).unwrap().to_port, 0);
    assert_eq!(graph.link(third).unwrap().to_port, 1);
    assert_eq!(graph.node(joiner).unwrap().inputs[1].link, Some(third));
}

#[test]
fn replacing_a_link_keeps_slot_count() {
    let (mut graph, source, joiner) = setup();
    let other = graph.create_node("StringPrimitive").unwrap();
    graph.connect(source, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();

    // Dropping a new link onto an occupied slot rewires it in place
    graph.connect(other, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();

    assert_eq!(names(&graph, joiner), expected_names(2));
    assert_eq!(graph.input_links(joiner)[0].from_node, other);
}

#[test]
fn graph_load_never_removes_slots() {
    let (mut graph, source, joiner) = setup();
    for slot in 0..3 {
        graph.connect(source, 0, joiner, slot, ConnectionOrigin::GraphLoad).unwrap();
    }
    assert_eq!(names(&graph, joiner), expected_names(4));

    graph.disconnect_input(joiner, 0, ConnectionOrigin::GraphLoad);
    graph.disconnect_input(joiner, 1, ConnectionOrigin::ProgrammaticRewire);

    assert_eq!(names(&graph, joiner), expected_names(4));
    assert_eq!(connected_slots(&graph, joiner), vec![2]);
}

#[test]
fn removing_source_node_drops_its_joiner_slots() {
    let (mut graph, source, joiner) = setup();
    graph.connect(source, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();
    graph.connect(source, 0, joiner, 1, ConnectionOrigin::UserAction).unwrap();

    graph.remove_node(source);

    assert_eq!(names(&graph, joiner), expected_names(1));
    assert!(graph.input_links(joiner).is_empty());
}

#[test]
fn removing_one_of_two_sources_keeps_the_other_link() {
    let (mut graph, first, joiner) = setup();
    let second = graph.create_node("StringPrimitive").unwrap();
    graph.connect(first, 0, joiner, 0, ConnectionOrigin::UserAction).unwrap();
    let kept = graph.connect(second, 0, joiner, 1, ConnectionOrigin::UserAction).unwrap();

    graph.remove_node(first);

    assert_eq!(names(&graph, joiner), expected_names(2));
    assert_eq!(connected_slots(&graph, joiner), vec![0]);
    assert_eq!(graph.link(kept).unwrap().to_port, 0);
}

#[test]
fn restoring_saved_graph_keeps_joiner_layout() {
    let (mut graph, source, joiner) = setup();
    for slot in 0..3 {
        graph.connect(source, 0, joiner, slot, ConnectionOrigin::UserAction).unwrap();
    }
    let saved = serde_json::to_string(&graph.snapshot()).unwrap();

    let (mut restored, _, _) = setup();
    let snapshot: GraphSnapshot = serde_json::from_str(&saved).unwrap();
    restored.restore(snapshot).unwrap();

    assert_eq!(names(&restored, joiner), expected_names(4));
    assert_eq!(connected_slots(&restored, joiner), vec![0, 1, 2]);
    assert_eq!(restored.input_links(joiner).len(), 3);
    assert!(restored.node(joiner).unwrap().widgets.is_empty());
}
