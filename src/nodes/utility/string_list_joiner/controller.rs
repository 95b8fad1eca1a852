//! Variadic input controller for joiner nodes
//!
//! Keeps a joiner's inputs named `prefix1 … prefixN` with exactly one
//! unconnected slot at the end, growing and shrinking as links change.

use crate::nodes::hooks::{ConnectionChange, NodeHooks, SlotSide};
use crate::nodes::port::Port;
use crate::nodes::{DataType, Node};
use log::debug;

/// Node hooks maintaining contiguous, self-extending inputs
#[derive(Debug, Clone)]
pub struct VariadicInputController {
    prefix: String,
    min_inputs: usize,
}

impl VariadicInputController {
    /// Controller for inputs named `{prefix}1`, `{prefix}2`, ...
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            min_inputs: 1,
        }
    }

    /// Never drop below `min_inputs` slots (clamped to at least one)
    pub fn with_min_inputs(mut self, min_inputs: usize) -> Self {
        self.min_inputs = min_inputs.max(1);
        self
    }

    /// Appends a fresh slot if the last one is taken
    fn ensure_trailing_slot(&self, node: &mut Node) {
        let needs_slot = node.inputs.last().map_or(true, Port::is_connected);
        if needs_slot {
            let data_type = node
                .outputs
                .first()
                .map(|output| output.data_type)
                .unwrap_or(DataType::Any);
            let name = format!("{}{}", self.prefix, node.inputs.len() + 1);
            debug!("Node {} grows input {}", node.id, name);
            node.add_input(name, data_type);
        }
    }
}

impl NodeHooks for VariadicInputController {
    fn on_node_created(&self, node: &mut Node) {
        // Shadow widgets carry the factory's input names, so match them first
        remove_shadow_widgets(node);
        renumber_inputs(&mut node.inputs, &self.prefix);
        self.ensure_trailing_slot(node);
    }

    fn on_connections_change(&self, node: &mut Node, change: &ConnectionChange) {
        if change.link.is_none() || change.side != SlotSide::Input {
            return;
        }

        if !change.connected && node.inputs.len() > self.min_inputs {
            if change.origin.is_user_action() {
                match node.remove_input(change.slot) {
                    Some(removed) => debug!("Node {} drops input {}", node.id, removed.name),
                    None => debug!("Node {} has no input {} to drop", node.id, change.slot),
                }
            } else {
                debug!(
                    "Node {} keeps input {} during {:?}",
                    node.id, change.slot, change.origin
                );
            }
        }

        renumber_inputs(&mut node.inputs, &self.prefix);
        self.ensure_trailing_slot(node);
    }
}

/// Renames the i-th input (1-based) to `{prefix}{i}`
pub fn renumber_inputs(inputs: &mut [Port], prefix: &str) {
    for (index, input) in inputs.iter_mut().enumerate() {
        input.name = format!("{}{}", prefix, index + 1);
    }
}

/// Drops widgets that share a name with one of the node's inputs
pub fn remove_shadow_widgets(node: &mut Node) {
    let Node { inputs, widgets, .. } = node;
    widgets.retain(|widget| !inputs.iter().any(|input| input.name == widget.name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::graph::Link;
    use crate::nodes::hooks::ConnectionOrigin;
    use crate::nodes::port::PortType;
    use crate::nodes::widget::{Widget, WidgetKind};

    fn joiner() -> Node {
        let mut node = Node::new(1, "StringListJoiner");
        node.add_input("arg1", DataType::String)
            .add_output("STRING", DataType::String);
        node
    }

    fn link(to_port: usize) -> Link {
        Link {
            id: 10 + to_port,
            from_node: 2,
            from_port: 0,
            to_node: 1,
            to_port,
            data_type: DataType::String,
        }
    }

    /// Simulates the host attaching a link and then raising the callback
    fn attach(controller: &VariadicInputController, node: &mut Node, slot: usize) {
        let link = link(slot);
        node.inputs[slot].link = Some(link.id);
        let change = ConnectionChange::input_connected(slot, link, ConnectionOrigin::UserAction);
        controller.on_connections_change(node, &change);
    }

    fn detach(
        controller: &VariadicInputController,
        node: &mut Node,
        slot: usize,
        origin: ConnectionOrigin,
    ) {
        node.inputs[slot].link = None;
        let change = ConnectionChange::input_disconnected(slot, link(slot), origin);
        controller.on_connections_change(node, &change);
    }

    #[test]
    fn test_connecting_last_slot_appends_slot() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();

        attach(&controller, &mut node, 0);

        assert_eq!(node.input_names(), vec!["arg1", "arg2"]);
        assert!(!node.inputs[1].is_connected());
        assert_eq!(node.inputs[1].data_type, DataType::String);
        assert_eq!(node.inputs[1].port_type, PortType::Input);
    }

    #[test]
    fn test_removing_middle_slot_renumbers() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        attach(&controller, &mut node, 0);
        attach(&controller, &mut node, 1);
        attach(&controller, &mut node, 2);
        assert_eq!(node.input_names(), vec!["arg1", "arg2", "arg3", "arg4"]);

        detach(&controller, &mut node, 1, ConnectionOrigin::UserAction);

        assert_eq!(node.input_names(), vec!["arg1", "arg2", "arg3"]);
        assert_eq!(node.input_index("arg2"), Some(1));
        assert_eq!(node.inputs[1].link, Some(12));
        assert!(!node.inputs[2].is_connected());
    }

    #[test]
    fn test_single_slot_never_removed() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        node.inputs[0].name = "stale".to_string();

        detach(&controller, &mut node, 0, ConnectionOrigin::UserAction);

        assert_eq!(node.input_names(), vec!["arg1"]);
    }

    #[test]
    fn test_rewire_and_load_keep_slots() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        attach(&controller, &mut node, 0);
        attach(&controller, &mut node, 1);

        detach(&controller, &mut node, 0, ConnectionOrigin::ProgrammaticRewire);
        assert_eq!(node.input_names(), vec!["arg1", "arg2", "arg3"]);

        detach(&controller, &mut node, 1, ConnectionOrigin::GraphLoad);
        assert_eq!(node.input_names(), vec!["arg1", "arg2", "arg3"]);
    }

    #[test]
    fn test_notification_without_link_is_ignored() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        node.inputs[0].link = Some(4);
        node.inputs[0].name = "odd".to_string();
        let before = node.clone();

        let change = ConnectionChange {
            side: SlotSide::Input,
            slot: 0,
            connected: true,
            link: None,
            origin: ConnectionOrigin::UserAction,
        };
        controller.on_connections_change(&mut node, &change);

        assert_eq!(node, before);
    }

    #[test]
    fn test_output_side_changes_are_ignored() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        attach(&controller, &mut node, 0);
        let before = node.clone();

        let change = ConnectionChange {
            side: SlotSide::Output,
            slot: 0,
            connected: false,
            link: Some(link(0)),
            origin: ConnectionOrigin::UserAction,
        };
        controller.on_connections_change(&mut node, &change);

        assert_eq!(node, before);
    }

    #[test]
    fn test_out_of_range_slot_is_silent() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        attach(&controller, &mut node, 0);

        let change = ConnectionChange::input_disconnected(9, link(9), ConnectionOrigin::UserAction);
        controller.on_connections_change(&mut node, &change);

        assert_eq!(node.input_names(), vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_min_inputs_floor() {
        let controller = VariadicInputController::new("arg").with_min_inputs(2);
        let mut node = joiner();
        node.add_input("arg2", DataType::String);
        attach(&controller, &mut node, 0);

        detach(&controller, &mut node, 0, ConnectionOrigin::UserAction);

        assert_eq!(node.input_names(), vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_renumber_is_idempotent() {
        let mut inputs = vec![
            Port::new("arg3", PortType::Input, DataType::String),
            Port::new("arg1", PortType::Input, DataType::String),
            Port::new("x", PortType::Input, DataType::String),
        ];

        renumber_inputs(&mut inputs, "arg");
        let once = inputs.clone();
        renumber_inputs(&mut inputs, "arg");

        assert_eq!(inputs, once);
        let names: Vec<_> = inputs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["arg1", "arg2", "arg3"]);
    }

    #[test]
    fn test_shadow_widgets_removed_on_creation() {
        let controller = VariadicInputController::new("arg");
        let mut node = joiner();
        node.add_widget(Widget::new("arg1", WidgetKind::Text, ""))
            .add_widget(Widget::new("extra", WidgetKind::Text, ""));

        controller.on_node_created(&mut node);

        let names: Vec<_> = node.widgets.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["extra"]);
    }

    #[test]
    fn test_creation_applies_custom_prefix() {
        let controller = VariadicInputController::new("in");
        let mut node = joiner();
        node.add_widget(Widget::new("arg1", WidgetKind::Text, ""));

        controller.on_node_created(&mut node);

        assert_eq!(node.input_names(), vec!["in1"]);
        assert!(node.widgets.is_empty());
    }

    #[test]
    fn test_creation_without_inputs_adds_first_slot() {
        let controller = VariadicInputController::new("arg");
        let mut node = Node::new(5, "StringListJoiner");
        node.add_output("STRING", DataType::String);

        controller.on_node_created(&mut node);

        assert_eq!(node.input_names(), vec!["arg1"]);
        assert_eq!(node.inputs[0].data_type, DataType::String);
    }

    #[test]
    fn test_trailing_slot_falls_back_to_any() {
        let controller = VariadicInputController::new("in");
        let mut node = Node::new(3, "Bare");
        node.add_input("in1", DataType::Any);
        node.inputs[0].link = Some(1);

        let change = ConnectionChange::input_connected(0, link(0), ConnectionOrigin::UserAction);
        controller.on_connections_change(&mut node, &change);

        assert_eq!(node.input_names(), vec!["in1", "in2"]);
        assert_eq!(node.inputs[1].data_type, DataType::Any);
    }
}
