//! Node types and core node functionality

use super::factory::DataType;
use super::port::{Port, PortType};
use super::widget::Widget;
use crate::backend::BackendClient;
use serde::{Deserialize, Serialize, Serializer};

/// Unique identifier for a node
pub type NodeId = usize;

/// Core node structure held by the host graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Registered type name, used to look up the node's hooks
    pub node_type: String,
    pub title: String,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    /// Widgets with `serialize == false` are left out of the saved form
    #[serde(serialize_with = "persistent_widgets")]
    pub widgets: Vec<Widget>,
}

fn persistent_widgets<S: Serializer>(widgets: &[Widget], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(widgets.iter().filter(|widget| widget.serialize))
}

impl Node {
    /// Creates a new node without ports or widgets
    pub fn new(id: NodeId, node_type: impl Into<String>) -> Self {
        let node_type = node_type.into();
        Self {
            id,
            title: node_type.clone(),
            node_type,
            inputs: vec![],
            outputs: vec![],
            widgets: vec![],
        }
    }

    /// Sets the displayed title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds an input port to the node
    pub fn add_input(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        self.inputs.push(Port::new(name, PortType::Input, data_type));
        self
    }

    /// Adds an output port to the node
    pub fn add_output(&mut self, name: impl Into<String>, data_type: DataType) -> &mut Self {
        self.outputs.push(Port::new(name, PortType::Output, data_type));
        self
    }

    /// Removes the input at `index`, shifting later inputs down
    pub fn remove_input(&mut self, index: usize) -> Option<Port> {
        if index < self.inputs.len() {
            Some(self.inputs.remove(index))
        } else {
            None
        }
    }

    /// Adds a widget to the node
    pub fn add_widget(&mut self, widget: Widget) -> &mut Self {
        self.widgets.push(widget);
        self
    }

    /// Index of the input with the given name
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|input| input.name == name)
    }

    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|input| input.name.as_str()).collect()
    }

    /// Finds a widget by exact name
    pub fn find_widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.name == name)
    }

    /// Finds a widget by exact name for mutation
    pub fn find_widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|widget| widget.name == name)
    }

    /// Presses the named button widget; false if there is no such button
    pub fn press_button(&self, name: &str, backend: &dyn BackendClient) -> bool {
        self.find_widget(name)
            .map(|widget| widget.press(backend))
            .unwrap_or(false)
    }
}
