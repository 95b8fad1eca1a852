//! Node factory system with registration, metadata and per-type hooks

use crate::nodes::hooks::{ChainedHooks, NodeHooks};
use crate::nodes::widget::{Widget, WidgetKind};
use crate::nodes::Node;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Data types that can flow through ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Floating point number
    Float,
    /// Whole number
    Integer,
    /// Text string
    String,
    /// Boolean value
    Boolean,
    /// Any type (for generic ports)
    Any,
}

impl DataType {
    /// Check if this data type can connect to another
    pub fn can_connect_to(&self, other: &DataType) -> bool {
        self == other || *self == DataType::Any || *other == DataType::Any
    }

    /// Get the name the host runtime uses for this data type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Float => "FLOAT",
            DataType::Integer => "INT",
            DataType::String => "STRING",
            DataType::Boolean => "BOOLEAN",
            DataType::Any => "*",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Category holding this extension's nodes
    pub fn vibe() -> Self {
        Self::new(&["Vibe for Comfy"])
    }

    /// Get standard data category
    pub fn data() -> Self {
        Self::new(&["Data"])
    }
}

/// Port definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub data_type: DataType,
    /// The host also creates a widget of the same name for this input
    pub shadow_widget: bool,
}

impl PortDefinition {
    /// Create a required port
    pub fn required(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            shadow_widget: false,
        }
    }

    /// Input converted from a widget: the node gets both a slot and a widget
    pub fn with_widget(mut self) -> Self {
        self.shadow_widget = true;
        self
    }
}

/// Widget definition for node creation
#[derive(Debug, Clone)]
pub struct WidgetDefinition {
    pub name: String,
    pub kind: WidgetKind,
    pub default: Value,
}

impl WidgetDefinition {
    pub fn new(name: &str, kind: WidgetKind, default: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default: default.into(),
        }
    }
}

/// Metadata for a node type - the single source of truth for its layout
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
    pub widgets: Vec<WidgetDefinition>,
}

impl NodeMetadata {
    /// Create node metadata with empty connectivity
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
            inputs: vec![],
            outputs: vec![],
            widgets: vec![],
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_widgets(mut self, widgets: Vec<WidgetDefinition>) -> Self {
        self.widgets = widgets;
        self
    }
}

/// Node factory trait with rich metadata
pub trait NodeFactory: Send + Sync {
    /// Get comprehensive node metadata
    fn metadata() -> NodeMetadata
    where
        Self: Sized;

    /// Create a node instance (id 0 until added to a graph)
    fn create() -> Node
    where
        Self: Sized,
    {
        let meta = Self::metadata();
        let mut node = Node::new(0, meta.node_type).with_title(meta.display_name);

        for input in &meta.inputs {
            node.add_input(&input.name, input.data_type);
            if input.shadow_widget {
                node.add_widget(Widget::new(&input.name, WidgetKind::Text, ""));
            }
        }

        for output in &meta.outputs {
            node.add_output(&output.name, output.data_type);
        }

        for widget in &meta.widgets {
            node.add_widget(Widget::new(&widget.name, widget.kind.clone(), widget.default.clone()));
        }

        node
    }
}

/// Function pointer type for creating nodes
type NodeCreator = fn() -> Node;
type MetadataProvider = fn() -> NodeMetadata;

/// Registry mapping type names to factories and installed hooks
#[derive(Default)]
pub struct NodeRegistry {
    creators: BTreeMap<String, NodeCreator>,
    metadata_providers: BTreeMap<String, MetadataProvider>,
    categories: HashMap<NodeCategory, Vec<String>>,
    hooks: HashMap<String, Box<dyn NodeHooks>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node factory
    pub fn register<T: NodeFactory + 'static>(&mut self) {
        let metadata = T::metadata();
        let node_type = metadata.node_type.to_string();

        self.creators.insert(node_type.clone(), T::create);
        self.metadata_providers.insert(node_type.clone(), T::metadata);

        debug!(
            "Registered node type {} under {}: {}",
            node_type,
            metadata.category.name(),
            metadata.description
        );

        let in_category = self.categories.entry(metadata.category).or_default();
        if !in_category.contains(&node_type) {
            in_category.push(node_type);
        }
    }

    /// Create a node by type name
    pub fn create_node(&self, node_type: &str) -> Option<Node> {
        self.creators.get(node_type).map(|creator| creator())
    }

    /// Get metadata for a registered node type
    pub fn metadata(&self, node_type: &str) -> Option<NodeMetadata> {
        self.metadata_providers.get(node_type).map(|provider| provider())
    }

    /// All registered node types in name order
    pub fn node_types(&self) -> Vec<&str> {
        self.creators.keys().map(|name| name.as_str()).collect()
    }

    /// Node types registered under a category
    pub fn nodes_in_category(&self, category: &NodeCategory) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|types| types.iter().map(|name| name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Install hooks for a node type, keeping any hooks already installed
    ///
    /// Previously installed hooks keep running and are called first.
    pub fn decorate(&mut self, node_type: &str, hooks: Box<dyn NodeHooks>) {
        let installed = match self.hooks.remove(node_type) {
            Some(previous) => {
                info!("Chaining additional hooks onto {}", node_type);
                Box::new(ChainedHooks::new(previous, hooks)) as Box<dyn NodeHooks>
            }
            None => hooks,
        };
        self.hooks.insert(node_type.to_string(), installed);
    }

    /// Hooks installed for a node type
    pub fn hooks_for(&self, node_type: &str) -> Option<&dyn NodeHooks> {
        self.hooks.get(node_type).map(|hooks| hooks.as_ref())
    }
}

impl fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("node_types", &self.creators.keys().collect::<Vec<_>>())
            .field("hooked_types", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}
