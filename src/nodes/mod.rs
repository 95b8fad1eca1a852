//! Node system - Core data structures and the extension's node types

// Core node system modules
pub mod factory;
pub mod graph;
pub mod hooks;
pub mod node;
pub mod port;
pub mod widget;

// Node implementations
pub mod data;
pub mod utility;

// Re-export core types
pub use graph::{GraphSnapshot, Link, NodeGraph};
pub use node::{Node, NodeId};
pub use port::{LinkId, Port, PortId, PortType};
pub use widget::{ButtonAction, Widget, WidgetKind};

// Re-export factory types
pub use factory::{
    DataType, NodeCategory, NodeFactory, NodeMetadata, NodeRegistry, PortDefinition,
    WidgetDefinition,
};

// Re-export hook types
pub use hooks::{ChainedHooks, ConnectionChange, ConnectionOrigin, NodeHooks, SlotSide};
