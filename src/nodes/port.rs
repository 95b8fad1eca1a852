//! Port types and functionality for node connections

use super::factory::DataType;
use serde::{Deserialize, Serialize};

/// Index of a port within its node's input or output list
pub type PortId = usize;

/// Unique identifier for a link between two ports
pub type LinkId = usize;

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortType {
    Input,
    Output,
}

/// Represents a connection point on a node
///
/// Only inputs record their link here; an output may feed many links and
/// those are tracked by the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub port_type: PortType,
    pub data_type: DataType,
    pub link: Option<LinkId>,
}

impl Port {
    /// Creates a new, unconnected port
    pub fn new(name: impl Into<String>, port_type: PortType, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            port_type,
            data_type,
            link: None,
        }
    }

    /// Checks if this port is an input
    pub fn is_input(&self) -> bool {
        matches!(self.port_type, PortType::Input)
    }

    /// Checks if this port is an output
    pub fn is_output(&self) -> bool {
        matches!(self.port_type, PortType::Output)
    }

    /// Checks if a link currently ends at this port
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_port_is_unconnected() {
        let port = Port::new("arg1", PortType::Input, DataType::String);
        assert!(port.is_input());
        assert!(!port.is_output());
        assert!(!port.is_connected());
    }

    #[test]
    fn test_port_with_link_is_connected() {
        let mut port = Port::new("arg1", PortType::Input, DataType::String);
        port.link = Some(3);
        assert!(port.is_connected());
    }
}
