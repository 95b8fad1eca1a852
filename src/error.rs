//! Error types for the host model and the extension wiring

use crate::nodes::{DataType, NodeId, PortId};
use thiserror::Error;

/// Rejections raised by the in-memory host graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    #[error("node {node} has no port {port}")]
    PortNotFound { node: NodeId, port: PortId },

    #[error("cannot connect a node to itself")]
    SelfConnection,

    #[error("cannot connect {from} output to {to} input")]
    TypeMismatch { from: DataType, to: DataType },
}

/// Failures of configuration loading and outbound requests
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend answered {status} for {route}")]
    Status { route: String, status: u16 },

    #[error("unknown folder key: {0}")]
    UnknownFolderKey(String),
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
