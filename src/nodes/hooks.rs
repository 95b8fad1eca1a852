//! Node-type lifecycle hooks raised by the host runtime
//!
//! This module provides a trait-based system for node types to react to
//! construction and connection changes, plus the decoration wrapper used
//! when several behaviors are installed on the same type.

use crate::nodes::graph::Link;
use crate::nodes::{Node, PortId};

/// Which side of a node a connection change happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSide {
    Input,
    Output,
}

/// Why the host changed a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOrigin {
    /// The user dragged a link on or off a slot
    UserAction,
    /// The host replaced or dropped a link as part of another operation
    ProgrammaticRewire,
    /// The host is rebuilding links from a saved graph
    GraphLoad,
}

impl ConnectionOrigin {
    pub fn is_user_action(&self) -> bool {
        matches!(self, ConnectionOrigin::UserAction)
    }
}

/// A single connection-change notification
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionChange {
    pub side: SlotSide,
    pub slot: PortId,
    pub connected: bool,
    /// The link that was added or removed; `None` for bookkeeping notifications
    pub link: Option<Link>,
    pub origin: ConnectionOrigin,
}

impl ConnectionChange {
    /// A link was attached to an input slot
    pub fn input_connected(slot: PortId, link: Link, origin: ConnectionOrigin) -> Self {
        Self {
            side: SlotSide::Input,
            slot,
            connected: true,
            link: Some(link),
            origin,
        }
    }

    /// A link was detached from an input slot
    pub fn input_disconnected(slot: PortId, link: Link, origin: ConnectionOrigin) -> Self {
        Self {
            side: SlotSide::Input,
            slot,
            connected: false,
            link: Some(link),
            origin,
        }
    }
}

/// Trait for node-type specific reactions to host callbacks
pub trait NodeHooks: Send + Sync {
    /// Called once after a node of this type is constructed and has an id
    fn on_node_created(&self, _node: &mut Node) {
        // Default: no special handling
    }

    /// Called whenever a link is attached to or detached from the node
    fn on_connections_change(&self, _node: &mut Node, _change: &ConnectionChange) {
        // Default: no special handling
    }
}

/// Default implementation for node types that don't need special handling
#[derive(Clone, Default)]
pub struct DefaultHooks;

impl NodeHooks for DefaultHooks {}

/// Runs previously installed hooks before the newly installed ones
pub struct ChainedHooks {
    previous: Box<dyn NodeHooks>,
    next: Box<dyn NodeHooks>,
}

impl ChainedHooks {
    pub fn new(previous: Box<dyn NodeHooks>, next: Box<dyn NodeHooks>) -> Self {
        Self { previous, next }
    }
}

impl NodeHooks for ChainedHooks {
    fn on_node_created(&self, node: &mut Node) {
        self.previous.on_node_created(node);
        self.next.on_node_created(node);
    }

    fn on_connections_change(&self, node: &mut Node, change: &ConnectionChange) {
        self.previous.on_connections_change(node, change);
        self.next.on_connections_change(node, change);
    }
}
