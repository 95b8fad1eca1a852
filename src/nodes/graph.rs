//! Node graph data structures and operations
//!
//! A minimal host model: it owns nodes and links and raises the same
//! construction and connection callbacks a graph editor runtime does.

use super::factory::{DataType, NodeRegistry};
use super::hooks::{ConnectionChange, ConnectionOrigin, SlotSide};
use super::node::{Node, NodeId};
use super::port::{LinkId, PortId};
use crate::error::GraphError;
use crate::feedback::NodeLookup;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Represents a connection between an output and an input on different nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
    pub data_type: DataType,
}

/// Saved graph state: nodes without their non-persistent widgets, plus links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// A graph containing nodes, their links and the node-type registry
#[derive(Debug)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    pub links: BTreeMap<LinkId, Link>,
    registry: NodeRegistry,
    next_node_id: NodeId,
    next_link_id: LinkId,
}

impl NodeGraph {
    /// Creates a new empty node graph using the given registry
    pub fn new(registry: NodeRegistry) -> Self {
        Self {
            nodes: HashMap::new(),
            links: BTreeMap::new(),
            registry,
            next_node_id: 0,
            next_link_id: 0,
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        self.insert_node(id, node)
    }

    /// Adds a node to the graph with a specific ID (for testing)
    pub fn add_node_with_id(&mut self, id: NodeId, node: Node) -> NodeId {
        // Update next_node_id to avoid conflicts
        if id >= self.next_node_id {
            self.next_node_id = id + 1;
        }
        self.insert_node(id, node)
    }

    /// Creates a node of a registered type and adds it to the graph
    pub fn create_node(&mut self, node_type: &str) -> Option<NodeId> {
        let node = self.registry.create_node(node_type)?;
        Some(self.add_node(node))
    }

    fn insert_node(&mut self, id: NodeId, mut node: Node) -> NodeId {
        node.id = id;
        if let Some(hooks) = self.registry.hooks_for(&node.node_type) {
            hooks.on_node_created(&mut node);
        }
        self.nodes.insert(id, node);
        id
    }

    /// Removes a node after detaching all of its links
    ///
    /// Deleting a node is a user edit, so nodes downstream see each lost
    /// link as a `UserAction` disconnect.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let attached: Vec<LinkId> = self
            .links
            .values()
            .filter(|link| link.from_node == node_id || link.to_node == node_id)
            .map(|link| link.id)
            .collect();

        for link_id in attached {
            self.disconnect_link(link_id, ConnectionOrigin::UserAction);
        }

        self.nodes.remove(&node_id)
    }

    /// Captures the saved form of the graph, nodes and links in id order
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<Node> = self
            .nodes
            .values()
            .cloned()
            .map(|mut node| {
                node.widgets.retain(|widget| widget.serialize);
                node
            })
            .collect();
        nodes.sort_by_key(|node| node.id);

        GraphSnapshot {
            nodes,
            links: self.links.values().cloned().collect(),
        }
    }

    /// Replaces the graph's contents with a saved snapshot
    ///
    /// Nodes come back under their saved ids and run their creation hooks.
    /// Links are then replayed with `GraphLoad` origin, so variadic nodes
    /// keep the layout they were saved with.
    pub fn restore(&mut self, snapshot: GraphSnapshot) -> Result<(), GraphError> {
        self.nodes.clear();
        self.links.clear();
        self.next_node_id = 0;
        self.next_link_id = 0;

        let node_count = snapshot.nodes.len();
        for mut node in snapshot.nodes {
            for input in &mut node.inputs {
                input.link = None;
            }
            self.add_node_with_id(node.id, node);
        }

        let mut links = snapshot.links;
        links.sort_by_key(|link| link.id);
        let link_count = links.len();
        for link in links {
            self.connect(
                link.from_node,
                link.from_port,
                link.to_node,
                link.to_port,
                ConnectionOrigin::GraphLoad,
            )?;
        }

        info!("Restored {} nodes and {} links", node_count, link_count);
        Ok(())
    }

    /// Links an output to an input, replacing any link already on that input
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_port: PortId,
        to_node: NodeId,
        to_port: PortId,
        origin: ConnectionOrigin,
    ) -> Result<LinkId, GraphError> {
        if from_node == to_node {
            return Err(GraphError::SelfConnection);
        }

        let source = self.nodes.get(&from_node).ok_or(GraphError::NodeNotFound(from_node))?;
        let data_type = source
            .outputs
            .get(from_port)
            .ok_or(GraphError::PortNotFound { node: from_node, port: from_port })?
            .data_type;

        let target = self.nodes.get(&to_node).ok_or(GraphError::NodeNotFound(to_node))?;
        let input = target
            .inputs
            .get(to_port)
            .ok_or(GraphError::PortNotFound { node: to_node, port: to_port })?;

        if !data_type.can_connect_to(&input.data_type) {
            return Err(GraphError::TypeMismatch { from: data_type, to: input.data_type });
        }

        let occupied = input.link;
        if let Some(existing) = occupied {
            debug!("Replacing link {} on node {} input {}", existing, to_node, to_port);
            self.disconnect_link(existing, ConnectionOrigin::ProgrammaticRewire);
        }

        let target_input = self
            .nodes
            .get_mut(&to_node)
            .and_then(|node| node.inputs.get_mut(to_port))
            .ok_or(GraphError::PortNotFound { node: to_node, port: to_port })?;

        let id = self.next_link_id;
        self.next_link_id += 1;
        target_input.link = Some(id);

        let link = Link {
            id,
            from_node,
            from_port,
            to_node,
            to_port,
            data_type,
        };
        self.links.insert(id, link.clone());

        self.notify(
            from_node,
            ConnectionChange {
                side: SlotSide::Output,
                slot: from_port,
                connected: true,
                link: Some(link.clone()),
                origin,
            },
        );
        self.notify(to_node, ConnectionChange::input_connected(to_port, link, origin));

        Ok(id)
    }

    /// Detaches whatever link ends at the given input
    pub fn disconnect_input(
        &mut self,
        node_id: NodeId,
        port: PortId,
        origin: ConnectionOrigin,
    ) -> Option<Link> {
        let link_id = self.nodes.get(&node_id)?.inputs.get(port)?.link?;
        self.disconnect_link(link_id, origin)
    }

    /// Removes a link and notifies both of its ends
    pub fn disconnect_link(&mut self, link_id: LinkId, origin: ConnectionOrigin) -> Option<Link> {
        let link = self.links.remove(&link_id)?;

        if let Some(input) = self
            .nodes
            .get_mut(&link.to_node)
            .and_then(|node| node.inputs.get_mut(link.to_port))
        {
            if input.link == Some(link_id) {
                input.link = None;
            }
        }

        self.notify(
            link.from_node,
            ConnectionChange {
                side: SlotSide::Output,
                slot: link.from_port,
                connected: false,
                link: Some(link.clone()),
                origin,
            },
        );
        self.notify(
            link.to_node,
            ConnectionChange::input_disconnected(link.to_port, link.clone(), origin),
        );

        Some(link)
    }

    /// Links arriving at a node's inputs, in slot order
    pub fn input_links(&self, node_id: NodeId) -> Vec<&Link> {
        let mut links: Vec<&Link> = self.links.values().filter(|link| link.to_node == node_id).collect();
        links.sort_by_key(|link| link.to_port);
        links
    }

    fn notify(&mut self, node_id: NodeId, change: ConnectionChange) {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return;
        };
        if let Some(hooks) = self.registry.hooks_for(&node.node_type) {
            hooks.on_connections_change(node, &change);
        }
        self.sync_input_links(node_id);
    }

    /// Re-points links at the node's current input order after hooks reshaped it
    fn sync_input_links(&mut self, node_id: NodeId) {
        let Some(node) = self.nodes.get(&node_id) else {
            return;
        };
        let slots: HashMap<LinkId, PortId> = node
            .inputs
            .iter()
            .enumerate()
            .filter_map(|(index, input)| input.link.map(|link| (link, index)))
            .collect();

        let mut orphaned = Vec::new();
        for link in self.links.values_mut().filter(|link| link.to_node == node_id) {
            match slots.get(&link.id) {
                Some(&slot) => link.to_port = slot,
                None => orphaned.push(link.id),
            }
        }

        for link_id in orphaned {
            warn!("Dropping link {} whose input on node {} was removed", link_id, node_id);
            self.links.remove(&link_id);
        }
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new(NodeRegistry::new())
    }
}

impl NodeLookup for NodeGraph {
    fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }
}
