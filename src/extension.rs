//! The extension object registered with the graph editor
//!
//! Installs node-type hooks, attaches the feedback relay and owns the
//! backend used by buttons and the refresh action.

use crate::backend::{BackendClient, BackendRequest};
use crate::config::ExtensionConfig;
use crate::constants::node_types::{OPEN_FOLDERS, STRING_LIST_JOINER};
use crate::events::EventBus;
use crate::feedback::{FeedbackRelay, NodeLookup};
use crate::nodes::data::StringPrimitiveFactory;
use crate::nodes::utility::{
    FolderButtonInjector, OpenFoldersFactory, StringListJoinerFactory, VariadicInputController,
};
use crate::nodes::{NodeGraph, NodeId, NodeRegistry};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::Rc;

pub struct VibeExtension {
    config: ExtensionConfig,
    backend: Rc<dyn BackendClient>,
    relay: Option<FeedbackRelay>,
}

impl VibeExtension {
    pub fn new(config: ExtensionConfig, backend: Rc<dyn BackendClient>) -> Self {
        Self {
            config,
            backend,
            relay: None,
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Register this extension's node types and decorate them with hooks
    pub fn register(&self, registry: &mut NodeRegistry) {
        registry.register::<StringListJoinerFactory>();
        registry.register::<OpenFoldersFactory>();
        registry.register::<StringPrimitiveFactory>();

        registry.decorate(
            STRING_LIST_JOINER,
            Box::new(VariadicInputController::new(&self.config.joiner_input_prefix)),
        );
        registry.decorate(OPEN_FOLDERS, Box::new(FolderButtonInjector));

        info!("Registered {} node types", registry.node_types().len());
    }

    /// Start relaying server feedback into `lookup`
    pub fn setup<L>(&mut self, bus: &EventBus, lookup: Rc<RefCell<L>>)
    where
        L: NodeLookup + 'static,
    {
        let relay = FeedbackRelay::attach(bus, &self.config.feedback_channel, lookup);
        info!("Listening for feedback on {}", relay.channel());
        // Replacing an existing relay drops its subscription
        self.relay = Some(relay);
    }

    pub fn is_listening(&self) -> bool {
        self.relay.is_some()
    }

    /// Ask the backend to refresh; never waits for the answer
    pub fn refresh(&self) {
        self.backend.send(BackendRequest::Refresh);
    }

    /// Press a button widget on a node; false if there is no such button
    pub fn press_button(&self, graph: &NodeGraph, node_id: NodeId, widget_name: &str) -> bool {
        let pressed = graph
            .node(node_id)
            .map(|node| node.press_button(widget_name, self.backend.as_ref()))
            .unwrap_or(false);
        if !pressed {
            debug!("No button {} on node {}", widget_name, node_id);
        }
        pressed
    }

    /// Detach the relay so no listener outlives the extension
    pub fn unload(&mut self) {
        if let Some(relay) = self.relay.take() {
            relay.detach();
        }
    }
}

impl Drop for VibeExtension {
    fn drop(&mut self) {
        self.unload();
    }
}
