//! Server feedback relay
//!
//! Applies `{node_id, widget_name, value}` events from the backend to the
//! matching widget. Misses are normal (events can race node removal) and
//! are dropped quietly.

use crate::events::{EventBus, Subscription};
use crate::nodes::{Node, NodeId};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Finds nodes by id in the host's current graph
pub trait NodeLookup {
    fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node>;
}

/// Payload of one feedback event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub node_id: NodeId,
    pub widget_name: String,
    pub value: Value,
}

/// Overwrite the addressed widget's value; false if node or widget is missing
pub fn apply_feedback<L: NodeLookup + ?Sized>(lookup: &mut L, event: &FeedbackEvent) -> bool {
    let Some(node) = lookup.find_node_mut(event.node_id) else {
        debug!("Feedback for unknown node {} dropped", event.node_id);
        return false;
    };
    let Some(widget) = node.find_widget_mut(&event.widget_name) else {
        debug!(
            "Feedback for unknown widget {} on node {} dropped",
            event.widget_name, event.node_id
        );
        return false;
    };
    widget.set_value(event.value.clone());
    true
}

/// Decode a raw channel payload and apply it
pub fn apply_payload<L: NodeLookup + ?Sized>(lookup: &RefCell<L>, payload: &Value) -> bool {
    let event = match FeedbackEvent::deserialize(payload) {
        Ok(event) => event,
        Err(e) => {
            debug!("Malformed feedback payload dropped: {}", e);
            return false;
        }
    };
    let Ok(mut graph) = lookup.try_borrow_mut() else {
        debug!("Graph busy, feedback for node {} dropped", event.node_id);
        return false;
    };
    apply_feedback(&mut *graph, &event)
}

/// Owns the subscription that feeds events into a node lookup
pub struct FeedbackRelay {
    subscription: Subscription,
}

impl FeedbackRelay {
    /// Start relaying `channel` events into `lookup`
    pub fn attach<L>(bus: &EventBus, channel: &str, lookup: Rc<RefCell<L>>) -> Self
    where
        L: NodeLookup + 'static,
    {
        let subscription = bus.subscribe(channel, move |payload: &Value| {
            apply_payload(&*lookup, payload);
        });
        Self { subscription }
    }

    pub fn channel(&self) -> &str {
        self.subscription.channel()
    }

    /// Stop relaying; equivalent to dropping the relay
    pub fn detach(self) {
        debug!("Feedback relay detached from {}", self.channel());
    }
}
