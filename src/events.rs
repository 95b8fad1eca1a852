//! Named event channels delivered on the UI thread
//!
//! Listeners are owned by [`Subscription`] handles: dropping the handle
//! removes the listener, so nothing dangles once its owner goes away.

use log::debug;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(&Value)>>;

struct Entry {
    /// Cleared by the owning [`Subscription`]; inactive entries never run
    active: Rc<Cell<bool>>,
    listener: Listener,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_channel: HashMap<String, Vec<Entry>>,
}

impl Listeners {
    fn prune(&mut self, channel: &str) {
        if let Some(entries) = self.by_channel.get_mut(channel) {
            entries.retain(|entry| entry.active.get());
            if entries.is_empty() {
                self.by_channel.remove(channel);
            }
        }
    }
}

/// Single-threaded publish/subscribe bus keyed by channel name
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Listeners>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `channel` until the returned handle is dropped
    pub fn subscribe<F>(&self, channel: impl Into<String>, handler: F) -> Subscription
    where
        F: FnMut(&Value) + 'static,
    {
        let channel = channel.into();
        let mut listeners = self.inner.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;

        let listener: Listener = Rc::new(RefCell::new(handler));
        let active = Rc::new(Cell::new(true));
        listeners.prune(&channel);
        listeners.by_channel.entry(channel.clone()).or_default().push(Entry {
            active: Rc::clone(&active),
            listener,
        });
        debug!("Subscribed listener {} to {}", id, channel);

        Subscription {
            bus: Rc::downgrade(&self.inner),
            channel,
            id,
            active,
        }
    }

    /// Deliver `payload` to every listener on `channel`, in subscription order
    ///
    /// Returns how many listeners ran. A listener that is already running
    /// (re-entrant emit) is skipped, and so is one whose subscription was
    /// dropped earlier in the same delivery.
    pub fn emit(&self, channel: &str, payload: &Value) -> usize {
        let targets: Vec<(Rc<Cell<bool>>, Listener)> = match self.inner.borrow().by_channel.get(channel) {
            Some(entries) => entries
                .iter()
                .filter(|entry| entry.active.get())
                .map(|entry| (Rc::clone(&entry.active), Rc::clone(&entry.listener)))
                .collect(),
            None => return 0,
        };

        let mut delivered = 0;
        for (active, listener) in targets {
            if !active.get() {
                continue;
            }
            if let Ok(mut handler) = listener.try_borrow_mut() {
                (&mut *handler)(payload);
                delivered += 1;
            }
        }

        if let Ok(mut listeners) = self.inner.try_borrow_mut() {
            listeners.prune(channel);
        }
        delivered
    }

    pub fn listener_count(&self, channel: &str) -> usize {
        self.inner.borrow().by_channel.get(channel).map_or(0, |entries| {
            entries.iter().filter(|entry| entry.active.get()).count()
        })
    }
}

/// Keeps one listener registered; unsubscribes on drop
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    bus: Weak<RefCell<Listeners>>,
    channel: String,
    id: u64,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether the bus this subscription belongs to still exists
    pub fn is_active(&self) -> bool {
        self.bus.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Deactivating is enough for the listener to never run again
        self.active.set(false);

        let Some(inner) = self.bus.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut listeners) => {
                listeners.prune(&self.channel);
                debug!("Unsubscribed listener {} from {}", self.id, self.channel);
            }
            Err(_) => debug!(
                "Bus busy, listener {} on {} is removed on the next emit",
                self.id, self.channel
            ),
        };
    }
}
