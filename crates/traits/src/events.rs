//! Notifications emitted while rendering a preview.

use log::warn;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use webpreview_types::RequestAttributes;

/// Emitted after the request attributes are built and before the kernel runs.
pub const PRE_RENDER: &str = "sulu_preview.pre_render";

/// Carries the attributes of the request about to be rendered.
#[derive(Debug, Clone)]
pub struct PreRenderEvent {
    attributes: Arc<RequestAttributes>,
}

impl PreRenderEvent {
    pub fn new(attributes: Arc<RequestAttributes>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &RequestAttributes {
        &self.attributes
    }
}

/// Delivers events to listeners synchronously.
pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event_name: &str, event: &PreRenderEvent);
}

type Listener = Arc<dyn Fn(&PreRenderEvent) + Send + Sync>;

/// Listeners registered per event name, called in registration order.
#[derive(Default)]
pub struct EventListeners {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for `event_name`.
    ///
    /// Does nothing if the lock is poisoned.
    pub fn add_listener<F>(&self, event_name: impl Into<String>, listener: F)
    where
        F: Fn(&PreRenderEvent) + Send + Sync + 'static,
    {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners
                .entry(event_name.into())
                .or_default()
                .push(Arc::new(listener));
        }
    }

    /// Returns 0 if the lock is poisoned.
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .read()
            .map(|l| l.get(event_name).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl EventDispatcher for EventListeners {
    fn dispatch(&self, event_name: &str, event: &PreRenderEvent) {
        // Listeners run without the lock held so they may register others.
        let listeners: Vec<Listener> = match self.listeners.read() {
            Ok(listeners) => listeners.get(event_name).cloned().unwrap_or_default(),
            Err(_) => {
                warn!("Listener registry poisoned, dropping '{}' event.", event_name);
                return;
            }
        };
        for listener in &listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<String> = self
            .listeners
            .read()
            .map(|l| l.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("EventListeners")
            .field("events", &events)
            .finish()
    }
}
