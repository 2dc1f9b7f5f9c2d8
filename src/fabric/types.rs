use crate::fabric::EventCallback;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// How the bus holds on to a registered callback.
pub(crate) enum CallbackRef {
    /// Registered through `EventBus::subscribe`, the caller keeps the callback alive.
    Weak(Weak<dyn EventCallback>),
    /// Handed over through `FabricClient::add_event_callback`, the bus keeps the callback alive
    /// until it is removed.
    Owned(Arc<dyn EventCallback>),
}

impl CallbackRef {
    pub(crate) fn upgrade(&self) -> Option<Arc<dyn EventCallback>> {
        match self {
            CallbackRef::Weak(callback) => callback.upgrade(),
            CallbackRef::Owned(callback) => Some(Arc::clone(callback)),
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        match self {
            CallbackRef::Weak(callback) => callback.strong_count() > 0,
            CallbackRef::Owned(_) => true,
        }
    }
}

pub(crate) type CallbackMap = HashMap<String, Vec<CallbackRef>>;
