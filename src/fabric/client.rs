/*
    ABSTRACT: Definition of the fabric client seam. Anything able to register callbacks against
    a topic can carry threat events, the in-process `EventBus` (see bus.rs) being one of them.
*/
use crate::fabric::EventCallback;
use std::sync::Arc;

/// The subscribe / unsubscribe half of a publish / subscribe fabric client.
///
/// Delivery, threading, reconnection and ordering belong to the implementation.
pub trait FabricClient {
    /// Registers `callback` to receive events sent to `topic`.
    fn add_event_callback(&self, topic: &str, callback: Arc<dyn EventCallback>);

    /// Removes `callback` from `topic`, matching on `EventCallback::id`.
    ///
    /// ### Returns
    /// - `bool`: `true` if the callback was registered against the topic and has been removed.
    fn remove_event_callback(&self, topic: &str, callback: &dyn EventCallback) -> bool;
}

impl<F: FabricClient + ?Sized> FabricClient for &F {
    fn add_event_callback(&self, topic: &str, callback: Arc<dyn EventCallback>) {
        (**self).add_event_callback(topic, callback)
    }

    fn remove_event_callback(&self, topic: &str, callback: &dyn EventCallback) -> bool {
        (**self).remove_event_callback(topic, callback)
    }
}

impl<F: FabricClient + ?Sized> FabricClient for Arc<F> {
    fn add_event_callback(&self, topic: &str, callback: Arc<dyn EventCallback>) {
        (**self).add_event_callback(topic, callback)
    }

    fn remove_event_callback(&self, topic: &str, callback: &dyn EventCallback) -> bool {
        (**self).remove_event_callback(topic, callback)
    }
}
