/*
    ABSTRACT: Definition of a thread-safe, in-process fabric which routes events (see event.rs)
    to the callbacks (see callback.rs) registered against their destination topic
*/
use crate::{
    fabric::{types::*, Event, EventCallback, FabricClient},
    types::*,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

/// Thread-safe datastructure responsible for delivering `Event`s to the `EventCallback`s registered
/// against a topic
///
/// Any number of callbacks may be registered against the same topic. The bus makes no promise
/// about the order they are invoked in.
///
/// Callbacks run without any lock held, so they may subscribe, unsubscribe or count subscribers
/// on the bus from `on_event`.
#[derive(Default)]
pub struct EventBus {
    // Callbacks passed to `subscribe` are held through a std::sync::Weak to not prevent dropping
    // and to avoid circular references to an Arc. We deal with callbacks that get dropped by just
    // removing them from our map when we find them.
    channels: RwLock<CallbackMap>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given `EventCallback` to the callback list of the given topic
    ///
    /// The bus only holds a weak reference, dropping the last `Arc` unregisters the callback.
    pub fn subscribe(&self, callback: &Arc<dyn EventCallback>, to_topic: &str) {
        self.register(CallbackRef::Weak(Arc::downgrade(callback)), callback.id(), to_topic);
    }

    fn register(&self, entry: CallbackRef, callback_id: &Uuid, to_topic: &str) {
        let mut channels = self.channels.write();
        let callback_list = channels.entry(to_topic.to_string()).or_default();
        callback_list.push(entry);
        debug!(
            topic = %to_topic,
            callback_id = %callback_id,
            callbacks = callback_list.len(),
            "Callback subscribed"
        );
    }

    /// Unsubscribes the given `EventCallback` from the given topic on this `EventBus`
    ///
    /// ### Notes
    /// - Automatically removes any dropped callbacks in the topic's list, if the bus encounters any.
    ///
    /// ### Returns
    /// - `bool`: `true` if the callback was found and unsubscribed.
    pub fn unsubscribe(&self, callback: &dyn EventCallback, from_topic: &str) -> bool {
        let removed = self.remove_by_id(callback.id(), from_topic);
        debug!(topic = %from_topic, callback_id = %callback.id(), removed, "Callback unsubscribed");
        removed
    }

    fn remove_by_id(&self, callback_id: &Uuid, from_topic: &str) -> bool {
        let mut channels = self.channels.write();
        let callback_list = match channels.get_mut(from_topic) {
            Some(list) => list,
            None => return false,
        };

        let position = callback_list.iter().position(|entry| {
            entry
                .upgrade()
                .map_or(false, |registered| registered.id() == callback_id)
        });

        let removed = match position {
            Some(idx) => {
                // Ordering within a topic is not guaranteed, so swap_remove is fine
                callback_list.swap_remove(idx);
                true
            }
            None => false,
        };

        prune_dropped(callback_list, from_topic);
        if callback_list.is_empty() {
            channels.remove(from_topic);
        }
        removed
    }

    /// Removes all `EventCallback`s from this `EventBus`
    pub fn unsubscribe_all(&self) {
        self.channels.write().clear()
    }

    /// Removes all `EventCallback`s from the given topic on this `EventBus`
    pub fn unsubscribe_all_from_topic(&self, from_topic: &str) {
        self.channels.write().remove(from_topic);
    }

    /// Number of live callbacks registered against the given topic
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.channels
            .read()
            .get(topic)
            .map(|list| list.iter().filter(|entry| entry.is_alive()).count())
            .unwrap_or(0)
    }

    /// Delivers the given event to all `EventCallback`s registered against its destination topic
    ///
    /// ### Notes
    /// - Automatically removes any dropped callbacks in the destination topic's list, if the bus
    ///   encounters any.
    /// - Callbacks registered or removed while the event is being delivered take effect from the
    ///   next event on.
    pub fn send_event(&self, event: &Event) -> EventDispatchResult {
        let topic = event.destination_topic();
        let mut callbacks = self.live_callbacks(topic);
        if callbacks.is_empty() {
            trace!(topic = %topic, "No callbacks registered for topic");
            return EventDispatchResult::NotNeeded;
        }

        let mut unsubscribed = Vec::new();
        let result = execute_bus_requests(&mut callbacks, |callback| {
            let request = callback.on_event(event);
            if request == BusRequest::Unsubscribe {
                unsubscribed.push(*callback.id());
            }
            request
        });

        for callback_id in &unsubscribed {
            self.remove_by_id(callback_id, topic);
        }

        debug!(
            topic = %topic,
            message_id = %event.message_id(),
            unsubscribed = unsubscribed.len(),
            result = ?result,
            "Event dispatched"
        );
        result
    }

    /// Prunes the topic's dropped callbacks and returns strong references to the rest, so that
    /// they can be invoked once the lock is released.
    fn live_callbacks(&self, topic: &str) -> Vec<Arc<dyn EventCallback>> {
        let mut channels = self.channels.write();
        let callback_list = match channels.get_mut(topic) {
            Some(list) => list,
            None => return Vec::new(),
        };

        prune_dropped(callback_list, topic);
        let live = callback_list.iter().filter_map(CallbackRef::upgrade).collect();
        if callback_list.is_empty() {
            channels.remove(topic);
        }
        live
    }
}

impl FabricClient for EventBus {
    /// Registers the callback and keeps it alive until `remove_event_callback` is called.
    fn add_event_callback(&self, topic: &str, callback: Arc<dyn EventCallback>) {
        let callback_id = *callback.id();
        self.register(CallbackRef::Owned(callback), &callback_id, topic)
    }

    fn remove_event_callback(&self, topic: &str, callback: &dyn EventCallback) -> bool {
        self.unsubscribe(callback, topic)
    }
}

fn prune_dropped(callback_list: &mut Vec<CallbackRef>, topic: &str) {
    let before = callback_list.len();
    callback_list.retain(CallbackRef::is_alive);
    if callback_list.len() < before {
        trace!(topic = %topic, pruned = before - callback_list.len(), "Pruned dropped callbacks");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCallback {
        id: Uuid,
        count: AtomicUsize,
        reply: BusRequest,
    }

    impl CountingCallback {
        fn new(reply: BusRequest) -> Arc<Self> {
            Arc::new(Self {
                id: Uuid::new_v4(),
                count: AtomicUsize::new(0),
                reply,
            })
        }

        fn count(&self) -> usize {
            self.count.load(Ordering::SeqCst)
        }
    }

    impl EventCallback for CountingCallback {
        fn id(&self) -> &Uuid {
            &self.id
        }

        fn on_event(&self, _event: &Event) -> BusRequest {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.reply
        }
    }

    fn as_dyn(callback: &Arc<CountingCallback>) -> Arc<dyn EventCallback> {
        callback.clone()
    }

    #[test]
    fn test_send_without_subscribers_is_not_needed() {
        let bus = EventBus::new();
        let result = bus.send_event(&Event::new("/nobody", "{}"));
        assert_eq!(result, EventDispatchResult::NotNeeded);
    }

    #[test]
    fn test_all_subscribers_of_topic_receive_event() {
        let bus = EventBus::new();
        let first = CountingCallback::new(BusRequest::NoActionNeeded);
        let second = CountingCallback::new(BusRequest::NoActionNeeded);
        let other_topic = CountingCallback::new(BusRequest::NoActionNeeded);
        bus.subscribe(&as_dyn(&first), "/a");
        bus.subscribe(&as_dyn(&second), "/a");
        bus.subscribe(&as_dyn(&other_topic), "/b");

        let result = bus.send_event(&Event::new("/a", "{}"));

        assert_eq!(result, EventDispatchResult::Finished);
        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 1);
        assert_eq!(other_topic.count(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let callback = CountingCallback::new(BusRequest::NoActionNeeded);
        bus.subscribe(&as_dyn(&callback), "/a");

        assert!(bus.unsubscribe(&*callback, "/a"));
        assert!(!bus.unsubscribe(&*callback, "/a"));

        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::NotNeeded);
        assert_eq!(callback.count(), 0);
    }

    #[test]
    fn test_unsubscribe_from_unknown_topic() {
        let bus = EventBus::new();
        let callback = CountingCallback::new(BusRequest::NoActionNeeded);
        assert!(!bus.unsubscribe(&*callback, "/missing"));
    }

    #[test]
    fn test_dropped_callbacks_are_pruned() {
        let bus = EventBus::new();
        let kept = CountingCallback::new(BusRequest::NoActionNeeded);
        let dropped = CountingCallback::new(BusRequest::NoActionNeeded);
        bus.subscribe(&as_dyn(&kept), "/a");
        {
            let dropped_dyn = as_dyn(&dropped);
            bus.subscribe(&dropped_dyn, "/a");
        }
        drop(dropped);

        assert_eq!(bus.subscriber_count("/a"), 1);
        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::Finished);
        assert_eq!(kept.count(), 1);
        assert_eq!(bus.channels.read().get("/a").map(Vec::len), Some(1));
    }

    #[test]
    fn test_unsubscribe_request_from_callback() {
        let bus = EventBus::new();
        let once = CountingCallback::new(BusRequest::Unsubscribe);
        bus.subscribe(&as_dyn(&once), "/a");

        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::Finished);
        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::NotNeeded);
        assert_eq!(once.count(), 1);
    }

    #[test]
    fn test_failed_dispatch_is_reported() {
        let bus = EventBus::new();
        let failing = CountingCallback::new(BusRequest::DispatchFailed);
        let healthy = CountingCallback::new(BusRequest::NoActionNeeded);
        bus.subscribe(&as_dyn(&failing), "/a");
        bus.subscribe(&as_dyn(&healthy), "/a");

        let result = bus.send_event(&Event::new("/a", "{}"));

        assert_eq!(result, EventDispatchResult::FinishedWithFailures(1));
        assert_eq!(healthy.count(), 1);
    }

    #[test]
    fn test_unsubscribe_all() {
        let bus = EventBus::new();
        let a = CountingCallback::new(BusRequest::NoActionNeeded);
        let b = CountingCallback::new(BusRequest::NoActionNeeded);
        bus.subscribe(&as_dyn(&a), "/a");
        bus.subscribe(&as_dyn(&b), "/b");

        bus.unsubscribe_all_from_topic("/a");
        assert_eq!(bus.subscriber_count("/a"), 0);
        assert_eq!(bus.subscriber_count("/b"), 1);

        bus.unsubscribe_all();
        assert_eq!(bus.subscriber_count("/b"), 0);
    }

    #[test]
    fn test_fabric_client_impl_delegates() {
        let bus = EventBus::new();
        let callback = CountingCallback::new(BusRequest::NoActionNeeded);

        bus.add_event_callback("/a", as_dyn(&callback));
        assert_eq!(bus.subscriber_count("/a"), 1);
        assert!(bus.remove_event_callback("/a", &*callback));
        assert_eq!(bus.subscriber_count("/a"), 0);
        assert_eq!(Arc::strong_count(&callback), 1);
    }

    /// Counts into a counter it shares with the test, so the test does not need to keep the
    /// callback itself.
    struct SharedCounterCallback {
        id: Uuid,
        hits: Arc<AtomicUsize>,
    }

    impl EventCallback for SharedCounterCallback {
        fn id(&self) -> &Uuid {
            &self.id
        }

        fn on_event(&self, _event: &Event) -> BusRequest {
            self.hits.fetch_add(1, Ordering::SeqCst);
            BusRequest::NoActionNeeded
        }
    }

    #[test]
    fn test_fabric_client_keeps_handed_over_callback_alive() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let id = Uuid::new_v4();
        bus.add_event_callback(
            "/a",
            Arc::new(SharedCounterCallback {
                id,
                hits: Arc::clone(&hits),
            }),
        );

        assert_eq!(bus.subscriber_count("/a"), 1);
        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::Finished);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let handle = SharedCounterCallback {
            id,
            hits: Arc::new(AtomicUsize::new(0)),
        };
        assert!(bus.remove_event_callback("/a", &handle));
        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::NotNeeded);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    /// Calls back into the bus it is subscribed to while handling an event.
    struct ReentrantCallback {
        id: Uuid,
        bus: Arc<EventBus>,
        seen_subscribers: AtomicUsize,
    }

    impl EventCallback for ReentrantCallback {
        fn id(&self) -> &Uuid {
            &self.id
        }

        fn on_event(&self, _event: &Event) -> BusRequest {
            self.seen_subscribers
                .store(self.bus.subscriber_count("/a"), Ordering::SeqCst);
            self.bus.unsubscribe(self, "/a");
            BusRequest::NoActionNeeded
        }
    }

    #[test]
    fn test_callback_may_call_back_into_bus() {
        let bus = Arc::new(EventBus::new());
        let reentrant = Arc::new(ReentrantCallback {
            id: Uuid::new_v4(),
            bus: Arc::clone(&bus),
            seen_subscribers: AtomicUsize::new(0),
        });
        let callback: Arc<dyn EventCallback> = reentrant.clone();
        bus.subscribe(&callback, "/a");

        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::Finished);
        assert_eq!(reentrant.seen_subscribers.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count("/a"), 0);
        assert_eq!(bus.send_event(&Event::new("/a", "{}")), EventDispatchResult::NotNeeded);
    }
}
