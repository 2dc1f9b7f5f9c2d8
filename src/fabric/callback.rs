/*
    ABSTRACT: Definition of a thread-safe callback which registers with the fabric
    (see client.rs) against a topic to receive the events (see event.rs) published to it
*/
use crate::{fabric::Event, types::BusRequest};
use uuid::Uuid;

/// A thread-safe `EventCallback` which is registered with a `FabricClient` to receive `Event`s sent to a topic.
///
/// - `id` identifies the callback when it is removed from a topic.
///
/// - `on_event` is invoked once per delivered event, and its `BusRequest` tells the fabric what to do next.
pub trait EventCallback: Send + Sync {
    fn id(&self) -> &Uuid;
    fn on_event(&self, event: &Event) -> BusRequest;
}
