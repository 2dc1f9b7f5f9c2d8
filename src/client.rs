/*
    ABSTRACT: Definition of the threat event client, a thin wrapper which registers threat event
    callbacks (see callbacks.rs) with a fabric client (see fabric/) on the ePO threat event topic
*/
use crate::{
    aggregate::{self, OtherData},
    callbacks::ThreatEventCallback,
    constants::EPO_THREAT_EVENT_RESPONSE_TOPIC,
    error::TypeValidationError,
    fabric::{EventCallback, FabricClient},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Registers `ThreatEventCallback`s with a `FabricClient` to receive threat events from ePO.
///
/// ### Example
///
/// ```rust
/// use std::sync::Arc;
/// use threat_event_client::{CommonThreatEventClient, Event, EventBus, ThreatEventCallback};
/// use uuid::Uuid;
///
/// struct MyThreatEventCallback {
///     id: Uuid,
/// }
///
/// impl ThreatEventCallback for MyThreatEventCallback {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn on_threat_event(&self, threat_event: &serde_json::Value, original_event: &Event) {
///         println!("Threat event on topic: {}", original_event.destination_topic());
///         println!("{:#}", threat_event);
///     }
/// }
///
/// let bus = EventBus::new();
/// let client = CommonThreatEventClient::new(&bus);
/// let callback = Arc::new(MyThreatEventCallback { id: Uuid::new_v4() });
///
/// client.add_epo_threat_event_response_callback(&callback);
/// ```
pub struct CommonThreatEventClient<F: FabricClient> {
    fabric: F,
}

impl<F: FabricClient> CommonThreatEventClient<F> {
    pub fn new(fabric: F) -> Self {
        Self { fabric }
    }

    pub fn fabric(&self) -> &F {
        &self.fabric
    }

    /// Registers the callback to receive threat events sent by ePO Automatic Responses.
    ///
    /// The fabric keeps its own reference to the callback until it is removed, so the caller may
    /// drop its `Arc` once registered.
    pub fn add_epo_threat_event_response_callback<C>(&self, threat_event_callback: &Arc<C>)
    where
        C: ThreatEventCallback + 'static,
    {
        let callback: Arc<dyn EventCallback> = threat_event_callback.clone();
        self.fabric
            .add_event_callback(EPO_THREAT_EVENT_RESPONSE_TOPIC, callback);
    }

    /// Unregisters the callback so that it no longer receives threat events from ePO.
    ///
    /// ### Returns
    /// - `bool`: whatever the fabric reports, `true` on the `EventBus` if the callback was registered.
    pub fn remove_epo_threat_event_response_callback<C>(&self, threat_event_callback: &C) -> bool
    where
        C: ThreatEventCallback + 'static,
    {
        self.fabric
            .remove_event_callback(EPO_THREAT_EVENT_RESPONSE_TOPIC, threat_event_callback)
    }

    /// Converts the aggregate fields of an `otherData` mapping.
    ///
    /// See `aggregate::convert_aggregate_fields`.
    pub fn convert_aggregate_fields(
        otherdata_props: Map<String, Value>,
    ) -> Result<OtherData, TypeValidationError> {
        aggregate::convert_aggregate_fields(otherdata_props)
    }
}
