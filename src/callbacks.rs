/*
    ABSTRACT: Definition of the threat event callback, which unwraps the JSON payload of events
    delivered by the fabric (see fabric/) and hands the decoded structure to the implementor
*/
use crate::{
    error::{DecodeError, Result},
    fabric::{Event, EventCallback},
    types::BusRequest,
};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Decodes the payload of a received event as UTF-8 JSON.
pub fn decode_payload(event: &Event) -> std::result::Result<Value, DecodeError> {
    let text = std::str::from_utf8(event.payload())?;
    Ok(serde_json::from_str(text)?)
}

/// A thread-safe callback which receives threat events sent by event publishers.
///
/// Implement `on_threat_event` and register the callback with
/// `CommonThreatEventClient::add_epo_threat_event_response_callback`. Every `ThreatEventCallback`
/// is an `EventCallback`, so it can also be registered against any topic on a `FabricClient`
/// directly.
///
/// ### Example
///
/// ```rust
/// use serde_json::Value;
/// use threat_event_client::{Event, ThreatEventCallback};
/// use uuid::Uuid;
///
/// struct PrintingCallback {
///     id: Uuid,
/// }
///
/// impl ThreatEventCallback for PrintingCallback {
///     fn id(&self) -> &Uuid {
///         &self.id
///     }
///
///     fn on_threat_event(&self, threat_event: &Value, original_event: &Event) {
///         println!("Threat event on topic: {}", original_event.destination_topic());
///         println!("{}", threat_event);
///     }
/// }
/// ```
pub trait ThreatEventCallback: Send + Sync {
    fn id(&self) -> &Uuid;

    /// Invoked with the decoded threat event and the event message it arrived in.
    ///
    /// The structure is the JSON object described by the `constants` module: the
    /// `eventMessageType` and `eventMessageVersion` strings and the `event` member, which nests
    /// the `analyzer`, `entity`, `files`, `source`, `target` and `otherData` members. Use
    /// `take_other_data` and `convert_aggregate_fields` to expand aggregate `otherData` fields.
    fn on_threat_event(&self, threat_event: &Value, original_event: &Event);

    /// Decodes the event payload and invokes `on_threat_event` with the result.
    ///
    /// The fabric reaches this through `EventCallback::on_event`, implementors should not need to override it.
    ///
    /// ### Errors
    /// - `ThreatEventError::Decode` if the payload is not UTF-8 JSON. `on_threat_event` is not
    ///   invoked in that case.
    fn dispatch(&self, event: &Event) -> Result<()> {
        let threat_event = decode_payload(event)?;
        self.on_threat_event(&threat_event, event);
        Ok(())
    }
}

impl<C: ThreatEventCallback> EventCallback for C {
    fn id(&self) -> &Uuid {
        ThreatEventCallback::id(self)
    }

    fn on_event(&self, event: &Event) -> BusRequest {
        match self.dispatch(event) {
            Ok(()) => BusRequest::NoActionNeeded,
            Err(e) => {
                warn!(
                    topic = %event.destination_topic(),
                    message_id = %event.message_id(),
                    error = %e,
                    "Failed to decode threat event"
                );
                BusRequest::DispatchFailed
            }
        }
    }
}
