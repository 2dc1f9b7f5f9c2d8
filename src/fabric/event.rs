/*
    ABSTRACT: Definition of the event message delivered by the fabric to its registered
    callbacks (see callback.rs). The fabric owns the message; callbacks only read it.
*/
use uuid::Uuid;

/// An event message received from the fabric, addressed to a destination topic.
///
/// The payload is kept as raw bytes. Interpreting it is up to the callback, e.g. the
/// threat event callback decodes it as UTF-8 JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    message_id: Uuid,
    destination_topic: String,
    payload: Vec<u8>,
}

impl Event {
    /// Creates a new event with a random message id.
    pub fn new(destination_topic: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            destination_topic: destination_topic.into(),
            payload: payload.into(),
        }
    }

    pub fn message_id(&self) -> &Uuid {
        &self.message_id
    }

    /// The topic this event was published to.
    pub fn destination_topic(&self) -> &str {
        &self.destination_topic
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}
