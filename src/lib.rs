/*
    ABSTRACT: Client for threat events published over a publish / subscribe fabric. Threat event
    callbacks (see callbacks.rs) decode the JSON payload of delivered events, the client
    (see client.rs) registers them on the ePO threat event topic, and aggregate.rs expands the
    comma-joined `listOf` / `setOf` fields senders place in `otherData`.
*/
pub mod aggregate;
pub mod callbacks;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod fabric;
pub mod telemetry;
mod types;

pub use aggregate::{
    convert_aggregate_fields, create_list_from_aggregate, create_set_from_aggregate,
    take_other_data, OtherData, OtherDataValue,
};
pub use callbacks::{decode_payload, ThreatEventCallback};
pub use client::CommonThreatEventClient;
pub use constants::EPO_THREAT_EVENT_RESPONSE_TOPIC;
pub use error::{DecodeError, Result, ThreatEventError, TypeValidationError};
pub use fabric::{Event, EventBus, EventCallback, FabricClient};
pub use types::{BusRequest, EventDispatchResult};
