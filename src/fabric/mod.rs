mod bus;
mod callback;
mod client;
mod event;
pub(crate) mod types;

pub use bus::EventBus;
pub use callback::EventCallback;
pub use client::FabricClient;
pub use event::Event;
