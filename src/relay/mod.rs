//! # Relay
//!
//! Pushes order and menu state to every connected dashboard and feeds their intents into the
//! Order Store.
//!
//! - [`events`] - the `{event, data}` wire envelope in both directions
//! - [`hub`] - the broadcast topic shared by every session
//! - [`session`] - per-connection bootstrap and relay loop

pub mod events;
pub mod hub;
pub mod session;

pub use events::*;
pub use hub::EventHub;
pub use session::run_session;
