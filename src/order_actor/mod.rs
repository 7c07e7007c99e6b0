//! # Order Actor
//!
//! The server's Order Store: a [`ResourceActor`] that owns every placed order for the
//! lifetime of the process.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for placement and transition failures
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_relay::order_actor;
//! use order_relay::relay::EventHub;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = order_actor::new(16);
//!     tokio::spawn(actor.run(EventHub::new(16)));
//!
//!     assert!(client.list_all().await.unwrap().is_empty());
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
