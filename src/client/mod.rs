//! # Dashboard state
//!
//! What a customer, kitchen or admin dashboard keeps locally: the mirrored [`OrderCache`], the
//! customer's [`Cart`], the derived views, and the [`RelayClient`] that keeps the cache
//! current over the relay.

pub mod cache;
pub mod cart;
pub mod connection;
pub mod views;

pub use cache::OrderCache;
pub use cart::{Cart, CartError};
pub use connection::{ClientError, ReconnectPolicy, RelayClient};
pub use views::{kitchen_queue, AdminStats, StatusCounts};
