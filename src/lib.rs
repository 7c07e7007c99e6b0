//! # Order Relay
//!
//! A real-time restaurant ordering relay. Customers place orders from a cart, the kitchen
//! advances them through `new -> preparing -> ready -> delivered`, and admins watch the
//! aggregates. Every dashboard sees every change as it happens.
//!
//! ## Architecture Notes
//!
//! ### 1. One writer for all orders
//! The Order Store is a [`ResourceActor`](actor_framework::ResourceActor) running in its own
//! Tokio task. Placements and status changes are messages processed one at a time, so no
//! locks guard the order list and every read is a consistent snapshot.
//!
//! ### 2. Broadcast from the commit point
//! The actor's context is the [`EventHub`](relay::EventHub). After a placement or transition
//! commits, the actor publishes it to every subscriber, so dashboards see changes in the
//! order the store applied them.
//!
//! ### 3. Server-authoritative placement
//! Placement is validated and the total recomputed inside the actor. A rejected placement is
//! reported to its sender only; nothing is broadcast.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields; see [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`] - menu items, cart lines, orders, statuses, stations
//! - [`menu`] - the read-only [`MenuCatalog`](menu::MenuCatalog)
//! - [`order_actor`] and [`clients`] - the Order Store and its typed client
//! - [`relay`] - wire events, pub/sub hub, WebSocket sessions
//! - [`api`] - axum routes
//! - [`lifecycle`] - [`OrderSystem`](lifecycle::OrderSystem) wiring and shutdown
//! - [`client`] - dashboard-side cache, cart, views and the reconnecting [`RelayClient`](client::RelayClient)
//!
//! ### Running
//!
//! ```bash
//! RUST_LOG=order_relay=debug cargo run
//! ```

pub mod api;
pub mod client;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod order_actor;
pub mod relay;
pub mod state;
