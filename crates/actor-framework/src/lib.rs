//! # Actor Framework
//!
//! Building blocks for owning a collection of resources inside a single Tokio task and
//! talking to it through a cloneable, type-safe client.
//!
//! ## Why an actor?
//!
//! - **Single writer**: one task owns the store, so mutations never interleave.
//! - **Consistent reads**: a `list` reply is a snapshot taken between two mutations.
//! - **No locks**: callers only hold channel senders.
//!
//! ## Core Abstractions
//!
//! - [`ActorEntity`]: what a resource is, how it is created and updated, and the hooks the
//!   actor calls around each mutation.
//! - [`ResourceActor`]: the server half; owns the store and runs the request loop.
//! - [`ResourceClient`]: the client half; `create`, `get`, `update`, `list`.
//! - [`ActorClient`]: trait for domain-specific wrappers that want `get`/`list` for free.
//! - [`mock::MockClient`]: scripted client for tests.
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor, and every
//! hook receives them. A resource that must publish its changes takes the publisher as its
//! context and does so from [`ActorEntity::after_create`] / [`ActorEntity::after_update`],
//! which run in commit order.
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//! use tokio::sync::broadcast;
//!
//! #[derive(Clone, Debug)] struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate { id: u32, text: String }
//! #[derive(Debug)] struct NoteEdit(String);
//! #[derive(Debug, thiserror::Error)] #[error("empty note")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32;
//!     type Create = NoteCreate;
//!     type Update = NoteEdit;
//!     type Context = broadcast::Sender<String>;
//!     type Error = NoteError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(p: NoteCreate) -> Result<Self, NoteError> {
//!         if p.text.is_empty() { return Err(NoteError); }
//!         Ok(Self { id: p.id, text: p.text })
//!     }
//!
//!     async fn on_update(&mut self, edit: NoteEdit, _: &Self::Context) -> Result<(), NoteError> {
//!         self.text = edit.0;
//!         Ok(())
//!     }
//!
//!     async fn after_create(&self, tx: &Self::Context) {
//!         let _ = tx.send(self.text.clone());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = broadcast::channel(8);
//!     let (actor, client) = ResourceActor::<Note>::new(10);
//!     tokio::spawn(actor.run(tx));
//!
//!     client.create(NoteCreate { id: 1, text: "hello".into() }).await.unwrap();
//!     assert_eq!(rx.recv().await.unwrap(), "hello");
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
