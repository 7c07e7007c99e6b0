//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a resource must implement to be owned by a
//! [`ResourceActor`](crate::ResourceActor). It names the identifier, the creation and update
//! payloads, the injected context and the error type, and exposes lifecycle hooks the actor
//! calls around every mutation.
//!
//! # Hooks
//!
//! The actor calls the hooks in this order:
//!
//! | Operation | Before commit | After commit |
//! |-----------|---------------|--------------|
//! | Create    | [`from_create_params`](ActorEntity::from_create_params), [`on_create`](ActorEntity::on_create) | [`after_create`](ActorEntity::after_create) |
//! | Update    | [`on_update`](ActorEntity::on_update) | [`after_update`](ActorEntity::after_update) |
//!
//! A failing "before" hook leaves the store untouched. The "after" hooks run once the change
//! is visible in the store and before the next request is processed, so anything they publish
//! is observed in commit order.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// Entities carry their own identifier: the id is chosen by whoever builds the creation
/// payload, and the actor refuses a second entity with an id it already holds.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this instance.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from its creation payload.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. Returning an error leaves the stored entity unchanged.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called once a new entity is stored.
    async fn after_create(&self, _ctx: &Self::Context) {}

    /// Called once an update is stored.
    async fn after_update(&self, _ctx: &Self::Context) {}
}
