//! # Generic Messages
//!
//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor), each carrying a oneshot reply channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// Resources managed this way are append-only: they are created, read and updated,
/// never removed.
///
/// - **Create**: builds a resource from [`ActorEntity::Create`] and replies with the stored copy.
/// - **Get**: fetches the current state of one resource by id.
/// - **Update**: applies [`ActorEntity::Update`] and replies with the new state.
/// - **List**: replies with a snapshot of every resource, most recently created first.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
}
