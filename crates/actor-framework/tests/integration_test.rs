use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    stage: u8,
}

#[derive(Debug)]
struct TicketCreate {
    id: u32,
}

#[derive(Debug)]
struct Advance {
    to: u8,
}

#[derive(Debug, thiserror::Error)]
enum TicketError {
    #[error("id 0 is reserved")]
    ReservedId,
    #[error("cannot move from {from} to {to}")]
    Skip { from: u8, to: u8 },
}

/// Records every committed change, in the order the actor reports them.
type Journal = Arc<Mutex<Vec<String>>>;

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = Advance;
    type Context = Journal;
    type Error = TicketError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(params: TicketCreate) -> Result<Self, Self::Error> {
        if params.id == 0 {
            return Err(TicketError::ReservedId);
        }
        Ok(Self {
            id: params.id,
            stage: 0,
        })
    }

    async fn on_update(&mut self, update: Advance, _ctx: &Journal) -> Result<(), Self::Error> {
        if update.to != self.stage + 1 {
            return Err(TicketError::Skip {
                from: self.stage,
                to: update.to,
            });
        }
        self.stage = update.to;
        Ok(())
    }

    async fn after_create(&self, journal: &Journal) {
        journal.lock().unwrap().push(format!("created {}", self.id));
    }

    async fn after_update(&self, journal: &Journal) {
        journal
            .lock()
            .unwrap()
            .push(format!("updated {} -> {}", self.id, self.stage));
    }
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let handle = tokio::spawn(actor.run(Journal::default()));

    for id in 1..=3 {
        client.create(TicketCreate { id }).await.unwrap();
    }

    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Journal::default()));

    client.create(TicketCreate { id: 7 }).await.unwrap();
    let second = client.create(TicketCreate { id: 7 }).await;

    assert!(matches!(second, Err(FrameworkError::AlreadyExists(id)) if id == "7"));
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_update_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Journal::default()));

    client.create(TicketCreate { id: 1 }).await.unwrap();
    let err = client.update(1, Advance { to: 3 }).await.unwrap_err();

    let inner = err.downcast_entity::<TicketError>();
    assert!(matches!(inner, Some(TicketError::Skip { from: 0, to: 3 })));

    let ticket = client.get(1).await.unwrap().unwrap();
    assert_eq!(ticket.stage, 0);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Journal::default()));

    let result = client.update(42, Advance { to: 1 }).await;
    assert!(matches!(result, Err(FrameworkError::NotFound(_))));
    assert!(client.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_creation_error_is_boxed() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(Journal::default()));

    let err = client.create(TicketCreate { id: 0 }).await.unwrap_err();
    assert!(matches!(
        err.downcast_entity::<TicketError>(),
        Some(TicketError::ReservedId)
    ));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_after_hooks_run_in_commit_order() {
    let journal = Journal::default();
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(journal.clone()));

    client.create(TicketCreate { id: 1 }).await.unwrap();
    client.create(TicketCreate { id: 2 }).await.unwrap();
    client.update(1, Advance { to: 1 }).await.unwrap();
    // Rejected updates are not journaled.
    let _ = client.update(2, Advance { to: 2 }).await;

    let entries = journal.lock().unwrap().clone();
    assert_eq!(
        entries,
        vec!["created 1", "created 2", "updated 1 -> 1"]
    );
}

#[tokio::test]
async fn test_closed_actor_reports_actor_closed() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    drop(actor);

    let result = client.list().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
