//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order actor takes the [`EventHub`] as its context: once a placement or a status change
//! is committed, the order is published to every connected party from inside the actor loop,
//! so broadcasts go out in exactly the order the store applied them.

use crate::model::{Order, OrderId, StatusUpdate};
use crate::order_actor::OrderError;
use crate::relay::{EventHub, ServerEvent};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = Order;
    type Update = StatusUpdate;
    type Context = EventHub;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn from_create_params(params: Order) -> Result<Self, Self::Error> {
        params.into_placed()
    }

    async fn on_update(&mut self, update: StatusUpdate, _hub: &EventHub) -> Result<(), Self::Error> {
        self.transition(update.status)
    }

    async fn after_create(&self, hub: &EventHub) {
        hub.publish(ServerEvent::NewOrder(self.clone()));
    }

    async fn after_update(&self, hub: &EventHub) {
        hub.publish(ServerEvent::OrderUpdated(self.clone()));
    }
}
