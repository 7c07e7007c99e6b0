//! # Order Client
//!
//! The Order Store API. Wraps a `ResourceClient<Order>` and translates framework failures
//! into [`OrderError`].
use crate::model::{Order, OrderId, OrderStatus, StatusUpdate};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Validation and the transition rules run inside the actor; this client only sends
/// requests and maps the replies.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new order and returns the stored copy. On success it is broadcast as
    /// `new_order` and becomes the first element of [`list_all`](Self::list_all).
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn place(&self, order: Order) -> Result<Order, OrderError> {
        debug!(?order, "place called");
        let stored = self.inner.create(order).await.map_err(Self::map_error)?;
        info!(table = %stored.table_number, total = %stored.total_amount, "Order placed");
        Ok(stored)
    }

    /// Moves an order to `status`. Fails with `NotFound` for unknown ids and with
    /// `InvalidTransition` unless `status` is the immediate successor of the current one.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(order_id, StatusUpdate { status })
            .await
            .map_err(Self::map_error)
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Option<Order>, OrderError> {
        ActorClient::get(self, order_id).await
    }

    /// Every order, newest-first.
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        self.list().await
    }

    /// Orders whose status is exactly `status`, newest-first.
    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        let orders = self.list().await?;
        Ok(orders
            .into_iter()
            .filter(|order| order.status == status)
            .collect())
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(order_error) = e.downcast_entity::<OrderError>() {
            return order_error.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::AlreadyExists(id) => OrderError::Duplicate(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
