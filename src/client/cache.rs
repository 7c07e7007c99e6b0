//! Local mirror of the server's state.

use crate::menu::MenuCatalog;
use crate::model::{Order, OrderId, OrderStatus};
use crate::relay::ServerEvent;
use tracing::{debug, warn};

/// Menu and orders as last seen from the server, plus placements awaiting confirmation.
///
/// `orders` only ever holds server-confirmed orders. A placement sits in `pending` until the
/// server's `new_order` (or a snapshot containing its id) arrives.
#[derive(Debug, Clone, Default)]
pub struct OrderCache {
    menu: MenuCatalog,
    orders: Vec<Order>,
    pending: Vec<Order>,
}

impl OrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu(&self) -> &MenuCatalog {
        &self.menu
    }

    /// Confirmed orders, newest-first.
    pub fn list_all(&self) -> &[Order] {
        &self.orders
    }

    pub fn list_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    pub fn get(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn pending(&self) -> &[Order] {
        &self.pending
    }

    /// Records a placement sent to the server.
    pub fn track_pending(&mut self, order: Order) {
        if self.get(order.id).is_some() {
            return;
        }
        self.pending.retain(|p| p.id != order.id);
        self.pending.push(order);
    }

    /// Applies one server event.
    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::MenuUpdated(items) => self.menu = MenuCatalog::new(items),
            ServerEvent::OrdersUpdated(orders) => self.bootstrap(orders),
            ServerEvent::NewOrder(order) | ServerEvent::OrderUpdated(order) => self.upsert(order),
            ServerEvent::OrderRejected(rejected) => {
                if self.reject(rejected.order_id).is_some() {
                    warn!(order_id = %rejected.order_id, reason = %rejected.reason, "Placement rejected");
                }
            }
        }
    }

    /// Replaces the entry with the same id in place, or inserts it ahead of the first older
    /// order so the list stays newest-first. Idempotent.
    pub fn upsert(&mut self, order: Order) {
        self.pending.retain(|p| p.id != order.id);
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => {
                let pos = self
                    .orders
                    .iter()
                    .position(|o| o.created_at <= order.created_at)
                    .unwrap_or(self.orders.len());
                self.orders.insert(pos, order);
            }
        }
    }

    /// Replaces the whole order list with a server snapshot.
    pub fn bootstrap(&mut self, orders: Vec<Order>) {
        self.pending
            .retain(|p| !orders.iter().any(|o| o.id == p.id));
        debug!(orders = orders.len(), pending = self.pending.len(), "Bootstrapped");
        self.orders = orders;
    }

    /// Drops a pending placement, returning it.
    pub fn reject(&mut self, id: OrderId) -> Option<Order> {
        let pos = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(pos))
    }
}
