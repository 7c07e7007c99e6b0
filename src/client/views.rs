//! Pure derivations over a list of orders.

use crate::model::{Order, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;

/// Everything the kitchen still has to act on, newest-first.
pub fn kitchen_queue(orders: &[Order]) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Delivered)
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub preparing: usize,
    pub ready: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::New => self.new,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::Ready => self.ready,
            OrderStatus::Delivered => self.delivered,
        }
    }

    fn bump(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::New => self.new += 1,
            OrderStatus::Preparing => self.preparing += 1,
            OrderStatus::Ready => self.ready += 1,
            OrderStatus::Delivered => self.delivered += 1,
        }
    }
}

/// Admin dashboard aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_orders: usize,
    pub total_revenue: Decimal,
    /// Zero when there are no orders.
    pub average_order_value: Decimal,
    pub status_counts: StatusCounts,
}

impl AdminStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut status_counts = StatusCounts::default();
        let mut total_revenue = Decimal::ZERO;
        for order in orders {
            status_counts.bump(order.status);
            total_revenue = total_revenue.saturating_add(order.total_amount);
        }

        let average_order_value = if orders.is_empty() {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(orders.len())
        };

        Self {
            total_orders: orders.len(),
            total_revenue,
            average_order_value,
            status_counts,
        }
    }

    /// Percentage of all orders currently in `status`, 0 when there are none.
    pub fn share(&self, status: OrderStatus) -> Decimal {
        if self.total_orders == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.status_counts.get(status)) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_orders)
    }
}
