use crate::model::{Order, OrderStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The dashboard a connected party runs.
///
/// Decides which status changes that party may request: the kitchen drives an order through
/// preparation, and either the kitchen or an admin hands it over. Customers only place orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Station {
    #[default]
    Customer,
    Kitchen,
    Admin,
}

impl Station {
    pub fn may_advance_to(self, status: OrderStatus) -> bool {
        match status {
            OrderStatus::New => false,
            OrderStatus::Preparing | OrderStatus::Ready => self == Station::Kitchen,
            OrderStatus::Delivered => matches!(self, Station::Kitchen | Station::Admin),
        }
    }

    /// The status this station would move `order` to next, if it is allowed to.
    pub fn next_action(self, order: &Order) -> Option<OrderStatus> {
        order
            .status
            .next()
            .filter(|&status| self.may_advance_to(status))
    }
}

impl Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Station::Customer => "customer",
            Station::Kitchen => "kitchen",
            Station::Admin => "admin",
        };
        f.write_str(name)
    }
}
