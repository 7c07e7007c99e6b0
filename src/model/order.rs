/// Orders and their lifecycle.
///
/// # Actor Framework
/// [`Order`] implements the [`ActorEntity`](actor_framework::ActorEntity) trait (see
/// [`crate::order_actor`]), so the server keeps the authoritative copies inside a
/// [`ResourceActor`](actor_framework::ResourceActor).
use crate::model::MenuItem;
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Globally unique order identifier, a UUID string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Where an order is in the kitchen.
///
/// The lifecycle is linear: `new -> preparing -> ready -> delivered`. There is no way back and
/// no way to skip a step.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// The only status this one may move to.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::New => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Position in the lifecycle, `new` being 0.
    pub fn rank(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Button label for advancing an order out of this status.
    pub fn action_label(self) -> Option<&'static str> {
        match self {
            OrderStatus::New => Some("Start Preparing"),
            OrderStatus::Preparing => Some("Mark Ready"),
            OrderStatus::Ready => Some("Mark Delivered"),
            OrderStatus::Delivered => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status '{s}'"))
    }
}

/// A menu item snapshot plus how many of it were ordered.
///
/// Serialized flat, `{ ...menuItem, "quantity": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item: MenuItem, quantity: u32) -> Self {
        Self { item, quantity }
    }

    /// `price * quantity`, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.item.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.item.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Largest unit price accepted on placement.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Largest quantity accepted per line on placement.
pub const MAX_QUANTITY: u32 = 9999;

/// Exact sum of `price * quantity` over `lines`, saturating at [`Decimal::MAX`].
pub fn total_of(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.line_total()))
}

/// Exact sum of `price * quantity` over `lines`, or `None` if it does not fit.
pub fn checked_total(lines: &[CartLine]) -> Option<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.checked_line_total()?)
    })
}

/// A customer's order.
///
/// Only the status changes after placement, and only forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartLine>,
    pub table_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in state `new` with its total computed from `items`.
    pub fn new(
        id: OrderId,
        items: Vec<CartLine>,
        table_number: impl Into<String>,
        customer_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total_amount = total_of(&items);
        Self {
            id,
            items,
            table_number: table_number.into(),
            customer_name: customer_name.into(),
            status: OrderStatus::New,
            total_amount,
            created_at,
        }
    }

    /// Checks a submitted order against the placement rules and returns it with its total
    /// recomputed from the items.
    pub fn into_placed(mut self) -> Result<Self, OrderError> {
        if self.table_number.trim().is_empty() {
            return Err(OrderError::MissingTable);
        }
        if self.customer_name.trim().is_empty() {
            return Err(OrderError::MissingCustomer);
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for line in &self.items {
            if line.quantity == 0 {
                return Err(OrderError::InvalidItem {
                    item_id: line.item.id.clone(),
                    reason: "quantity must be at least 1".into(),
                });
            }
            if line.item.price.is_sign_negative() {
                return Err(OrderError::InvalidItem {
                    item_id: line.item.id.clone(),
                    reason: "price must not be negative".into(),
                });
            }
            if line.quantity > MAX_QUANTITY {
                return Err(OrderError::InvalidItem {
                    item_id: line.item.id.clone(),
                    reason: format!("quantity must be at most {MAX_QUANTITY}"),
                });
            }
            if line.item.price > MAX_PRICE {
                return Err(OrderError::InvalidItem {
                    item_id: line.item.id.clone(),
                    reason: format!("price must be at most {MAX_PRICE}"),
                });
            }
        }
        if self.status != OrderStatus::New {
            return Err(OrderError::InvalidInitialStatus(self.status));
        }

        let total = checked_total(&self.items).ok_or(OrderError::TotalOverflow)?;
        if total != self.total_amount {
            tracing::debug!(
                order_id = %self.id,
                submitted = %self.total_amount,
                computed = %total,
                "Replacing submitted total"
            );
        }
        self.total_amount = total;
        Ok(self)
    }

    /// Moves the order to `to` if it is the immediate successor of the current status.
    pub fn transition(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        if self.status.next() != Some(to) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }
}

/// Payload for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}
