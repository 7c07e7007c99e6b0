use crate::model::{total_of, CartLine, MenuItem, Order, OrderId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart is empty")]
    Empty,
    #[error("Table number is required")]
    MissingTable,
    #[error("Customer name is required")]
    MissingCustomer,
}

/// A customer's cart. Purely local until [`checkout`](Cart::checkout).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    pub table_number: String,
    pub customer_name: String,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one of `item`, snapshotting it on first add.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine::new(item.clone(), 1)),
        }
    }

    /// Removes one of `item_id`; the line disappears at zero. Returns false if it was absent.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let Some(pos) = self.lines.iter().position(|line| line.item.id == item_id) else {
            return false;
        };
        if self.lines[pos].quantity > 1 {
            self.lines[pos].quantity -= 1;
        } else {
            self.lines.remove(pos);
        }
        true
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Exact sum of `price * quantity`; equals the `totalAmount` the server stores.
    pub fn total(&self) -> Decimal {
        total_of(&self.lines)
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Freezes the cart into a `new` order with a fresh id and resets the cart.
    ///
    /// On error the cart is left untouched.
    pub fn checkout(&mut self, now: DateTime<Utc>) -> Result<Order, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        if self.table_number.trim().is_empty() {
            return Err(CartError::MissingTable);
        }
        if self.customer_name.trim().is_empty() {
            return Err(CartError::MissingCustomer);
        }

        let cart = std::mem::take(self);
        Ok(Order::new(
            OrderId::new(),
            cart.lines,
            cart.table_number.trim(),
            cart.customer_name.trim(),
            now,
        ))
    }
}
