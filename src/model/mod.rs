//! Domain types shared by the server and the dashboards.

pub mod menu;
pub mod order;
pub mod station;

pub use menu::MenuItem;
pub use order::{
    checked_total, total_of, CartLine, Order, OrderId, OrderStatus, StatusUpdate, MAX_PRICE,
    MAX_QUANTITY,
};
pub use station::Station;
