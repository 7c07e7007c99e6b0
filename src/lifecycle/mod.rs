//! Startup, wiring and shutdown.

pub mod order_system;
pub mod tracing;

pub use order_system::{OrderSystem, SHUTDOWN_GRACE};
pub use tracing::setup_tracing;
