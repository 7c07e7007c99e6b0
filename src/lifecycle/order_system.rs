use crate::clients::OrderClient;
use crate::config::Config;
use crate::menu::{MenuCatalog, MenuError};
use crate::relay::EventHub;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How long [`OrderSystem::shutdown`] waits for the order actor to drain.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Owns the running Order Store and the pieces every session shares.
///
/// # Example
///
/// ```rust
/// use order_relay::lifecycle::OrderSystem;
/// use order_relay::menu::MenuCatalog;
///
/// #[tokio::main]
/// async fn main() {
///     let system = OrderSystem::new(MenuCatalog::seed(), 64, 256);
///     assert!(system.order_client.list_all().await.unwrap().is_empty());
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct OrderSystem {
    /// Client for the Order actor
    pub order_client: OrderClient,

    /// Broadcast topic; also the order actor's context
    pub hub: EventHub,

    /// Immutable for the lifetime of the process
    pub menu: Arc<MenuCatalog>,

    handle: JoinHandle<()>,
}

impl OrderSystem {
    /// Spawns the order actor with the hub injected as its context.
    pub fn new(menu: MenuCatalog, order_capacity: usize, broadcast_capacity: usize) -> Self {
        let hub = EventHub::new(broadcast_capacity);
        let (order_actor, order_client) = crate::order_actor::new(order_capacity);
        let handle = tokio::spawn(order_actor.run(hub.clone()));

        info!(menu_items = menu.len(), "Order system started");
        Self {
            order_client,
            hub,
            menu: Arc::new(menu),
            handle,
        }
    }

    /// Builds the system from configuration, loading `MENU_PATH` when it is set.
    pub fn from_config(config: &Config) -> Result<Self, MenuError> {
        let menu = match &config.menu_path {
            Some(path) => MenuCatalog::from_json_file(path)?,
            None => MenuCatalog::seed(),
        };
        Ok(Self::new(
            menu,
            config.order_channel_capacity,
            config.broadcast_capacity,
        ))
    }

    /// Handles for the HTTP routes and WebSocket sessions.
    pub fn state(&self) -> AppState {
        AppState {
            orders: self.order_client.clone(),
            hub: self.hub.clone(),
            menu: Arc::clone(&self.menu),
        }
    }

    /// Drops this system's handles and waits for the order actor to exit.
    ///
    /// The actor only stops once every [`OrderClient`] clone is gone. Sessions that outlive
    /// the server still hold one, so the wait is bounded by [`SHUTDOWN_GRACE`].
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system...");
        drop(self.order_client);
        drop(self.hub);

        match tokio::time::timeout(SHUTDOWN_GRACE, self.handle).await {
            Ok(Ok(())) => {
                info!("Order system shutdown complete.");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Order actor failed: {:?}", e);
                Err(format!("Order actor failed: {:?}", e))
            }
            Err(_) => {
                warn!("Order actor still referenced after {:?}, leaving it", SHUTDOWN_GRACE);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLine, Order, OrderId};
    use chrono::Utc;

    #[tokio::test]
    async fn test_state_shares_the_running_store() {
        let system = OrderSystem::new(MenuCatalog::seed(), 8, 8);
        let state = system.state();

        let burger = system.menu.get("1").unwrap().clone();
        let order = Order::new(OrderId::new(), vec![CartLine::new(burger, 1)], "1", "Kim", Utc::now());
        state.orders.place(order.clone()).await.unwrap();

        let seen = system.order_client.list_all().await.unwrap();
        assert_eq!(seen[0].id, order.id);
        assert_eq!(state.menu.len(), 12);

        drop(state);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_menu_file_is_an_error() {
        let config = Config {
            menu_path: Some("/definitely/not/here/menu.json".into()),
            ..Config::default()
        };
        assert!(matches!(
            OrderSystem::from_config(&config),
            Err(MenuError::Io { .. })
        ));
    }
}
