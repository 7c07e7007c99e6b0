use crate::clients::OrderClient;
use crate::menu::MenuCatalog;
use crate::relay::EventHub;
use std::sync::Arc;

/// Shared handles given to every HTTP handler and WebSocket session.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub hub: EventHub,
    pub menu: Arc<MenuCatalog>,
}
