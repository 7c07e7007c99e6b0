use crate::api::ApiError;
use crate::model::{MenuItem, Order, Station};
use crate::relay::run_session;
use crate::state::AppState;
use axum::Json;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};

/// GET /api/menu
pub async fn list_menu(State(state): State<AppState>) -> Json<Vec<MenuItem>> {
    Json(state.menu.list_items().to_vec())
}

/// GET /api/orders - newest-first
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_all().await?))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "clients": state.hub.subscriber_count(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    #[serde(default)]
    pub station: Station,
}

/// GET /ws?station=customer|kitchen|admin - upgrade to the relay
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_session(socket, state, params.station))
}
