//! One WebSocket connection.
//!
//! A session bootstraps the party with `menu_updated` then `orders_updated`, then relays hub
//! events out and order intents in until either side goes away.

use crate::clients::OrderClient;
use crate::model::Station;
use crate::relay::{ClientEvent, OrderRejected, ServerEvent, UpdateOrder};
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

type WsSink = SplitSink<WebSocket, Message>;

#[derive(Debug, thiserror::Error)]
enum SendError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("socket closed: {0}")]
    Socket(#[from] axum::Error),
    #[error("order store unavailable: {0}")]
    Store(#[from] crate::order_actor::OrderError),
}

/// Drives a connected party until the socket closes.
#[instrument(skip_all, fields(session = %Uuid::new_v4().simple(), %station))]
pub async fn run_session(socket: WebSocket, state: AppState, station: Station) {
    info!("WebSocket connected");
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Subscribe before taking the snapshot so no commit falls between the two.
    let mut events = state.hub.subscribe();

    if let Err(e) = send_bootstrap(&mut ws_sink, &state).await {
        warn!("Bootstrap failed, disconnecting: {e}");
        return;
    }

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if let Err(e) = send_event(&mut ws_sink, &event).await {
                            warn!("Failed to relay {}: {e}", event.name());
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Subscriber lagged, re-sending order snapshot");
                        if let Err(e) = send_orders_snapshot(&mut ws_sink, &state.orders).await {
                            warn!("Resync failed: {e}");
                            break;
                        }
                    }
                    Err(RecvError::Closed) => {
                        info!("Hub closed");
                        break;
                    }
                }
            }
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let Some(reply) = handle_frame(text.as_str(), &state.orders, station).await else {
                            continue;
                        };
                        if let Err(e) = send_event(&mut ws_sink, &reply).await {
                            warn!("Failed to send {}: {e}", reply.name());
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("WebSocket disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {e}");
                        break;
                    }
                    _ => {} // Ping is answered by axum; Binary, Pong
                }
            }
        }
    }
}

/// Decodes one text frame and applies it. Returns the reply meant for this party only.
///
/// Malformed frames are logged and dropped.
pub async fn handle_frame(
    text: &str,
    orders: &OrderClient,
    station: Station,
) -> Option<ServerEvent> {
    match ClientEvent::decode(text) {
        Ok(event) => handle_client_event(event, orders, station).await,
        Err(e) => {
            warn!("Ignoring malformed frame: {e}");
            None
        }
    }
}

/// Applies one intent to the Order Store.
///
/// Successful changes are broadcast by the store itself, so the only direct reply is an
/// `order_rejected` for a placement that failed validation. Refused status changes are
/// silent no-ops.
pub async fn handle_client_event(
    event: ClientEvent,
    orders: &OrderClient,
    station: Station,
) -> Option<ServerEvent> {
    match event {
        ClientEvent::PlaceOrder(order) => {
            let order_id = order.id;
            match orders.place(order).await {
                Ok(_) => None,
                Err(e) => {
                    warn!(%order_id, "Placement rejected: {e}");
                    Some(ServerEvent::OrderRejected(OrderRejected {
                        order_id,
                        reason: e.to_string(),
                    }))
                }
            }
        }
        ClientEvent::UpdateOrder(UpdateOrder { order_id, status }) => {
            if !station.may_advance_to(status) {
                warn!(%order_id, %status, "Station may not set this status");
                return None;
            }
            if let Err(e) = orders.update_status(order_id, status).await {
                warn!(%order_id, %status, "Status update ignored: {e}");
            }
            None
        }
    }
}

async fn send_bootstrap(ws_sink: &mut WsSink, state: &AppState) -> Result<(), SendError> {
    send_event(
        ws_sink,
        &ServerEvent::MenuUpdated(state.menu.list_items().to_vec()),
    )
    .await?;
    send_orders_snapshot(ws_sink, &state.orders).await
}

async fn send_orders_snapshot(ws_sink: &mut WsSink, orders: &OrderClient) -> Result<(), SendError> {
    let snapshot = orders.list_all().await?;
    debug!(orders = snapshot.len(), "Sending snapshot");
    send_event(ws_sink, &ServerEvent::OrdersUpdated(snapshot)).await
}

async fn send_event(ws_sink: &mut WsSink, event: &ServerEvent) -> Result<(), SendError> {
    let json = event.encode()?;
    ws_sink.send(Message::Text(json.into())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLine, MenuItem, Order, OrderId, OrderStatus};
    use crate::order_actor;
    use crate::relay::EventHub;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn spawn_store() -> (OrderClient, EventHub) {
        let hub = EventHub::new(16);
        let (actor, client) = order_actor::new(16);
        tokio::spawn(actor.run(hub.clone()));
        (client, hub)
    }

    fn order_for(table: &str) -> Order {
        let fries = MenuItem::new("10", "Truffle Fries", Decimal::new(799, 2), "sides");
        Order::new(
            OrderId::new(),
            vec![CartLine::new(fries, 2)],
            table,
            "Ana",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_valid_placement_has_no_direct_reply() {
        let (orders, hub) = spawn_store();
        let mut rx = hub.subscribe();
        let order = order_for("4");

        let reply = handle_client_event(
            ClientEvent::PlaceOrder(order.clone()),
            &orders,
            Station::Customer,
        )
        .await;

        assert!(reply.is_none());
        assert!(matches!(rx.recv().await.unwrap(), ServerEvent::NewOrder(o) if o.id == order.id));
    }

    #[tokio::test]
    async fn test_invalid_placement_is_rejected_to_sender() {
        let (orders, _hub) = spawn_store();
        let order = order_for("  ");

        let reply = handle_client_event(
            ClientEvent::PlaceOrder(order.clone()),
            &orders,
            Station::Customer,
        )
        .await;

        let Some(ServerEvent::OrderRejected(rejected)) = reply else {
            panic!("expected order_rejected");
        };
        assert_eq!(rejected.order_id, order.id);
        assert!(orders.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_customer_cannot_advance_orders() {
        let (orders, _hub) = spawn_store();
        let placed = orders.place(order_for("2")).await.unwrap();

        let update = ClientEvent::UpdateOrder(UpdateOrder {
            order_id: placed.id,
            status: OrderStatus::Preparing,
        });
        assert!(handle_client_event(update, &orders, Station::Customer)
            .await
            .is_none());

        let stored = orders.list_all().await.unwrap();
        assert_eq!(stored[0].status, OrderStatus::New);
    }

    #[tokio::test]
    async fn test_malformed_frame_is_ignored() {
        let (orders, _hub) = spawn_store();
        assert!(handle_frame("{not json", &orders, Station::Kitchen)
            .await
            .is_none());
        assert!(handle_frame(r#"{"event":"shout","data":1}"#, &orders, Station::Kitchen)
            .await
            .is_none());
    }
}
