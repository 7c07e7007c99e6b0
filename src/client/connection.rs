//! Reconnecting WebSocket client for dashboards.
//!
//! 1. Connect to `/ws?station=...`
//! 2. Apply the bootstrap (`menu_updated`, `orders_updated`) and every later event to the cache
//! 3. Re-send placements still pending after a reconnect's bootstrap
//! 4. Reconnect with exponential backoff, keeping the last-known cache meanwhile
//!
//! Events emitted while disconnected are not replayed; the next bootstrap snapshot is the only
//! catch-up.

use crate::client::{Cart, CartError, OrderCache};
use crate::model::{Order, OrderId, OrderStatus, Station};
use crate::relay::{ClientEvent, ServerEvent, UpdateOrder};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Queued intents before `place`/`update_status` start waiting.
const INTENT_BUFFER: usize = 64;
/// Events buffered per [`RelayClient::subscribe`] receiver.
const EVENT_BUFFER: usize = 256;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error("relay client is stopped")]
    Stopped,
}

/// Backoff between reconnect attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl ReconnectPolicy {
    pub fn next_delay(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_delay)
    }
}

/// Handle to a background connection to the relay.
pub struct RelayClient {
    station: Station,
    cache: Arc<RwLock<OrderCache>>,
    intents: mpsc::Sender<ClientEvent>,
    events: broadcast::Sender<ServerEvent>,
    bootstraps: watch::Receiver<u64>,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl RelayClient {
    /// Starts connecting to `server` (e.g. `ws://127.0.0.1:3001`) as `station`.
    pub fn connect(server: &str, station: Station) -> Self {
        Self::connect_with(server, station, ReconnectPolicy::default())
    }

    pub fn connect_with(server: &str, station: Station, policy: ReconnectPolicy) -> Self {
        let url = format!("{}/ws?station={}", server.trim_end_matches('/'), station);
        let cache = Arc::new(RwLock::new(OrderCache::new()));
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_BUFFER);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (bootstrap_tx, bootstraps) = watch::channel(0);
        let shutdown = CancellationToken::new();

        let worker = Worker {
            url,
            policy,
            cache: Arc::clone(&cache),
            intents: intent_rx,
            events: events.clone(),
            bootstraps: bootstrap_tx,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(worker.run());

        Self {
            station,
            cache,
            intents: intent_tx,
            events,
            bootstraps,
            shutdown,
            task,
        }
    }

    pub fn station(&self) -> Station {
        self.station
    }

    /// Every server event as it is applied to the cache.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.events.subscribe()
    }

    /// Number of bootstrap snapshots applied so far. Grows by one per (re)connect and per
    /// lag resync.
    pub fn bootstrap_count(&self) -> u64 {
        *self.bootstraps.borrow()
    }

    /// Waits until more than `after` snapshots have been applied.
    pub async fn wait_for_bootstrap(&self, after: u64) -> Result<u64, ClientError> {
        let mut rx = self.bootstraps.clone();
        let count = rx
            .wait_for(|count| *count > after)
            .await
            .map_err(|_| ClientError::Stopped)?;
        Ok(*count)
    }

    /// A copy of the current cache.
    pub async fn snapshot(&self) -> OrderCache {
        self.cache.read().await.clone()
    }

    /// Confirmed orders, newest-first.
    pub async fn orders(&self) -> Vec<Order> {
        self.cache.read().await.list_all().to_vec()
    }

    /// Checks out `cart` and sends the order. The cart is reset only once the order is
    /// queued; on any error it is left as it was.
    pub async fn checkout(&self, cart: &mut Cart) -> Result<Order, ClientError> {
        let saved = cart.clone();
        let order = cart.checkout(Utc::now())?;
        if let Err(e) = self.place(order.clone()).await {
            *cart = saved;
            return Err(e);
        }
        Ok(order)
    }

    /// Sends a placement. It stays pending until the server confirms or rejects it.
    pub async fn place(&self, order: Order) -> Result<OrderId, ClientError> {
        let id = order.id;
        self.cache.write().await.track_pending(order.clone());
        if let Err(e) = self.send(ClientEvent::PlaceOrder(order)).await {
            self.cache.write().await.reject(id);
            return Err(e);
        }
        Ok(id)
    }

    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        self.send(ClientEvent::UpdateOrder(UpdateOrder { order_id, status }))
            .await
    }

    async fn send(&self, event: ClientEvent) -> Result<(), ClientError> {
        self.intents
            .send(event)
            .await
            .map_err(|_| ClientError::Stopped)
    }

    /// Closes the connection and waits for the background task.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            warn!("Relay client task failed: {e}");
        }
    }
}

struct Worker {
    url: String,
    policy: ReconnectPolicy,
    cache: Arc<RwLock<OrderCache>>,
    intents: mpsc::Receiver<ClientEvent>,
    events: broadcast::Sender<ServerEvent>,
    bootstraps: watch::Sender<u64>,
    shutdown: CancellationToken,
}

enum Disconnect {
    Lost,
    Stop,
}

impl Worker {
    async fn run(mut self) {
        info!(url = %self.url, "Relay client started");
        let mut delay = self.policy.initial_delay;

        loop {
            if self.shutdown.is_cancelled() {
                break;
            }

            let attempt = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                attempt = tokio_tungstenite::connect_async(self.url.as_str()) => attempt,
            };
            match attempt {
                Ok((ws, _)) => {
                    info!("Connected");
                    delay = self.policy.initial_delay;
                    if let Disconnect::Stop = self.run_connection(ws).await {
                        break;
                    }
                    warn!("Connection lost, keeping last-known state");
                }
                Err(e) => {
                    warn!(delay_ms = delay.as_millis() as u64, "Connect failed: {e}");
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {},
            }
            delay = self.policy.next_delay(delay);
        }

        info!("Relay client stopped");
    }

    async fn run_connection(&mut self, ws: WsStream) -> Disconnect {
        let (mut ws_sink, mut ws_stream) = ws.split();
        let mut bootstrapped = false;
        // Placements already written to this connection.
        let mut sent: HashSet<OrderId> = HashSet::new();

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    let _ = ws_sink.close().await;
                    return Disconnect::Stop;
                }

                intent = self.intents.recv() => {
                    let Some(intent) = intent else {
                        let _ = ws_sink.close().await;
                        return Disconnect::Stop;
                    };
                    if let ClientEvent::PlaceOrder(order) = &intent {
                        if !sent.insert(order.id) {
                            continue;
                        }
                    }
                    if let Err(e) = send_intent(&mut ws_sink, &intent).await {
                        // Placements stay pending and are re-sent after the next bootstrap.
                        warn!("Failed to send intent: {e}");
                        return Disconnect::Lost;
                    }
                }

                msg = ws_stream.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let event = match ServerEvent::decode(text.as_str()) {
                                Ok(event) => event,
                                Err(e) => {
                                    warn!("Ignoring malformed event: {e}");
                                    continue;
                                }
                            };
                            let is_snapshot = matches!(event, ServerEvent::OrdersUpdated(_));
                            let resend = self.apply(event).await;

                            if is_snapshot && !bootstrapped {
                                bootstrapped = true;
                                for order in resend {
                                    if !sent.insert(order.id) {
                                        continue;
                                    }
                                    debug!(order_id = %order.id, "Re-sending pending placement");
                                    if let Err(e) = send_intent(&mut ws_sink, &ClientEvent::PlaceOrder(order)).await {
                                        warn!("Failed to re-send placement: {e}");
                                        return Disconnect::Lost;
                                    }
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => return Disconnect::Lost,
                        Some(Err(e)) => {
                            warn!("WebSocket error: {e}");
                            return Disconnect::Lost;
                        }
                        _ => {} // Ping is answered by tungstenite
                    }
                }
            }
        }
    }

    /// Applies `event` and returns the placements still pending afterwards.
    async fn apply(&self, event: ServerEvent) -> Vec<Order> {
        let is_snapshot = matches!(event, ServerEvent::OrdersUpdated(_));
        let pending = {
            let mut cache = self.cache.write().await;
            cache.apply(event.clone());
            cache.pending().to_vec()
        };
        if is_snapshot {
            self.bootstraps.send_modify(|count| *count += 1);
        }
        let _ = self.events.send(event);
        pending
    }
}

async fn send_intent(
    ws_sink: &mut futures::stream::SplitSink<WsStream, Message>,
    intent: &ClientEvent,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = intent.encode()?;
    ws_sink.send(Message::Text(json.into())).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_up_to_max() {
        let policy = ReconnectPolicy {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };
        let mut delay = policy.initial_delay;
        let mut seen = vec![];
        for _ in 0..4 {
            delay = policy.next_delay(delay);
            seen.push(delay.as_millis());
        }
        assert_eq!(seen, vec![200, 350, 350, 350]);
    }

    #[tokio::test]
    async fn test_unreachable_server_keeps_empty_cache() {
        let client = RelayClient::connect_with(
            "ws://127.0.0.1:9",
            Station::Kitchen,
            ReconnectPolicy {
                initial_delay: Duration::from_millis(10),
                max_delay: Duration::from_millis(20),
            },
        );
        tokio::time::sleep(Duration::from_millis(50)).await;

        let cache = client.snapshot().await;
        assert!(cache.menu().is_empty());
        assert!(cache.list_all().is_empty());
        assert_eq!(client.bootstrap_count(), 0);

        client.shutdown().await;
    }

    #[tokio::test]
    async fn test_checkout_on_stopped_client_keeps_cart() {
        let client = RelayClient::connect_with(
            "ws://127.0.0.1:9",
            Station::Customer,
            ReconnectPolicy::default(),
        );
        client.shutdown.cancel();
        while !client.intents.is_closed() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let mut cart = Cart::new();
        cart.add(&crate::menu::MenuCatalog::seed().list_items()[0]);
        cart.table_number = "8".into();
        cart.customer_name = "Lu".into();
        let before = cart.clone();

        let err = client.checkout(&mut cart).await.unwrap_err();
        assert!(matches!(err, ClientError::Stopped));
        assert_eq!(cart, before);
        assert!(client.snapshot().await.pending().is_empty());
    }
}
