//! Dashboard-side tests: the reconnecting client against a live server and a scripted one,
//! and cart totals against what the store records.

use futures::{SinkExt, StreamExt};
use order_relay::api;
use order_relay::client::{kitchen_queue, AdminStats, Cart, RelayClient, ReconnectPolicy};
use order_relay::lifecycle::OrderSystem;
use order_relay::menu::MenuCatalog;
use order_relay::model::{Order, OrderStatus, Station};
use order_relay::relay::{ClientEvent, ServerEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

const WAIT: Duration = Duration::from_secs(5);

fn fast_retry() -> ReconnectPolicy {
    ReconnectPolicy {
        initial_delay: Duration::from_millis(20),
        max_delay: Duration::from_millis(100),
    }
}

async fn start_server() -> (SocketAddr, OrderSystem) {
    let system = OrderSystem::new(MenuCatalog::seed(), 64, 64);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = api::router(system.state());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, system)
}

/// Waits for the first event matching `pred`.
async fn wait_for(
    rx: &mut tokio::sync::broadcast::Receiver<ServerEvent>,
    pred: impl Fn(&ServerEvent) -> bool,
) -> ServerEvent {
    tokio::time::timeout(WAIT, async {
        loop {
            let event = rx.recv().await.expect("Client stopped");
            if pred(&event) {
                return event;
            }
        }
    })
    .await
    .expect("Timed out waiting for event")
}

#[tokio::test]
async fn test_customer_and_kitchen_dashboards() {
    let (addr, _system) = start_server().await;
    let server = format!("ws://{addr}");

    let customer = RelayClient::connect_with(&server, Station::Customer, fast_retry());
    let kitchen = RelayClient::connect_with(&server, Station::Kitchen, fast_retry());
    customer.wait_for_bootstrap(0).await.unwrap();
    kitchen.wait_for_bootstrap(0).await.unwrap();

    let menu = customer.snapshot().await.menu().clone();
    assert_eq!(menu.len(), 12);

    let mut cart = Cart::new();
    let burger = menu.get("1").unwrap();
    cart.add(burger);
    cart.add(burger);
    cart.add(menu.get("12").unwrap());
    cart.table_number = "5".into();
    cart.customer_name = "Ana".into();
    let cart_total = cart.total();

    let mut customer_events = customer.subscribe();
    let mut kitchen_events = kitchen.subscribe();
    let order = customer.checkout(&mut cart).await.unwrap();
    assert!(cart.is_empty());

    let id = order.id;
    wait_for(&mut customer_events, |e| matches!(e, ServerEvent::NewOrder(o) if o.id == id)).await;
    wait_for(&mut kitchen_events, |e| matches!(e, ServerEvent::NewOrder(o) if o.id == id)).await;

    let confirmed = customer.snapshot().await;
    assert!(confirmed.pending().is_empty());
    assert_eq!(confirmed.list_all()[0].total_amount, cart_total);

    kitchen.update_status(id, OrderStatus::Preparing).await.unwrap();
    wait_for(&mut customer_events, |e| {
        matches!(e, ServerEvent::OrderUpdated(o) if o.status == OrderStatus::Preparing)
    })
    .await;

    // Customers cannot advance orders; the kitchen's next step still applies afterwards.
    customer.update_status(id, OrderStatus::Ready).await.unwrap();
    kitchen.update_status(id, OrderStatus::Ready).await.unwrap();
    wait_for(&mut kitchen_events, |e| {
        matches!(e, ServerEvent::OrderUpdated(o) if o.status == OrderStatus::Ready)
    })
    .await;

    let orders = kitchen.orders().await;
    assert_eq!(kitchen_queue(&orders).len(), 1);
    let stats = AdminStats::from_orders(&orders);
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.total_revenue, cart_total);
    assert_eq!(stats.status_counts.ready, 1);

    customer.shutdown().await;
    kitchen.shutdown().await;
}

/// A placement lost with the connection is re-sent after the next bootstrap, and the cache
/// survives the outage.
#[tokio::test]
async fn test_reconnect_resends_pending_placement() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = RelayClient::connect_with(&format!("ws://{addr}"), Station::Customer, fast_retry());

    // First connection: bootstrap, swallow the placement, hang up.
    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    let menu = MenuCatalog::seed().list_items().to_vec();
    send(&mut ws, &ServerEvent::MenuUpdated(menu)).await;
    send(&mut ws, &ServerEvent::OrdersUpdated(vec![])).await;
    client.wait_for_bootstrap(0).await.unwrap();

    let mut cart = Cart::new();
    cart.add(&MenuCatalog::seed().list_items()[0]);
    cart.table_number = "3".into();
    cart.customer_name = "Bo".into();
    let order = client.checkout(&mut cart).await.unwrap();

    let first = next_intent(&mut ws).await;
    assert!(matches!(first, ClientEvent::PlaceOrder(ref o) if o.id == order.id));
    drop(ws);

    // Second connection: the client re-sends once it has the snapshot.
    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    assert_eq!(client.snapshot().await.menu().len(), 12);
    assert_eq!(client.snapshot().await.pending().len(), 1);

    send(&mut ws, &ServerEvent::OrdersUpdated(vec![])).await;
    let resent = match next_intent(&mut ws).await {
        ClientEvent::PlaceOrder(order) => order,
        other => panic!("expected place_order, got {other:?}"),
    };
    assert_eq!(resent.id, order.id);

    let mut events = client.subscribe();
    send(&mut ws, &ServerEvent::NewOrder(resent.clone())).await;
    wait_for(&mut events, |e| matches!(e, ServerEvent::NewOrder(_))).await;

    let cache = client.snapshot().await;
    assert!(cache.pending().is_empty());
    assert_eq!(cache.list_all(), &[resent]);

    client.shutdown().await;
}

/// A placement queued before the first connection goes out exactly once, even though it is
/// still pending when the bootstrap snapshot arrives.
#[tokio::test]
async fn test_placement_queued_before_connect_is_sent_once() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let client = RelayClient::connect_with(&format!("ws://{addr}"), Station::Customer, fast_retry());

    let mut cart = Cart::new();
    cart.add(&MenuCatalog::seed().list_items()[0]);
    cart.table_number = "6".into();
    cart.customer_name = "Ola".into();
    let order = client.checkout(&mut cart).await.unwrap();

    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    send(&mut ws, &ServerEvent::MenuUpdated(MenuCatalog::seed().list_items().to_vec())).await;
    send(&mut ws, &ServerEvent::OrdersUpdated(vec![])).await;
    client.wait_for_bootstrap(0).await.unwrap();

    let first = next_intent(&mut ws).await;
    assert!(matches!(first, ClientEvent::PlaceOrder(ref o) if o.id == order.id));
    if let Ok(Some(Ok(Message::Text(text)))) =
        tokio::time::timeout(Duration::from_millis(200), ws.next()).await
    {
        panic!("expected a single placement, got {}", text.as_str());
    }
    assert_eq!(client.snapshot().await.pending().len(), 1);

    client.shutdown().await;
}

async fn send<S>(ws: &mut tokio_tungstenite::WebSocketStream<S>, event: &ServerEvent)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    ws.send(Message::Text(event.encode().unwrap().into()))
        .await
        .unwrap();
}

async fn next_intent<S>(ws: &mut tokio_tungstenite::WebSocketStream<S>) -> ClientEvent
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    loop {
        let msg = tokio::time::timeout(WAIT, ws.next())
            .await
            .expect("Timed out waiting for intent")
            .expect("Socket closed")
            .expect("Socket error");
        if let Message::Text(text) = msg {
            return ClientEvent::decode(text.as_str()).unwrap();
        }
    }
}

/// Random carts: the cart total, the stored total and an integer-cents sum all agree.
#[tokio::test]
async fn test_random_cart_totals_match_store() {
    let system = OrderSystem::new(MenuCatalog::seed(), 64, 16);
    let menu = MenuCatalog::seed();
    let items = menu.list_items();
    let mut rng = StdRng::seed_from_u64(0x0dde_4e1a);

    for round in 0..1000 {
        let mut cart = Cart::new();
        let mut expected_cents: i64 = 0;
        for _ in 0..rng.gen_range(1..=8) {
            let item = &items[rng.gen_range(0..items.len())];
            for _ in 0..rng.gen_range(1..=5) {
                cart.add(item);
                expected_cents += i64::try_from(item.price * Decimal::from(100)).unwrap();
            }
        }
        cart.table_number = (round % 20 + 1).to_string();
        cart.customer_name = format!("Guest {round}");

        let cart_total = cart.total();
        let order: Order = cart.checkout(chrono::Utc::now()).unwrap();
        let stored = system.order_client.place(order).await.unwrap();

        assert_eq!(stored.total_amount, cart_total);
        assert_eq!(cart_total, Decimal::new(expected_cents, 2));
    }

    let stats = AdminStats::from_orders(&system.order_client.list_all().await.unwrap());
    assert_eq!(stats.total_orders, 1000);
}
