//! Wire events.
//!
//! Every WebSocket text frame carries one event as `{"event": "<name>", "data": <payload>}`.

use crate::model::{MenuItem, Order, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// Intents sent by a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A complete order built by the customer's cart.
    PlaceOrder(Order),
    UpdateOrder(UpdateOrder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Events pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full menu, sent once when a party connects.
    MenuUpdated(Vec<MenuItem>),
    /// Full order list, newest-first. Sent when a party connects and whenever its
    /// subscription fell behind.
    OrdersUpdated(Vec<Order>),
    NewOrder(Order),
    OrderUpdated(Order),
    /// Placement failure, sent to the placing party only.
    OrderRejected(OrderRejected),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRejected {
    pub order_id: OrderId,
    pub reason: String,
}

impl ClientEvent {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ServerEvent {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::MenuUpdated(_) => "menu_updated",
            ServerEvent::OrdersUpdated(_) => "orders_updated",
            ServerEvent::NewOrder(_) => "new_order",
            ServerEvent::OrderUpdated(_) => "order_updated",
            ServerEvent::OrderRejected(_) => "order_rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_order_wire_shape() {
        let text = r#"{"event":"update_order","data":{"orderId":"6f1c2a4e-8a1b-4f7e-9d33-0c5b1f2e7a10","status":"preparing"}}"#;
        let event = ClientEvent::decode(text).unwrap();
        let ClientEvent::UpdateOrder(update) = event else {
            panic!("expected update_order");
        };
        assert_eq!(update.status, OrderStatus::Preparing);
        assert_eq!(
            update.order_id.to_string(),
            "6f1c2a4e-8a1b-4f7e-9d33-0c5b1f2e7a10"
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let text = r#"{"event":"update_order","data":{"orderId":"6f1c2a4e-8a1b-4f7e-9d33-0c5b1f2e7a10","status":"cancelled"}}"#;
        assert!(ClientEvent::decode(text).is_err());
    }

    #[test]
    fn test_server_event_names_match_tags() {
        let events = [
            ServerEvent::MenuUpdated(vec![]),
            ServerEvent::OrdersUpdated(vec![]),
            ServerEvent::OrderRejected(OrderRejected {
                order_id: OrderId::new(),
                reason: "Order has no items".into(),
            }),
        ];
        for event in events {
            let value: serde_json::Value = serde_json::from_str(&event.encode().unwrap()).unwrap();
            assert_eq!(value["event"], event.name());
        }
    }

    #[test]
    fn test_menu_updated_payload_is_an_array() {
        let value = serde_json::to_value(ServerEvent::MenuUpdated(vec![])).unwrap();
        assert_eq!(value, json!({ "event": "menu_updated", "data": [] }));
    }
}
