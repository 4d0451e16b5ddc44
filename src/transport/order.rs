use serde::Deserialize;

use super::number::TransportInt;
use crate::domain::{Order, OrderId, ProductId};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON answer: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderListJson {
    #[serde(default)]
    order_entries: Option<Vec<OrderJson>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderJson {
    order_id: TransportInt,
    #[serde(default)]
    product_id: Option<TransportInt>,
    #[serde(default)]
    product_name: Option<String>,
    // The order listing names the subscriber code just `code`.
    #[serde(default, alias = "subscriberCode")]
    code: Option<String>,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    sn: Option<String>,
    #[serde(default)]
    smartcards: Option<Vec<String>>,
    #[serde(default)]
    sc_defect: Option<bool>,
    #[serde(default)]
    sc_disabled: Option<bool>,
    #[serde(default)]
    order_time: Option<String>,
    #[serde(default)]
    activation_time: Option<String>,
    #[serde(default)]
    expiry_time: Option<String>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    modified: Option<String>,
}

impl From<OrderJson> for Order {
    fn from(value: OrderJson) -> Self {
        Self {
            id: OrderId::new(value.order_id.value()),
            product_id: ProductId::new(value.product_id.map(TransportInt::value).unwrap_or(0)),
            product_name: value.product_name.unwrap_or_default(),
            subscriber_code: value.code,
            alias: value.alias,
            first_name: value.first_name,
            last_name: value.last_name,
            sn: value.sn,
            smartcards: value.smartcards.unwrap_or_default(),
            sc_defect: value.sc_defect.unwrap_or(false),
            sc_disabled: value.sc_disabled.unwrap_or(false),
            order_time: value.order_time,
            activation_time: value.activation_time,
            expiry_time: value.expiry_time,
            created: value.created,
            modified: value.modified,
        }
    }
}

/// Decode the answer of `getListOfOrders`.
pub fn decode_order_list(json: &str) -> Result<Vec<Order>, TransportError> {
    let parsed: OrderListJson = serde_json::from_str(json)?;
    Ok(parsed
        .order_entries
        .unwrap_or_default()
        .into_iter()
        .map(Order::from)
        .collect())
}

/// Decode the answer of `getOrdersOfSubscriber`, which is a bare array.
pub fn decode_order_array(json: &str) -> Result<Vec<Order>, TransportError> {
    let parsed: Option<Vec<OrderJson>> = serde_json::from_str(json)?;
    Ok(parsed
        .unwrap_or_default()
        .into_iter()
        .map(Order::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_order_list_maps_fields() {
        let json = r#"
        {
          "count": 1,
          "orderEntries": [
            {
              "orderId": 900,
              "productId": 42,
              "productName": "Sports HD",
              "code": "SUB-1",
              "smartcards": ["1234567890"],
              "scDisabled": true,
              "activationTime": "2025-01-01 00:00:00",
              "expiryTime": null
            }
          ]
        }
        "#;
        let orders = decode_order_list(json).unwrap();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.id, OrderId::new(900));
        assert_eq!(order.product_id, ProductId::new(42));
        assert_eq!(order.product_name, "Sports HD");
        assert_eq!(order.subscriber_code.as_deref(), Some("SUB-1"));
        assert_eq!(order.smartcards, vec!["1234567890".to_owned()]);
        assert!(order.sc_disabled);
        assert!(!order.sc_defect);
        assert_eq!(order.activation_time.as_deref(), Some("2025-01-01 00:00:00"));
        assert_eq!(order.expiry_time, None);
    }

    #[test]
    fn decode_order_array_accepts_bare_list() {
        let orders = decode_order_array(r#"[{"orderId": "7", "productId": 1}]"#).unwrap();
        assert_eq!(orders[0].id, OrderId::new(7));
        assert!(decode_order_array("null").unwrap().is_empty());
    }

    #[test]
    fn decode_order_list_requires_order_id() {
        assert!(decode_order_list(r#"{"orderEntries": [{"productId": 1}]}"#).is_err());
    }
}
