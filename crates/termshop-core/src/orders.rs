//! Order history types for `GET /orders`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A placed order as listed by the order-history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    /// Order total; absent on some backend revisions, in which case it
    /// defaults to zero rather than failing the whole listing.
    #[serde(default)]
    pub net_amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order_products: Vec<OrderItem>,
}

/// A product line within a placed order, flattened by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// Price of this order line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_decodes_with_camel_case_fields() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 9,
                "netAmount": "34.50",
                "createdAt": "2026-03-01T12:30:00.000Z",
                "orderProducts": [
                    {"id": 1, "name": "Cola", "price": "11.50", "quantity": 3}
                ]
            }"#,
        )
        .expect("order should decode");
        assert_eq!(order.net_amount, "34.50".parse::<Decimal>().unwrap());
        assert_eq!(order.order_products.len(), 1);
        assert_eq!(
            order.order_products[0].line_total(),
            "34.50".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn missing_net_amount_defaults_to_zero() {
        let order: Order =
            serde_json::from_str(r#"{"id":1,"createdAt":"2026-03-01T12:30:00Z"}"#)
                .expect("sparse order should decode");
        assert_eq!(order.net_amount, Decimal::ZERO);
        assert!(order.order_products.is_empty());
    }
}
