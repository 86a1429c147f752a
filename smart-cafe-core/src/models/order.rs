//! Placed-order records kept in the local ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CartItem;

/// Status of a locally tracked order.
///
/// This is the narrower client-side domain. The backend additionally
/// knows `pending` and `confirmed`; those clamp to `Preparing` when a
/// server payload is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "Being prepared",
            OrderStatus::Ready => "Ready to serve",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!(
                "Unknown order status '{}'. Valid values: preparing, ready, completed, cancelled.",
                other
            )),
        }
    }
}

/// One line of a placed order - a frozen copy of the cart line at
/// placement time, independent of later menu changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OrderItem {
    /// Freeze a cart line into an order line.
    pub fn from_cart_line(line: &CartItem) -> Self {
        Self {
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            note: line.note.clone(),
        }
    }
}

/// A placed order as recorded in the local ledger.
///
/// `total_amount` and `total_items` are snapshotted at creation and
/// never recomputed from `items`, so the record always reflects what
/// the customer was shown at checkout. Only `status` is mutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub order_id: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub total_items: u32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl StoredOrder {
    /// Create a freshly placed order with status `preparing`.
    pub fn new(
        order_id: impl Into<String>,
        items: Vec<OrderItem>,
        total_amount: f64,
        total_items: u32,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            items,
            total_amount,
            total_items,
            status: OrderStatus::Preparing,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for StoredOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Order {}  [{}]  {}",
            self.order_id,
            self.status.label(),
            self.created_at.format("%Y-%m-%d %H:%M")
        )?;
        for item in &self.items {
            write!(f, "  {:<24} x{:<3}", item.name, item.quantity)?;
            writeln!(f, " {:>9.2}", item.unit_price * item.quantity as f64)?;
        }
        write!(
            f,
            "  {} item(s), total {:.2}",
            self.total_items, self.total_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_and_display() {
        for status in [
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }

        assert_eq!("READY".parse::<OrderStatus>().unwrap(), OrderStatus::Ready);
        assert!("pending".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_new_order_starts_preparing() {
        let order = StoredOrder::new("SC-00000001A", Vec::new(), 0.0, 0);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_order_item_from_cart_line() {
        let line = CartItem::new(3, "Latte", 60.0, 2).with_note("oat milk");
        let item = OrderItem::from_cart_line(&line);
        assert_eq!(item.name, "Latte");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, 60.0);
        assert_eq!(item.note, Some("oat milk".to_string()));
    }

    #[test]
    fn test_stored_order_json_layout() {
        let line = CartItem::new(3, "Latte", 60.0, 2);
        let order = StoredOrder::new("SC-00000001A", vec![OrderItem::from_cart_line(&line)], 120.0, 2);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderId"], "SC-00000001A");
        assert_eq!(json["totalAmount"], 120.0);
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["status"], "preparing");
        assert!(json["createdAt"].is_string());
        assert_eq!(json["items"][0]["unitPrice"], 60.0);

        let parsed: StoredOrder = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, order);
    }
}
