//! Coordinating flows between the cart, the ledger, and the gateway.
//!
//! Placement follows a strict discipline: the cart is snapshotted once,
//! before any network suspension, and everything downstream - the
//! request body, the ledger entry, the totals - is built from that one
//! snapshot. The cart is never re-read after an await, since the
//! customer may have mutated it during a slow request.

use chrono::Utc;

use crate::cart::CartStore;
use crate::gateway::response::{extract_order, extract_order_id};
use crate::gateway::{NewOrderItem, OrderGateway};
use crate::ledger::OrderLedger;
use crate::models::{OrderItem, OrderStatus, StoredOrder};
use crate::order_id::synthesize_local_order_id;
use crate::storage::RecordStore;

/// Places the current cart as an order.
///
/// The gateway gets exactly one attempt. Whatever happens to it, a
/// ledger entry is written and the cart is cleared; the returned
/// identifier is either server-assigned or locally synthesized, so the
/// caller always has something to navigate to. This flow never fails
/// outward.
pub async fn place_order<S: RecordStore>(
    cart: &mut CartStore<S>,
    ledger: &OrderLedger<S>,
    gateway: &dyn OrderGateway,
) -> String {
    // Snapshot before the network call; see module docs.
    let snapshot = cart.items().to_vec();
    let total_items = cart.total_items();
    let total_amount = cart.total_price();

    let request_items: Vec<NewOrderItem> = snapshot
        .iter()
        .map(|line| NewOrderItem {
            menu_id: line.menu_id,
            quantity: line.quantity,
        })
        .collect();

    let order_id = match gateway.create_order(&request_items, total_amount).await {
        Ok(body) => match extract_order_id(&body) {
            Some(id) => id,
            None => {
                tracing::warn!("Order accepted but response carried no recognizable id");
                synthesize_local_order_id()
            }
        },
        Err(e) => {
            tracing::warn!("Order submission failed, keeping a local copy: {}", e);
            synthesize_local_order_id()
        }
    };

    let order = StoredOrder::new(
        order_id.clone(),
        snapshot.iter().map(OrderItem::from_cart_line).collect(),
        total_amount,
        total_items,
    );
    ledger.add_new_order(order);

    cart.clear();

    order_id
}

/// Looks up an order for tracking display.
///
/// The gateway is tried first; on failure or an unrecognized payload
/// the local ledger answers. `None` means neither side knows the
/// identifier - the caller renders a "not found" message.
pub async fn track_order<S: RecordStore>(
    ledger: &OrderLedger<S>,
    gateway: &dyn OrderGateway,
    order_id: &str,
) -> Option<StoredOrder> {
    match gateway.fetch_order(order_id).await {
        Ok(body) => {
            if let Some(order) = extract_order(&body, order_id, Utc::now()) {
                return Some(order);
            }
            tracing::debug!("Order response had no recognizable payload, trying local history");
        }
        Err(e) => {
            tracing::debug!("Order lookup failed, trying local history: {}", e);
        }
    }

    ledger.find_order(order_id)
}

/// Pushes a status change: best effort to the gateway, authoritative
/// write to the ledger.
pub async fn push_status_update<S: RecordStore>(
    ledger: &OrderLedger<S>,
    gateway: &dyn OrderGateway,
    order_id: &str,
    status: OrderStatus,
) {
    if let Err(e) = gateway.update_order_status(order_id, status).await {
        tracing::warn!("Status update not delivered to server: {}", e);
    }
    ledger.update_order_status(order_id, status);
}
