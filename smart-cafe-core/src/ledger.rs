//! Client-local ledger of placed orders.
//!
//! The ledger is the primary source for history and tracking display
//! and the fallback when the remote gateway is unreachable. It reads
//! and rewrites its record on every operation and never propagates a
//! storage failure - a page must not crash because storage is gone.

use crate::models::{OrderStatus, StoredOrder};
use crate::storage::RecordStore;

/// Record name for the persisted ledger. Must stay distinct from the
/// cart's record name.
pub const ORDERS_RECORD: &str = "orders";

/// The ledger keeps only the most recent orders; older entries are
/// truncated on insert.
pub const LEDGER_CAPACITY: usize = 20;

/// Durable record of orders the customer has placed, most-recent-first.
#[derive(Debug)]
pub struct OrderLedger<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> OrderLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all ledger entries, most recently added first.
    ///
    /// Missing, corrupt, or unreadable storage yields an empty list,
    /// never an error.
    pub fn stored_orders(&self) -> Vec<StoredOrder> {
        match self.store.load(ORDERS_RECORD) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(orders) => orders,
                Err(e) => {
                    tracing::warn!("Discarding unreadable order ledger: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Order ledger unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Finds an order by its identifier.
    pub fn find_order(&self, order_id: &str) -> Option<StoredOrder> {
        self.stored_orders()
            .into_iter()
            .find(|o| o.order_id == order_id)
    }

    /// Inserts an order at the front and truncates the ledger to the
    /// most recent [`LEDGER_CAPACITY`] entries.
    ///
    /// No de-duplication: inserting the same `order_id` twice keeps
    /// both entries.
    pub fn add_new_order(&self, order: StoredOrder) {
        let mut orders = self.stored_orders();
        orders.insert(0, order);
        orders.truncate(LEDGER_CAPACITY);
        self.persist(&orders);
    }

    /// Overwrites the status of the first entry with a matching
    /// `order_id`. No-op if the order is not in the ledger; no other
    /// field is touched.
    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) {
        let mut orders = self.stored_orders();
        if let Some(order) = orders.iter_mut().find(|o| o.order_id == order_id) {
            order.status = status;
            self.persist(&orders);
        }
    }

    /// Erases the entire ledger. Support/reset flows only.
    pub fn clear_all(&self) {
        if let Err(e) = self.store.remove(ORDERS_RECORD) {
            tracing::warn!("Could not clear order ledger: {}", e);
        }
    }

    fn persist(&self, orders: &[StoredOrder]) {
        let raw = match serde_json::to_string(orders) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not serialize order ledger: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(ORDERS_RECORD, &raw) {
            tracing::warn!("Could not persist order ledger: {}", e);
        }
    }
}
