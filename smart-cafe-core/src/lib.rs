//! Smart Cafe Core Library
//!
//! Shared state containers and ordering logic for Smart Cafe clients.

pub mod cart;
pub mod gateway;
pub mod ledger;
pub mod models;
pub mod order_id;
pub mod storage;
pub mod workflow;

pub use cart::{CartStore, CART_RECORD};
pub use gateway::{GatewayError, HttpOrderGateway, NewOrderItem, OrderGateway};
pub use ledger::{OrderLedger, LEDGER_CAPACITY, ORDERS_RECORD};
pub use models::{CartItem, MenuItem, OrderItem, OrderStatus, StoredOrder};
pub use order_id::{synthesize_local_order_id, ORDER_ID_PREFIX};
pub use storage::{FileRecordStore, MemoryRecordStore, RecordStore, StorageError};
pub use workflow::{place_order, push_status_update, track_order};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
