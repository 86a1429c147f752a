//! The pending cart for the current session.
//!
//! The cart owns the not-yet-submitted order lines. Every mutation
//! writes the full line list back to the record store so a restart
//! picks up where the customer left off. Storage failures never reach
//! the caller - the in-memory state stays usable and the write is
//! retried on the next mutation.

use serde::{Deserialize, Serialize};

use crate::models::CartItem;
use crate::storage::RecordStore;

/// Record name for the persisted cart. Must stay distinct from the
/// order ledger's record name.
pub const CART_RECORD: &str = "cart";

#[derive(Debug, Serialize, Deserialize)]
struct CartRecord {
    items: Vec<CartItem>,
}

/// State container for the session's pending order lines.
///
/// `menu_id` is unique within the cart; lines keep insertion order for
/// stable display. Totals are derived on every read and never stored.
#[derive(Debug)]
pub struct CartStore<S: RecordStore> {
    items: Vec<CartItem>,
    store: S,
}

impl<S: RecordStore> CartStore<S> {
    /// Loads the cart from the record store.
    ///
    /// A missing, corrupt, or unreadable record loads as an empty cart.
    pub fn load(store: S) -> Self {
        let items = match store.load(CART_RECORD) {
            Ok(Some(raw)) => match serde_json::from_str::<CartRecord>(&raw) {
                Ok(record) => record.items,
                Err(e) => {
                    tracing::warn!("Discarding unreadable cart record: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Cart storage unavailable, starting empty: {}", e);
                Vec::new()
            }
        };

        Self { items, store }
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a line to the cart.
    ///
    /// If a line with the same `menu_id` already exists, only its
    /// quantity grows by `item.quantity`; the existing line's name,
    /// price, image, and note are left untouched. Otherwise the item
    /// is appended. Callers validate `quantity > 0` before calling.
    pub fn add_item(&mut self, item: CartItem) {
        match self.items.iter_mut().find(|i| i.menu_id == item.menu_id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
        self.persist();
    }

    /// Sets a line's quantity. A quantity of zero or below removes the
    /// line; an absent `menu_id` is a no-op.
    pub fn update_quantity(&mut self, menu_id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove_item(menu_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.menu_id == menu_id) {
            item.quantity = quantity;
        }
        self.persist();
    }

    /// Removes the line with the given `menu_id` if present.
    pub fn remove_item(&mut self, menu_id: u32) {
        self.items.retain(|i| i.menu_id != menu_id);
        self.persist();
    }

    /// Empties the cart. The placement workflow calls this only after
    /// the order has been recorded in the ledger.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `unit_price * quantity` over all lines, recomputed fresh
    /// on every call.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    fn persist(&self) {
        let record = CartRecord {
            items: self.items.clone(),
        };
        let raw = match serde_json::to_string(&record) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not serialize cart record: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(CART_RECORD, &raw) {
            tracing::warn!("Could not persist cart: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileRecordStore, MemoryRecordStore, StorageError};
    use tempfile::TempDir;

    fn latte(quantity: u32) -> CartItem {
        CartItem::new(1, "Latte", 60.0, quantity)
    }

    fn mocha(quantity: u32) -> CartItem {
        CartItem::new(2, "Mocha", 75.0, quantity)
    }

    #[test]
    fn test_add_merges_quantity_for_same_menu_id() {
        let mut cart = CartStore::load(MemoryRecordStore::new());

        cart.add_item(latte(1));
        cart.add_item(latte(2));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 180.0);
    }

    #[test]
    fn test_add_merge_keeps_existing_display_copy() {
        let mut cart = CartStore::load(MemoryRecordStore::new());

        cart.add_item(latte(1).with_note("no sugar"));
        cart.add_item(CartItem::new(1, "Renamed Latte", 99.0, 1).with_note("extra shot"));

        let line = &cart.items()[0];
        assert_eq!(line.name, "Latte");
        assert_eq!(line.unit_price, 60.0);
        assert_eq!(line.note, Some("no sugar".to_string()));
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartStore::load(MemoryRecordStore::new());

        cart.add_item(mocha(1));
        cart.add_item(latte(1));
        cart.add_item(mocha(1));

        let ids: Vec<u32> = cart.items().iter().map(|i| i.menu_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = CartStore::load(MemoryRecordStore::new());
        cart.add_item(latte(1));

        cart.update_quantity(1, 5);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_price(), 300.0);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut via_update = CartStore::load(MemoryRecordStore::new());
        via_update.add_item(latte(1));
        via_update.add_item(mocha(2));
        via_update.update_quantity(1, 0);

        let mut via_remove = CartStore::load(MemoryRecordStore::new());
        via_remove.add_item(latte(1));
        via_remove.add_item(mocha(2));
        via_remove.remove_item(1);

        assert_eq!(via_update.items(), via_remove.items());
    }

    #[test]
    fn test_update_quantity_absent_id_is_noop() {
        let mut cart = CartStore::load(MemoryRecordStore::new());
        cart.add_item(latte(2));

        cart.update_quantity(99, 7);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = CartStore::load(MemoryRecordStore::new());
        cart.add_item(latte(2));

        cart.remove_item(99);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = CartStore::load(MemoryRecordStore::new());
        cart.add_item(latte(1));
        cart.add_item(mocha(1));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn test_totals_recomputed_after_mutation() {
        let mut cart = CartStore::load(MemoryRecordStore::new());
        cart.add_item(latte(1));
        assert_eq!(cart.total_price(), 60.0);

        cart.update_quantity(1, 4);
        assert_eq!(cart.total_price(), 240.0);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_reload_preserves_ordered_lines() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();

        {
            let mut cart = CartStore::load(FileRecordStore::new(dir.clone()));
            cart.add_item(mocha(2));
            cart.add_item(latte(1).with_note("oat milk"));
        }

        let reloaded = CartStore::load(FileRecordStore::new(dir));
        assert_eq!(reloaded.items().len(), 2);
        assert_eq!(reloaded.items()[0].menu_id, 2);
        assert_eq!(reloaded.items()[1].menu_id, 1);
        assert_eq!(reloaded.items()[1].note, Some("oat milk".to_string()));
        assert_eq!(reloaded.total_price(), 210.0);
    }

    #[test]
    fn test_corrupt_record_loads_as_empty() {
        let store = MemoryRecordStore::new();
        store.save(CART_RECORD, "not json {{{").unwrap();

        let cart = CartStore::load(store);
        assert!(cart.is_empty());
    }

    struct FailingStore;

    impl RecordStore for FailingStore {
        fn load(&self, _name: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn save(&self, _name: &str, _contents: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&self, _name: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut cart = CartStore::load(FailingStore);

        cart.add_item(latte(1));
        cart.update_quantity(1, 3);
        cart.remove_item(1);
        cart.add_item(mocha(2));
        cart.clear();

        assert!(cart.is_empty());
    }
}
