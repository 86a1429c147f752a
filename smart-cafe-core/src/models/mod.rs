mod cart_item;
mod menu_item;
mod order;

pub use cart_item::CartItem;
pub use menu_item::MenuItem;
pub use order::{OrderItem, OrderStatus, StoredOrder};
