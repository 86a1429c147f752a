//! Normalization of the ordering API's response shapes.
//!
//! The backend wraps the same logical payload in several nestings
//! depending on endpoint and version: a bare field, a `data` object, or
//! a list under `data`. Each extractor here is an ordered chain of
//! shape probes; the first probe that matches wins, and an unrecognized
//! shape degrades to "absent" rather than an error.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{MenuItem, OrderItem, OrderStatus, StoredOrder};

/// One probe for a known response shape.
type Shape = fn(&Value) -> Option<&Value>;

// --- order id ---------------------------------------------------------

fn nested_order_id(body: &Value) -> Option<&Value> {
    body.get("data")?.get("orderId")
}

fn top_level_order_id(body: &Value) -> Option<&Value> {
    body.get("orderId")
}

fn top_level_id(body: &Value) -> Option<&Value> {
    body.get("id")
}

const ORDER_ID_SHAPES: &[Shape] = &[nested_order_id, top_level_order_id, top_level_id];

/// Extracts a server-assigned order identifier, trying the known
/// shapes in priority order. Returns `None` when no shape matches,
/// which callers treat as "synthesize a local id".
pub fn extract_order_id(body: &Value) -> Option<String> {
    ORDER_ID_SHAPES.iter().find_map(|shape| shape(body)).and_then(id_string)
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// --- menu -------------------------------------------------------------

fn nested_menu_list(body: &Value) -> Option<&Value> {
    body.get("data")?.get("menus").filter(|v| v.is_array())
}

fn nested_data_list(body: &Value) -> Option<&Value> {
    body.get("data").filter(|v| v.is_array())
}

fn bare_list(body: &Value) -> Option<&Value> {
    body.is_array().then_some(body)
}

const MENU_LIST_SHAPES: &[Shape] = &[nested_menu_list, nested_data_list, bare_list];

/// Extracts the menu list. Entries that cannot be read are skipped;
/// an unrecognized body yields an empty list.
pub fn extract_menu_items(body: &Value) -> Vec<MenuItem> {
    let Some(list) = MENU_LIST_SHAPES.iter().find_map(|shape| shape(body)) else {
        tracing::warn!("Menu response had no recognizable list shape");
        return Vec::new();
    };

    list.as_array()
        .map(|entries| entries.iter().filter_map(menu_item_from_value).collect())
        .unwrap_or_default()
}

fn nested_object(body: &Value) -> Option<&Value> {
    body.get("data").filter(|v| v.is_object())
}

fn bare_object(body: &Value) -> Option<&Value> {
    body.is_object().then_some(body)
}

const SINGLE_OBJECT_SHAPES: &[Shape] = &[nested_object, bare_object];

/// Extracts a single menu item from a detail response.
pub fn extract_menu_item(body: &Value) -> Option<MenuItem> {
    SINGLE_OBJECT_SHAPES
        .iter()
        .find_map(|shape| shape(body))
        .and_then(menu_item_from_value)
}

/// Reads one menu entry, tolerating the `menuid`/`id` and
/// `img`/`image` field aliases the backend has shipped over time.
fn menu_item_from_value(value: &Value) -> Option<MenuItem> {
    let menu_id = value
        .get("menuid")
        .or_else(|| value.get("id"))
        .and_then(Value::as_u64)? as u32;
    let name = value.get("name")?.as_str()?.to_string();
    let price = value.get("price")?.as_f64()?;
    let image = value
        .get("img")
        .or_else(|| value.get("image"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let category = value
        .get("category")
        .and_then(Value::as_str)
        .map(String::from);

    Some(MenuItem {
        menu_id,
        name,
        price,
        image,
        category,
    })
}

// --- order payload ----------------------------------------------------

/// Reconstructs a [`StoredOrder`] from an order-detail response.
///
/// Missing fields degrade to defaults rather than failing: no total
/// reads as zero, an unknown status clamps to `preparing`, and a
/// missing or unparseable timestamp falls back to `fetched_at`. The
/// caller's `order_id` is used when the payload carries none.
pub fn extract_order(body: &Value, order_id: &str, fetched_at: DateTime<Utc>) -> Option<StoredOrder> {
    let payload = SINGLE_OBJECT_SHAPES
        .iter()
        .find_map(|shape| shape(body).filter(|v| looks_like_order(v)))?;

    let items: Vec<OrderItem> = payload
        .get("items")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(order_item_from_value).collect())
        .unwrap_or_default();

    let order_id = payload
        .get("id")
        .or_else(|| payload.get("orderId"))
        .and_then(id_string)
        .unwrap_or_else(|| order_id.to_string());

    let total_amount = payload
        .get("totalPrice")
        .or_else(|| payload.get("totalAmount"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);

    let total_items = payload
        .get("totalItems")
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64) as u32;

    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .unwrap_or(OrderStatus::Preparing);

    let created_at = payload
        .get("createdAt")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(fetched_at);

    Some(StoredOrder {
        order_id,
        items,
        total_amount,
        total_items,
        status,
        created_at,
    })
}

fn looks_like_order(value: &Value) -> bool {
    value.get("items").is_some()
        || value.get("status").is_some()
        || value.get("id").is_some()
        || value.get("orderId").is_some()
}

fn order_item_from_value(value: &Value) -> Option<OrderItem> {
    let name = value.get("name")?.as_str()?.to_string();
    let quantity = value
        .get("quantity")
        .or_else(|| value.get("qty"))
        .and_then(Value::as_u64)
        .unwrap_or(1) as u32;
    let unit_price = value
        .get("price")
        .or_else(|| value.get("unitPrice"))
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let note = value
        .get("note")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from);

    Some(OrderItem {
        name,
        quantity,
        unit_price,
        note,
    })
}
