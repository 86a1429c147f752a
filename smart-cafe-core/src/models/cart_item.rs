use serde::{Deserialize, Serialize};
use std::fmt;

use super::MenuItem;

/// A single line in the pending cart.
///
/// Name, unit price, and image are snapshots taken when the item was
/// added; they are never re-read from the menu. `menu_id` is unique
/// within one cart - the store merges quantities on collision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_id: u32,
    pub name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    /// Optional customization note ("no sugar", "extra shot").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartItem {
    pub fn new(menu_id: u32, name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            menu_id,
            name: name.into(),
            unit_price,
            image: String::new(),
            quantity,
            note: None,
        }
    }

    /// Snapshot a cart line from a menu entry.
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self {
            menu_id: item.menu_id,
            name: item.name.clone(),
            unit_price: item.price,
            image: item.image.clone(),
            quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.is_empty() { None } else { Some(note) };
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Price of this line (unit price times quantity).
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

impl fmt::Display for CartItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} x{:<3} @ {:>7.2} = {:>9.2}",
            self.name,
            self.quantity,
            self.unit_price,
            self.line_total()
        )?;
        if let Some(note) = &self.note {
            write!(f, "  ({})", note)?;
        }
        Ok(())
    }
}
