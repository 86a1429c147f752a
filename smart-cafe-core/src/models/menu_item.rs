use serde::{Deserialize, Serialize};
use std::fmt;

/// A menu entry as served by the remote menu endpoint.
///
/// Menu items are display data only. When an item is added to the cart,
/// its name, price, and image are copied into the cart line so later
/// menu edits cannot change an order in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_id: u32,
    pub name: String,
    pub price: f64,
    /// Opaque image reference, passed through for display.
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MenuItem {
    pub fn new(menu_id: u32, name: impl Into<String>, price: f64) -> Self {
        Self {
            menu_id,
            name: name.into(),
            price,
            image: String::new(),
            category: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(
                f,
                "#{:<4} {:<24} {:>8.2}  [{}]",
                self.menu_id, self.name, self.price, category
            ),
            None => write!(f, "#{:<4} {:<24} {:>8.2}", self.menu_id, self.name, self.price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_item_new() {
        let item = MenuItem::new(4, "Latte", 60.0);
        assert_eq!(item.menu_id, 4);
        assert_eq!(item.name, "Latte");
        assert_eq!(item.price, 60.0);
        assert!(item.image.is_empty());
        assert!(item.category.is_none());
    }

    #[test]
    fn test_menu_item_builders() {
        let item = MenuItem::new(4, "Latte", 60.0)
            .with_image("latte.jpg")
            .with_category("hot-coffee");
        assert_eq!(item.image, "latte.jpg");
        assert_eq!(item.category, Some("hot-coffee".to_string()));
    }

    #[test]
    fn test_menu_item_json_field_names() {
        let item = MenuItem::new(4, "Latte", 60.0);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("menuId").is_some());
        assert!(json.get("price").is_some());
    }
}
