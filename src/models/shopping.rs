//! Shopping list items

use serde::{Deserialize, Serialize};

const fn default_count() -> i32 {
    1
}

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Item name
    pub name: String,
    /// Aisle/category
    pub category: String,
    /// Quantity
    #[serde(default = "default_count")]
    pub count: i32,
}

impl ShoppingListItem {
    /// New unsaved item
    pub fn new(name: impl Into<String>, category: impl Into<String>, count: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            category: category.into(),
            count,
        }
    }
}
