//! Recipe books (user-curated collections of recipes)

use serde::{Deserialize, Deserializer, Serialize};

/// Default cover color
pub const DEFAULT_BOOK_COLOR: &str = "#866232";

fn default_color() -> String {
    DEFAULT_BOOK_COLOR.to_string()
}

fn null_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_color))
}

/// A book as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned id
    #[serde(default)]
    pub id: Option<i64>,
    /// Title
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
    /// Description
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    /// Owner's user id
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Recipes in the book; the server's snapshot of the relation
    #[serde(default, deserialize_with = "super::null_default")]
    pub recipe_ids: Vec<i64>,
    /// Cover color, `#rrggbb`
    #[serde(default = "default_color", deserialize_with = "null_color")]
    pub color: String,
    /// Listed publicly
    #[serde(default, deserialize_with = "super::null_default")]
    pub is_public: bool,
}

impl Book {
    /// Request body that recreates this book as-is. `owner_id` stands in for
    /// the author when the server did not report one.
    pub fn to_draft(&self, owner_id: i64) -> BookDraft {
        BookDraft {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            author_id: self.author_id.unwrap_or(owner_id),
            recipe_ids: self.recipe_ids.clone(),
            color: self.color.clone(),
            is_public: self.is_public,
        }
    }

    /// Whether the book references a recipe
    pub fn contains_recipe(&self, recipe_id: i64) -> bool {
        self.recipe_ids.contains(&recipe_id)
    }
}

/// Body for creating or replacing a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub author_id: i64,
    #[serde(default)]
    pub recipe_ids: Vec<i64>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_public: bool,
}

impl BookDraft {
    /// New private book with the default color
    pub fn new(title: impl Into<String>, description: impl Into<String>, author_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            author_id,
            recipe_ids: Vec::new(),
            color: default_color(),
            is_public: false,
        }
    }

    /// Same draft with every occurrence of `recipe_id` removed
    #[must_use]
    pub fn without_recipe(mut self, recipe_id: i64) -> Self {
        self.recipe_ids.retain(|id| *id != recipe_id);
        self
    }
}
