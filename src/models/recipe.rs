//! Recipe and review models

use serde::{Deserialize, Deserializer, Serialize};

const NOT_SET: &str = "Not set";

/// A recipe as exchanged with the backend
///
/// Every field tolerates being absent or `null`. `reviews` is decoded on its
/// own: the server omits it for recipes without reviews and sometimes sends `null`, so
/// anything that is not a well-formed array becomes an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned id, absent before creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Title
    #[serde(deserialize_with = "super::null_default")]
    pub title: String,
    /// Author's username
    #[serde(rename = "authorUsername", deserialize_with = "super::null_default")]
    pub author: String,
    /// Preparation time, free text
    #[serde(deserialize_with = "super::null_default")]
    pub prep_time: String,
    /// Cooking time, free text
    #[serde(deserialize_with = "super::null_default")]
    pub cook_time: String,
    /// One ingredient per line
    #[serde(deserialize_with = "super::null_default")]
    pub ingredients: String,
    /// One step per line
    #[serde(deserialize_with = "super::null_default")]
    pub instructions: String,
    /// Free-form notes
    #[serde(deserialize_with = "super::null_default")]
    pub notes: String,
    /// Author's user id
    pub author_id: Option<i64>,
    /// Public image URL
    pub image_uri: Option<String>,
    /// Source URL
    #[serde(deserialize_with = "super::null_default")]
    pub url: String,
    /// Servings, free text
    #[serde(deserialize_with = "null_servings")]
    pub servings: String,
    /// Tags
    #[serde(deserialize_with = "super::null_default")]
    pub tags: Vec<String>,
    /// Difficulty label
    #[serde(deserialize_with = "null_not_set")]
    pub difficulty: String,
    /// Cuisine of origin
    #[serde(deserialize_with = "null_not_set")]
    pub cuisine: String,
    /// Source attribution
    #[serde(deserialize_with = "super::null_default")]
    pub source: String,
    /// Video URL
    #[serde(deserialize_with = "super::null_default")]
    pub video: String,
    /// Nutrition, free text
    #[serde(deserialize_with = "super::null_default")]
    pub calories: String,
    /// Nutrition, free text
    #[serde(deserialize_with = "super::null_default")]
    pub carbohydrates: String,
    /// Nutrition, free text
    #[serde(deserialize_with = "super::null_default")]
    pub protein: String,
    /// Nutrition, free text
    #[serde(deserialize_with = "super::null_default")]
    pub fat: String,
    /// Nutrition, free text
    #[serde(deserialize_with = "super::null_default")]
    pub sugar: String,
    /// Visible to other users
    #[serde(rename = "public", deserialize_with = "null_true")]
    pub is_public: bool,
    /// Embedded reviews
    #[serde(
        deserialize_with = "lenient_reviews",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reviews: Vec<Review>,
    /// Creation timestamp as sent by the server
    pub created_at: Option<String>,
    /// Like count
    #[serde(deserialize_with = "super::null_default")]
    pub likes: i32,
    /// Whether the current user liked it
    #[serde(deserialize_with = "super::null_default")]
    pub liked_by_user: bool,
    /// Produced by the recipe generator
    #[serde(deserialize_with = "super::null_default")]
    pub is_ai_generated: bool,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            author: String::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
            notes: String::new(),
            author_id: None,
            image_uri: None,
            url: String::new(),
            servings: "1".to_string(),
            tags: Vec::new(),
            difficulty: NOT_SET.to_string(),
            cuisine: NOT_SET.to_string(),
            source: String::new(),
            video: String::new(),
            calories: String::new(),
            carbohydrates: String::new(),
            protein: String::new(),
            fat: String::new(),
            sugar: String::new(),
            is_public: true,
            reviews: Vec::new(),
            created_at: None,
            likes: 0,
            liked_by_user: false,
            is_ai_generated: false,
        }
    }
}

impl Recipe {
    /// Mean review rating, 0.0 without reviews
    pub fn average_rating(&self) -> f32 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let total: i64 = self.reviews.iter().map(|r| i64::from(r.rating)).sum();
        total as f32 / self.reviews.len() as f32
    }
}

fn null_servings<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(|| "1".to_string()))
}

fn null_not_set<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(|| NOT_SET.to_string()))
}

fn null_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or(true))
}

fn lenient_reviews<'de, D>(deserializer: D) -> Result<Vec<Review>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(reviews @ serde_json::Value::Array(_)) => {
            serde_json::from_value(reviews).unwrap_or_else(|e| {
                tracing::debug!("Ignoring malformed reviews: {e}");
                Vec::new()
            })
        }
        _ => Vec::new(),
    })
}

/// A review of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Star rating, 1 to 5
    #[serde(default, deserialize_with = "super::null_default")]
    pub rating: i32,
    /// Review text
    #[serde(default, deserialize_with = "super::null_default")]
    pub comment: String,
    /// Reviewer id
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Reviewer username
    #[serde(default)]
    pub username: Option<String>,
    /// Reviewed recipe
    #[serde(default)]
    pub recipe_id: Option<i64>,
    /// Creation timestamp as sent by the server
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for posting a new review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Star rating, 1 to 5
    pub rating: i32,
    /// Review text
    pub comment: String,
}

/// Acknowledgement of a recipe report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeReport {
    pub id: i64,
    pub recipe_id: i64,
    #[serde(default)]
    pub recipe_title: String,
    #[serde(default)]
    pub reporter_username: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub reported_at: String,
}

/// Acknowledgement of a review report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub id: i64,
    pub review_id: i64,
    #[serde(default)]
    pub reporter_id: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub reported_at: String,
}

/// Remaining recipe generations for the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLimit {
    pub allowed: bool,
    pub remaining: i32,
    pub current_count: i32,
    pub limit: i32,
}
