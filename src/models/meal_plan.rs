//! Meal plans keyed by calendar date

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Recipe;

/// Recipes and notes planned for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: i64,
    /// Day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// A free-text note attached to a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub content: String,
}

impl Note {
    /// New unsaved note
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_plan_decodes_iso_date() {
        let plan: MealPlan = serde_json::from_str(
            r#"{"id": 2, "date": "2024-12-19", "recipes": [{"title": "Oats"}], "notes": [{"id": 5, "content": "shop"}]}"#,
        )
        .unwrap();
        assert_eq!(plan.date, NaiveDate::from_ymd_opt(2024, 12, 19).unwrap());
        assert_eq!(plan.recipes[0].title, "Oats");
        assert_eq!(plan.notes[0].id, Some(5));
    }
}
