//! Cooking challenges and leaderboards

use serde::{Deserialize, Serialize};

use super::Recipe;

/// A cooking challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub image_url: String,
    /// Deadline as sent by the server
    #[serde(default, deserialize_with = "super::null_default")]
    pub deadline: String,
    #[serde(default, deserialize_with = "super::null_default")]
    pub points: i32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "super::null_default")]
    pub submitted_recipes: Vec<Recipe>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub max_submissions: i32,
    #[serde(default, deserialize_with = "super::null_default")]
    pub featured: bool,
}

/// Row of the all-time leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalLeaderboardEntry {
    pub id: i64,
    pub user_email: String,
    #[serde(default)]
    pub username: Option<String>,
    pub total_points: i32,
}

/// A featured challenge winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedWinner {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_email: String,
    #[serde(default)]
    pub username: Option<String>,
    pub total_points: i32,
}
