//! Cooking challenges, voting and leaderboards

use std::collections::HashMap;
use std::sync::Arc;

use super::Repository;
use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::{Challenge, FeaturedWinner, GlobalLeaderboardEntry, Recipe};

/// Access to `api/challenges`
pub struct ChallengeRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> ChallengeRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Enter a recipe into a challenge; returns the updated challenge
    pub async fn submit_recipe(&self, challenge_id: i64, recipe_id: i64) -> Option<Challenge> {
        settle(
            "submit recipe",
            self.api
                .authorized(Method::Post, &format!("api/challenges/{challenge_id}/submit"))
                .query("recipeId", recipe_id)
                .fetch()
                .await,
        )
    }

    /// Vote on a challenge
    pub async fn vote(&self, challenge_id: i64, value: i32) -> bool {
        settle_ok(
            "vote",
            self.api
                .authorized(Method::Post, &format!("api/challenges/{challenge_id}/vote"))
                .query("voteValue", value)
                .execute()
                .await,
        )
    }

    /// Recipes entered into a challenge
    pub async fn submitted_recipes(&self, challenge_id: i64) -> Option<Vec<Recipe>> {
        settle(
            "load submitted recipes",
            self.api
                .authorized(Method::Get, &format!("api/challenges/{challenge_id}/submitted"))
                .fetch()
                .await,
        )
    }

    /// Challenges ordered by score
    pub async fn leaderboard(&self) -> Option<Vec<Challenge>> {
        settle(
            "load leaderboard",
            self.api
                .authorized(Method::Get, "api/challenges/leaderboard")
                .fetch()
                .await,
        )
    }

    /// Users ordered by total points
    pub async fn global_leaderboard(&self) -> Option<Vec<GlobalLeaderboardEntry>> {
        settle(
            "load global leaderboard",
            self.api
                .authorized(Method::Get, "api/challenges/leaderboard/global")
                .fetch()
                .await,
        )
    }

    pub async fn featured_winners(&self) -> Option<Vec<FeaturedWinner>> {
        settle(
            "load featured winners",
            self.api
                .authorized(Method::Get, "api/challenges/featuredWinners")
                .fetch()
                .await,
        )
    }

    pub async fn featured_names(&self) -> Option<Vec<String>> {
        settle(
            "load featured challenge names",
            self.api
                .authorized(Method::Get, "api/challenges/featured/names")
                .fetch()
                .await,
        )
    }

    /// Ask the backend whether an uploaded image is acceptable.
    /// The answer maps verdict names (e.g. `safe`) to flags.
    pub async fn moderate_image(&self, file_url: &str) -> Option<HashMap<String, bool>> {
        settle(
            "moderate image",
            self.api
                .authorized(Method::Post, "api/moderate-image")
                .query("fileUrl", file_url)
                .fetch()
                .await,
        )
    }
}

impl<T: Transport> Repository for ChallengeRepository<T> {
    type Item = Challenge;
    type Id = i64;
    type Draft = Challenge;

    async fn list(&self) -> Option<Vec<Challenge>> {
        settle(
            "load challenges",
            self.api.authorized(Method::Get, "api/challenges").fetch().await,
        )
    }

    async fn get_by_id(&self, id: i64) -> Option<Challenge> {
        settle(
            "load challenge",
            self.api
                .authorized(Method::Get, &format!("api/challenges/{id}"))
                .fetch()
                .await,
        )
    }

    async fn create(&self, draft: &Challenge) -> Option<Challenge> {
        settle(
            "create challenge",
            self.api
                .authorized(Method::Post, "api/challenges")
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn update(&self, id: i64, draft: &Challenge) -> Option<Challenge> {
        settle(
            "update challenge",
            self.api
                .authorized(Method::Put, &format!("api/challenges/{id}"))
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn delete(&self, id: i64) -> bool {
        settle_ok(
            "delete challenge",
            self.api
                .authorized(Method::Delete, &format!("api/challenges/{id}"))
                .execute()
                .await,
        )
    }
}
