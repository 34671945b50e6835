//! Recipes, likes, favorites and AI generation quota

use std::sync::Arc;

use super::Repository;
use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::{GenerationLimit, Recipe, RecipeReport};

/// Access to `api/recipes` and related endpoints
pub struct RecipeRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> RecipeRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Recipes whose title matches `title`
    pub async fn search(&self, title: &str) -> Option<Vec<Recipe>> {
        settle(
            "search recipes",
            self.api
                .authorized(Method::Get, "api/recipes/search")
                .query("title", title)
                .fetch()
                .await,
        )
    }

    /// Recipes owned by the logged-in user
    pub async fn user_recipes(&self) -> Option<Vec<Recipe>> {
        settle(
            "load own recipes",
            self.api.authorized(Method::Get, "api/recipes/user").fetch().await,
        )
    }

    /// Delete several recipes in one request
    pub async fn bulk_delete(&self, ids: &[i64]) -> bool {
        settle_ok(
            "bulk delete recipes",
            self.api
                .authorized(Method::Delete, "api/recipes/bulk")
                .json(ids)
                .execute()
                .await,
        )
    }

    /// Delete every recipe the user owns. Nothing to delete counts as success.
    pub async fn delete_all_own(&self) -> bool {
        let Some(recipes) = self.user_recipes().await else {
            return false;
        };
        let ids: Vec<i64> = recipes.iter().filter_map(|r| r.id).collect();
        if ids.is_empty() {
            return true;
        }
        self.bulk_delete(&ids).await
    }

    /// Like a recipe; returns the updated recipe
    pub async fn like(&self, id: i64) -> Option<Recipe> {
        settle(
            "like recipe",
            self.api
                .authorized(Method::Post, &format!("api/recipes/{id}/like"))
                .fetch()
                .await,
        )
    }

    /// Number of likes on a recipe
    pub async fn like_count(&self, id: i64) -> Option<i32> {
        settle(
            "load like count",
            self.api
                .authorized(Method::Get, &format!("api/recipes/{id}/likes"))
                .fetch()
                .await,
        )
    }

    /// Add a recipe to the user's favorites
    pub async fn add_favorite(&self, recipe_id: i64) -> bool {
        settle_ok(
            "add favorite",
            self.api
                .authorized(Method::Post, &format!("api/auth/favorites/{recipe_id}"))
                .execute()
                .await,
        )
    }

    /// Remove a recipe from the user's favorites
    pub async fn remove_favorite(&self, recipe_id: i64) -> bool {
        settle_ok(
            "remove favorite",
            self.api
                .authorized(Method::Delete, &format!("api/auth/favorites/{recipe_id}"))
                .execute()
                .await,
        )
    }

    /// The user's favorite recipes
    pub async fn favorites(&self) -> Option<Vec<Recipe>> {
        settle(
            "load favorites",
            self.api.authorized(Method::Get, "api/auth/favorites").fetch().await,
        )
    }

    /// Whether a recipe is among the favorites; `None` if they could not be loaded
    pub async fn is_favorite(&self, recipe_id: i64) -> Option<bool> {
        let favorites = self.favorites().await?;
        Some(favorites.iter().any(|r| r.id == Some(recipe_id)))
    }

    /// Report a recipe to moderators
    pub async fn report(&self, id: i64, reason: &str) -> Option<RecipeReport> {
        settle(
            "report recipe",
            self.api
                .authorized(Method::Post, &format!("api/recipes/{id}/report"))
                .json(reason)
                .fetch()
                .await,
        )
    }

    /// Remaining AI recipe generations for the current period
    pub async fn generation_limit(&self) -> Option<GenerationLimit> {
        settle(
            "check generation limit",
            self.api.authorized(Method::Get, "api/generation-limit").fetch().await,
        )
    }

    /// Count one AI generation against the quota
    pub async fn record_generation(&self) -> bool {
        settle_ok(
            "record generation",
            self.api
                .authorized(Method::Post, "api/generation-event")
                .execute()
                .await,
        )
    }
}

impl<T: Transport> Repository for RecipeRepository<T> {
    type Item = Recipe;
    type Id = i64;
    type Draft = Recipe;

    async fn list(&self) -> Option<Vec<Recipe>> {
        settle(
            "load recipes",
            self.api.authorized(Method::Get, "api/recipes").fetch().await,
        )
    }

    async fn get_by_id(&self, id: i64) -> Option<Recipe> {
        settle(
            "load recipe",
            self.api
                .authorized(Method::Get, &format!("api/recipes/{id}"))
                .fetch()
                .await,
        )
    }

    async fn create(&self, draft: &Recipe) -> Option<Recipe> {
        settle(
            "create recipe",
            self.api
                .authorized(Method::Post, "api/recipes")
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn update(&self, id: i64, draft: &Recipe) -> Option<Recipe> {
        settle(
            "update recipe",
            self.api
                .authorized(Method::Put, &format!("api/recipes/{id}"))
                .json(draft)
                .fetch()
                .await,
        )
    }

    async fn delete(&self, id: i64) -> bool {
        settle_ok(
            "delete recipe",
            self.api
                .authorized(Method::Delete, &format!("api/recipes/{id}"))
                .execute()
                .await,
        )
    }
}
