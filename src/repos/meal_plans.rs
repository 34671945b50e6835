//! Meal plans

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::{MealPlan, Note};

/// Access to `api/mealplans`. Days are addressed by ISO date.
pub struct MealPlanRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

fn day_path(date: NaiveDate) -> String {
    format!("api/mealplans/{}", date.format("%Y-%m-%d"))
}

impl<T: Transport> MealPlanRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Every planned day
    pub async fn list(&self) -> Option<Vec<MealPlan>> {
        settle(
            "load meal plans",
            self.api.authorized(Method::Get, "api/mealplans").fetch().await,
        )
    }

    /// The plan for one day
    pub async fn for_date(&self, date: NaiveDate) -> Option<MealPlan> {
        settle(
            "load meal plan",
            self.api.authorized(Method::Get, &day_path(date)).fetch().await,
        )
    }

    /// Plan a recipe on a day
    pub async fn add_recipe(&self, date: NaiveDate, recipe_id: i64) -> bool {
        settle_ok(
            "add recipe to meal plan",
            self.api
                .authorized(Method::Post, &format!("{}/recipes/{recipe_id}", day_path(date)))
                .execute()
                .await,
        )
    }

    /// Unplan a recipe
    pub async fn remove_recipe(&self, date: NaiveDate, recipe_id: i64) -> bool {
        settle_ok(
            "remove recipe from meal plan",
            self.api
                .authorized(Method::Delete, &format!("{}/recipes/{recipe_id}", day_path(date)))
                .execute()
                .await,
        )
    }

    /// Attach a note to a day; returns the stored note
    pub async fn add_note(&self, date: NaiveDate, note: &Note) -> Option<Note> {
        settle(
            "add note",
            self.api
                .authorized(Method::Post, &format!("{}/notes", day_path(date)))
                .json(note)
                .fetch()
                .await,
        )
    }

    /// Delete a note
    pub async fn delete_note(&self, date: NaiveDate, note_id: i64) -> bool {
        settle_ok(
            "delete note",
            self.api
                .authorized(Method::Delete, &format!("{}/notes/{note_id}", day_path(date)))
                .execute()
                .await,
        )
    }
}
