//! Recipe reviews and review reports

use std::sync::Arc;

use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::models::{NewReview, Review, ReviewReport};

/// Access to `api/reviews` and `api/reviewReports`
pub struct ReviewRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> ReviewRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Review a recipe
    pub async fn add(&self, recipe_id: i64, review: &NewReview) -> Option<Review> {
        settle(
            "add review",
            self.api
                .authorized(Method::Post, &format!("api/reviews/recipe/{recipe_id}"))
                .json(review)
                .fetch()
                .await,
        )
    }

    pub async fn for_recipe(&self, recipe_id: i64) -> Option<Vec<Review>> {
        settle(
            "load reviews",
            self.api
                .authorized(Method::Get, &format!("api/reviews/recipe/{recipe_id}"))
                .fetch()
                .await,
        )
    }

    pub async fn by_user(&self, user_id: i64) -> Option<Vec<Review>> {
        settle(
            "load user reviews",
            self.api
                .authorized(Method::Get, &format!("api/reviews/user/{user_id}"))
                .fetch()
                .await,
        )
    }

    /// Replace the rating and comment of a review
    pub async fn update(&self, review_id: i64, review: &NewReview) -> Option<Review> {
        settle(
            "update review",
            self.api
                .authorized(Method::Put, &format!("api/reviews/{review_id}"))
                .json(review)
                .fetch()
                .await,
        )
    }

    pub async fn delete(&self, review_id: i64) -> bool {
        settle_ok(
            "delete review",
            self.api
                .authorized(Method::Delete, &format!("api/reviews/{review_id}"))
                .execute()
                .await,
        )
    }

    /// Flag a review for moderation
    pub async fn report(&self, review_id: i64, reason: &str) -> Option<ReviewReport> {
        settle(
            "report review",
            self.api
                .authorized(Method::Post, &format!("api/reviewReports/{review_id}"))
                .json(reason)
                .fetch()
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::repos::fixtures;

    #[tokio::test]
    async fn test_add_review() {
        let api = fixtures::logged_in();
        api.transport().respond_json(
            Method::Post,
            "/api/reviews/recipe/4",
            201,
            &json!({"id": 9, "rating": 5, "comment": "great", "recipeId": 4}),
        );

        let review = ReviewRepository::new(api.clone())
            .add(4, &NewReview { rating: 5, comment: "great".to_string() })
            .await
            .unwrap();
        assert_eq!(review.id, Some(9));

        let body: serde_json::Value =
            serde_json::from_str(api.transport().requests()[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"rating": 5, "comment": "great"}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_absent() {
        let api = fixtures::logged_in();
        api.transport()
            .respond(Method::Get, "/api/reviews/recipe/4", 200, "<html>");

        assert!(ReviewRepository::new(api).for_recipe(4).await.is_none());
    }

    #[tokio::test]
    async fn test_report_review() {
        let api = fixtures::logged_in();
        api.transport().respond_json(
            Method::Post,
            "/api/reviewReports/9",
            200,
            &json!({"id": 1, "reviewId": 9}),
        );

        let report = ReviewRepository::new(api).report(9, "rude").await.unwrap();
        assert_eq!(report.review_id, 9);
    }

    #[tokio::test]
    async fn test_logged_out_calls_send_nothing() {
        let api = fixtures::logged_out();
        let repo = ReviewRepository::new(api.clone());

        let review = NewReview {
            rating: 4,
            comment: "ok".to_string(),
        };

        assert!(repo.add(1, &review).await.is_none());
        assert!(repo.for_recipe(1).await.is_none());
        assert!(repo.by_user(1).await.is_none());
        assert!(repo.update(1, &review).await.is_none());
        assert!(!repo.delete(1).await);
        assert!(repo.report(1, "rude").await.is_none());
        assert_eq!(api.transport().request_count(), 0);
    }
}
