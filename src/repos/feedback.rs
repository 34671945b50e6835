//! User feedback

use std::sync::Arc;

use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle_ok};
use crate::models::Feedback;

/// Access to `api/feedback`
pub struct FeedbackRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> FeedbackRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Send a feedback comment
    pub async fn submit(&self, comment: &str) -> bool {
        let feedback = Feedback {
            comment: comment.to_string(),
        };
        settle_ok(
            "submit feedback",
            self.api
                .authorized(Method::Post, "api/feedback")
                .json(&feedback)
                .execute()
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::fixtures;

    #[tokio::test]
    async fn test_submit() {
        let api = fixtures::logged_in();
        api.transport().respond(Method::Post, "/api/feedback", 200, "");

        assert!(FeedbackRepository::new(api.clone()).submit("Love it").await);
        assert_eq!(
            api.transport().requests()[0].body.as_deref(),
            Some(r#"{"comment":"Love it"}"#)
        );
    }

    #[tokio::test]
    async fn test_submit_logged_out() {
        let api = fixtures::logged_out();

        assert!(!FeedbackRepository::new(api.clone()).submit("hi").await);
        assert_eq!(api.transport().request_count(), 0);
    }
}
