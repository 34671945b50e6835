//! Newsletter subscription

use std::sync::Arc;

use crate::api::{ApiClient, CallError, Method, ReqwestTransport, Transport, settle};

/// Outcome of a subscribe or unsubscribe call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionResult {
    /// The change was applied
    Success,
    /// Subscribe on an address that is already subscribed (409)
    AlreadySubscribed,
    /// Unsubscribe on an address that is not subscribed (400)
    NotSubscribed,
    /// Any other status; `-1` when no response was obtained
    Failure(i32),
}

impl SubscriptionResult {
    /// Status reported when no response was obtained
    pub const NO_RESPONSE: i32 = -1;

    fn from_subscribe_status(status: u16) -> Self {
        match status {
            201 => Self::Success,
            409 => Self::AlreadySubscribed,
            other => Self::Failure(i32::from(other)),
        }
    }

    fn from_unsubscribe_status(status: u16) -> Self {
        match status {
            200 => Self::Success,
            400 => Self::NotSubscribed,
            other => Self::Failure(i32::from(other)),
        }
    }
}

impl std::fmt::Display for SubscriptionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("done"),
            Self::AlreadySubscribed => f.write_str("already subscribed"),
            Self::NotSubscribed => f.write_str("not subscribed"),
            Self::Failure(code) => write!(f, "failed ({code})"),
        }
    }
}

/// Access to `api/newsletter`
pub struct NewsletterRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> NewsletterRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Subscribe the logged-in user
    pub async fn subscribe(&self) -> SubscriptionResult {
        self.change("api/newsletter/subscribe", SubscriptionResult::from_subscribe_status)
            .await
    }

    /// Unsubscribe the logged-in user
    pub async fn unsubscribe(&self) -> SubscriptionResult {
        self.change("api/newsletter/unsubscribe", SubscriptionResult::from_unsubscribe_status)
            .await
    }

    /// Whether the logged-in user is subscribed; `false` on any failure
    pub async fn is_subscribed(&self) -> bool {
        settle(
            "check newsletter subscription",
            self.api
                .authorized(Method::Get, "api/newsletter/isSubscribed")
                .fetch::<bool>()
                .await,
        )
        .unwrap_or(false)
    }

    async fn change(&self, path: &str, interpret: fn(u16) -> SubscriptionResult) -> SubscriptionResult {
        match self.api.authorized(Method::Post, path).exchange().await {
            Ok(response) => {
                let result = interpret(response.status);
                tracing::debug!("{path}: {} -> {result}", response.status);
                result
            }
            Err(CallError::MissingToken) => {
                tracing::warn!("Cannot change newsletter subscription: not logged in");
                SubscriptionResult::Failure(SubscriptionResult::NO_RESPONSE)
            }
            Err(e) => {
                tracing::warn!("Failed to change newsletter subscription: {e}");
                SubscriptionResult::Failure(SubscriptionResult::NO_RESPONSE)
            }
        }
    }
}
