//! Per-resource repositories
//!
//! Each repository wraps one family of backend endpoints. Calls read the
//! bearer token from the shared [`CredentialStore`](crate::auth::CredentialStore)
//! and never touch the network without one. Every failure (missing token,
//! non-2xx status, transport error, undecodable body) is logged and surfaces
//! as `None` or `false`.

mod books;
mod challenges;
mod feedback;
mod meal_plans;
mod newsletter;
mod recipes;
mod reviews;
mod shopping;
mod users;

pub use books::BookRepository;
pub use challenges::ChallengeRepository;
pub use feedback::FeedbackRepository;
pub use meal_plans::MealPlanRepository;
pub use newsletter::{NewsletterRepository, SubscriptionResult};
pub use recipes::RecipeRepository;
pub use reviews::ReviewRepository;
pub use shopping::ShoppingRepository;
pub use users::UserRepository;

/// CRUD contract shared by the collection resources
#[allow(async_fn_in_trait)]
pub trait Repository {
    /// Record returned by the server
    type Item;
    /// Server-assigned identifier
    type Id: Copy;
    /// Request body for create and update
    type Draft;

    /// Fetch every item visible to the caller
    async fn list(&self) -> Option<Vec<Self::Item>>;

    /// Fetch one item
    async fn get_by_id(&self, id: Self::Id) -> Option<Self::Item>;

    /// Create an item; the server's copy is returned
    async fn create(&self, draft: &Self::Draft) -> Option<Self::Item>;

    /// Replace an item; the server's copy is returned
    async fn update(&self, id: Self::Id, draft: &Self::Draft) -> Option<Self::Item>;

    /// Delete an item
    async fn delete(&self, id: Self::Id) -> bool;
}
