//! Data models mirroring the backend's JSON shapes

use serde::{Deserialize, Deserializer};

mod book;
mod challenge;
mod meal_plan;
mod recipe;
mod shopping;
mod user;

pub use book::{Book, BookDraft, DEFAULT_BOOK_COLOR};
pub use challenge::{Challenge, FeaturedWinner, GlobalLeaderboardEntry};
pub use meal_plan::{MealPlan, Note};
pub use recipe::{GenerationLimit, NewReview, Recipe, RecipeReport, Review, ReviewReport};
pub use shopping::ShoppingListItem;
pub use user::{AuthResponse, Feedback, SubscriptionRequest, User};

pub(crate) use user::{ForgotPasswordRequest, OtpRequest, UpdatePasswordRequest, VerifyResetCodeRequest};

/// Decode a value the backend may send as `null`, falling back to the default
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
