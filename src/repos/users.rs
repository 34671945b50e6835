//! Authentication, profiles and social graph
//!
//! Login, registration, Google sign-in, password reset, OTP and email
//! verification run without a bearer token since they are how a session
//! comes to exist. Everything else requires one.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{ApiClient, Method, ReqwestTransport, Transport, settle, settle_ok};
use crate::auth::Session;
use crate::models::{
    AuthResponse, ForgotPasswordRequest, OtpRequest, SubscriptionRequest, UpdatePasswordRequest,
    User, VerifyResetCodeRequest,
};

/// Access to `api/auth` and related user endpoints
pub struct UserRepository<T = ReqwestTransport> {
    api: Arc<ApiClient<T>>,
}

impl<T: Transport> UserRepository<T> {
    /// Create a repository over a shared client
    pub const fn new(api: Arc<ApiClient<T>>) -> Self {
        Self { api }
    }

    /// Log in with email and password, replacing any stored session
    pub async fn login(&self, email: &str, password: &str) -> Option<Session> {
        let response: AuthResponse = settle(
            "log in",
            self.api
                .request(Method::Post, "api/auth/login")
                .json(&User::credentials(email, password))
                .fetch()
                .await,
        )?;
        self.establish(&response.access_token).await
    }

    /// Log in with a Google ID token
    pub async fn login_with_google(&self, id_token: &str) -> Option<Session> {
        let body = HashMap::from([("idToken", id_token)]);
        let response: AuthResponse = settle(
            "log in with Google",
            self.api
                .request(Method::Post, "api/auth/googleLogin")
                .json(&body)
                .fetch()
                .await,
        )?;
        self.establish(&response.access_token).await
    }

    /// Store the session, then cache the username from the profile.
    /// A missing profile leaves the username unset without failing the login.
    async fn establish(&self, token: &str) -> Option<Session> {
        let mut session = Session::from_token(token);
        if let Err(e) = self.api.credentials().save_session(&session) {
            tracing::warn!("Failed to store session: {e:#}");
            return None;
        }
        if let Some(username) = self.profile().await.and_then(|user| user.username) {
            match self.api.credentials().save_username(&username) {
                Ok(()) => session.username = Some(username),
                Err(e) => tracing::warn!("Failed to cache username: {e:#}"),
            }
        }
        tracing::info!("Logged in as {}", session.email.as_deref().unwrap_or("unknown user"));
        Some(session)
    }

    /// Forget the stored session. Local only; the server keeps no session state.
    pub fn logout(&self) -> bool {
        match self.api.credentials().clear_session() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to clear session: {e:#}");
                false
            }
        }
    }

    /// Create an account; the server sends a verification code by email
    pub async fn register(&self, user: &User) -> Option<User> {
        settle(
            "register",
            self.api
                .request(Method::Post, "api/auth/register")
                .json(user)
                .fetch()
                .await,
        )
    }

    /// Profile of the logged-in user
    pub async fn profile(&self) -> Option<User> {
        settle(
            "load profile",
            self.api.authorized(Method::Get, "api/auth/profile").fetch().await,
        )
    }

    pub async fn update_profile(&self, user: &User) -> Option<User> {
        settle(
            "update profile",
            self.api
                .authorized(Method::Put, "api/auth/profile")
                .json(user)
                .fetch()
                .await,
        )
    }

    pub async fn user_by_id(&self, id: i64) -> Option<User> {
        settle(
            "load user",
            self.api
                .authorized(Method::Get, &format!("api/auth/{id}"))
                .fetch()
                .await,
        )
    }

    pub async fn all_users(&self) -> Option<Vec<User>> {
        settle(
            "load users",
            self.api.authorized(Method::Get, "api/auth").fetch().await,
        )
    }

    /// Id of the user registered under `email`, compared case-insensitively
    pub async fn find_user_id_by_email(&self, email: &str) -> Option<i64> {
        let needle = email.trim().to_lowercase();
        self.all_users()
            .await?
            .into_iter()
            .find(|u| u.email.to_lowercase() == needle)
            .and_then(|u| u.id)
    }

    pub async fn delete_user(&self, id: i64) -> bool {
        settle_ok(
            "delete user",
            self.api
                .authorized(Method::Delete, &format!("api/auth/{id}"))
                .execute()
                .await,
        )
    }

    pub async fn follow(&self, user_id: i64) -> bool {
        settle_ok(
            "follow user",
            self.api
                .authorized(Method::Post, &format!("api/auth/follow/{user_id}"))
                .execute()
                .await,
        )
    }

    pub async fn unfollow(&self, user_id: i64) -> bool {
        settle_ok(
            "unfollow user",
            self.api
                .authorized(Method::Post, &format!("api/auth/unfollow/{user_id}"))
                .execute()
                .await,
        )
    }

    /// Whether the logged-in user follows `user_id`; `None` if unknown
    pub async fn is_following(&self, user_id: i64) -> Option<bool> {
        settle(
            "check follow status",
            self.api
                .authorized(Method::Get, &format!("api/auth/isFollowing/{user_id}"))
                .fetch()
                .await,
        )
    }

    /// Record an already uploaded avatar URL
    pub async fn update_avatar(&self, image_url: &str) -> bool {
        let body = HashMap::from([("imageUri", image_url)]);
        settle_ok(
            "update avatar",
            self.api
                .authorized(Method::Put, "api/auth/profile/avatar")
                .json(&body)
                .text()
                .await,
        )
    }

    pub async fn delete_avatar(&self) -> bool {
        settle_ok(
            "delete avatar",
            self.api
                .authorized(Method::Delete, "api/auth/profile/avatar")
                .execute()
                .await,
        )
    }

    /// Change the subscription tier after a completed payment
    pub async fn update_subscription(&self, request: &SubscriptionRequest) -> bool {
        settle_ok(
            "update subscription",
            self.api
                .authorized(Method::Put, "api/auth/subscription")
                .json(request)
                .execute()
                .await,
        )
    }

    pub async fn award_badge(&self, user_email: &str, badge: &str) -> bool {
        settle_ok(
            "award badge",
            self.api
                .authorized(Method::Post, "api/auth/awardBadge")
                .query("userEmail", user_email)
                .query("badge", badge)
                .text()
                .await,
        )
    }

    /// Start a password reset; a code is emailed to the user
    pub async fn request_password_reset(&self, email: &str) -> bool {
        settle_ok(
            "request password reset",
            self.api
                .request(Method::Post, "api/auth/forgot-password")
                .json(&ForgotPasswordRequest { email })
                .text()
                .await,
        )
    }

    pub async fn verify_reset_code(&self, email: &str, code: &str) -> bool {
        settle_ok(
            "verify reset code",
            self.api
                .request(Method::Post, "api/auth/forgot-password/verify")
                .json(&VerifyResetCodeRequest { email, code })
                .text()
                .await,
        )
    }

    pub async fn update_password(&self, email: &str, new_password: &str) -> bool {
        settle_ok(
            "update password",
            self.api
                .request(Method::Post, "api/auth/forgot-password/update")
                .json(&UpdatePasswordRequest {
                    email,
                    new_password,
                })
                .text()
                .await,
        )
    }

    /// Confirm a registration with the emailed one-time code
    pub async fn verify_otp(&self, email: &str, otp_code: &str) -> bool {
        settle_ok(
            "verify code",
            self.api
                .request(Method::Post, "api/auth/verify-otp")
                .json(&OtpRequest { email, otp_code })
                .text()
                .await,
        )
    }

    pub async fn resend_otp(&self, email: &str) -> bool {
        settle_ok(
            "resend code",
            self.api
                .request(Method::Post, "api/auth/resend-otp")
                .query("email", email)
                .execute()
                .await,
        )
    }

    /// Confirm an email address from the link token
    pub async fn verify_email(&self, token: &str) -> bool {
        settle_ok(
            "verify email",
            self.api
                .request(Method::Get, "api/auth/verify-email")
                .query("token", token)
                .text()
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::auth::jwt::tests::token_with;
    use crate::repos::fixtures;

    fn issued_token() -> String {
        let now = Utc::now().timestamp();
        token_with(&json!({
            "sub": "chef@example.com",
            "role": "admin",
            "userId": 21,
            "iat": now,
            "exp": now + 86_400,
        }))
    }

    #[tokio::test]
    async fn test_login_stores_session_from_claims() {
        let api = fixtures::logged_out();
        let token = issued_token();
        api.transport().respond_json(
            Method::Post,
            "/api/auth/login",
            200,
            &json!({"accessToken": token}),
        );

        let session = UserRepository::new(api.clone())
            .login("chef@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(session.user_id, Some(21));

        let store = api.credentials();
        assert!(store.is_logged_in());
        assert_eq!(store.token(), Some(token));
        assert_eq!(store.user_id(), Some(21));
        assert_eq!(store.user_role(), "admin");
        assert_eq!(store.user_email().as_deref(), Some("chef@example.com"));
        assert!(store.username().is_none());

        let sent = &api.transport().requests()[0];
        assert!(sent.header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_login_caches_username_from_profile() {
        let api = fixtures::logged_out();
        let token = issued_token();
        api.transport().respond_json(
            Method::Post,
            "/api/auth/login",
            200,
            &json!({"accessToken": token}),
        );
        api.transport().respond_json(
            Method::Get,
            "/api/auth/profile",
            200,
            &json!({"id": 21, "email": "chef@example.com", "username": "anya"}),
        );

        let session = UserRepository::new(api.clone())
            .login("chef@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(session.username.as_deref(), Some("anya"));
        assert_eq!(api.credentials().username().as_deref(), Some("anya"));
        assert_eq!(api.credentials().user_email().as_deref(), Some("chef@example.com"));

        let profile_call = &api.transport().requests()[1];
        assert_eq!(profile_call.path(), "/api/auth/profile");
        assert_eq!(profile_call.header("Authorization"), Some(format!("Bearer {token}").as_str()));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let api = fixtures::logged_in();
        api.transport().respond(Method::Post, "/api/auth/login", 401, "");

        let repo = UserRepository::new(api.clone());
        assert!(repo.login("cook@example.com", "wrong").await.is_none());
        assert_eq!(api.credentials().user_id(), Some(fixtures::USER_ID));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let api = fixtures::logged_in();
        let repo = UserRepository::new(api.clone());

        assert!(repo.logout());
        assert!(!api.credentials().is_logged_in());
        assert!(api.credentials().user_id().is_none());
        assert!(repo.profile().await.is_none());
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_find_user_id_by_email_ignores_case() {
        let api = fixtures::logged_in();
        api.transport().respond_json(
            Method::Get,
            "/api/auth",
            200,
            &json!([
                {"id": 1, "email": "a@example.com"},
                {"id": 2, "email": "Chef@Example.com"},
            ]),
        );

        let repo = UserRepository::new(api);
        assert_eq!(repo.find_user_id_by_email("chef@example.COM").await, Some(2));
        assert_eq!(repo.find_user_id_by_email("nobody@example.com").await, None);
    }

    #[tokio::test]
    async fn test_password_reset_runs_without_token() {
        let api = fixtures::logged_out();
        api.transport()
            .respond(Method::Post, "/api/auth/forgot-password", 200, "Code sent");

        assert!(UserRepository::new(api.clone()).request_password_reset("a@b.c").await);
        assert_eq!(
            api.transport().requests()[0].body.as_deref(),
            Some(r#"{"email":"a@b.c"}"#)
        );
    }

    #[tokio::test]
    async fn test_update_avatar_body() {
        let api = fixtures::logged_in();
        api.transport()
            .respond(Method::Put, "/api/auth/profile/avatar", 200, "ok");

        assert!(UserRepository::new(api.clone()).update_avatar("https://cdn.test/a.png").await);
        assert_eq!(
            api.transport().requests()[0].body.as_deref(),
            Some(r#"{"imageUri":"https://cdn.test/a.png"}"#)
        );
    }

    #[tokio::test]
    async fn test_award_badge_uses_auth_route() {
        let api = fixtures::logged_in();
        api.transport().respond(
            Method::Post,
            "/api/auth/awardBadge?userEmail=a%40b.c&badge=CHEF",
            200,
            "Badge awarded successfully",
        );

        assert!(UserRepository::new(api.clone()).award_badge("a@b.c", "CHEF").await);
        assert_eq!(api.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_token_gated_calls_send_nothing_when_logged_out() {
        let api = fixtures::logged_out();
        let repo = UserRepository::new(api.clone());

        assert!(repo.profile().await.is_none());
        assert!(repo.update_profile(&User::default()).await.is_none());
        assert!(repo.user_by_id(3).await.is_none());
        assert!(repo.all_users().await.is_none());
        assert!(repo.find_user_id_by_email("a@b.c").await.is_none());
        assert!(!repo.delete_user(3).await);
        assert!(!repo.follow(3).await);
        assert!(!repo.unfollow(3).await);
        assert!(repo.is_following(3).await.is_none());
        assert!(!repo.update_avatar("https://cdn.test/a.png").await);
        assert!(!repo.delete_avatar().await);
        assert!(!repo.update_subscription(&SubscriptionRequest::monthly("PRO")).await);
        assert!(!repo.award_badge("a@b.c", "CHEF").await);
        assert_eq!(api.transport().request_count(), 0);
    }
}
