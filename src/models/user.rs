//! Users and authentication payloads

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A user account as exchanged with the auth endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login email
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Only ever sent, never returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// `FREE`, `PLUS` or `PRO`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_count: Option<i32>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following_ids: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_followed: Option<bool>,
    /// Badge name to count
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub badges: HashMap<String, i32>,
}

impl User {
    /// Credentials for the login and registration endpoints
    pub fn credentials(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: Some(password.to_string()),
            ..Self::default()
        }
    }
}

/// Login response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
}

/// Body of `PUT api/auth/subscription`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    /// `PLUS` or `PRO`
    pub subscription_type: String,
    pub duration_months: i32,
}

impl SubscriptionRequest {
    /// One month of the given tier
    pub fn monthly(subscription_type: impl Into<String>) -> Self {
        Self {
            subscription_type: subscription_type.into(),
            duration_months: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyResetCodeRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePasswordRequest<'a> {
    pub email: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OtpRequest<'a> {
    pub email: &'a str,
    pub otp_code: &'a str,
}

/// Feedback message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_only_send_login_fields() {
        let json = serde_json::to_value(User::credentials("a@b.c", "pw")).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@b.c", "password": "pw"}));
    }

    #[test]
    fn test_profile_decodes_badges() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "email": "a@b.c", "username": "al", "badges": {"CHEF": 2}, "followerCount": 4}"#,
        )
        .unwrap();
        assert_eq!(user.badges.get("CHEF"), Some(&2));
        assert_eq!(user.follower_count, Some(4));
        assert!(user.password.is_none());
    }
}
