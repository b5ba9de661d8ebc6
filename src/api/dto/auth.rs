//! DTOs for registration, login, and token refresh.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use super::users::UserResponse;
use crate::application::services::TokenPair;
use crate::domain::entities::User;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").unwrap());

/// Request to create an account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "username must be 3-20 characters from [A-Za-z0-9_]"
    ))]
    pub username: String,

    /// Normalized to lowercase before storage.
    #[validate(email(message = "invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(max = 100, message = "display name is capped at 100 characters"))]
    pub display_name: Option<String>,
}

/// Request to log in. `identifier` is a username or an email address.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "identifier is required"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request to exchange a refresh token for a new pair.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// Response for register/login: the profile plus a token pair.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthResponse {
    pub fn new(user: User, pair: TokenPair) -> Self {
        Self {
            user: UserResponse::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Response for refresh: a new token pair only.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("alice_99", "a@example.com", "secret1").validate().is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert!(register("ab", "a@example.com", "secret1").validate().is_err());
    }

    #[test]
    fn test_username_rejects_hyphen() {
        assert!(register("bad-name", "a@example.com", "secret1").validate().is_err());
    }

    #[test]
    fn test_bad_email() {
        assert!(register("alice", "not-an-email", "secret1").validate().is_err());
    }

    #[test]
    fn test_short_password() {
        assert!(register("alice", "a@example.com", "12345").validate().is_err());
    }

    #[test]
    fn test_every_failed_rule_is_reported() {
        let errors = register("x", "nope", "123").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
