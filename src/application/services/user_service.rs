//! Account registration, login, and token refresh.

use std::sync::Arc;

use crate::application::services::token_service::{TokenPair, TokenService};
use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use serde_json::json;

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Service for account lifecycle and authentication.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    /// Registers a new account and issues its first token pair.
    ///
    /// The email is normalized to lowercase before storage. The username
    /// and email unique constraints close the check-then-insert race; the
    /// pre-checks here only exist for precise error messages.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn register(&self, input: Registration) -> Result<(User, TokenPair), AppError> {
        let email = input.email.to_lowercase();

        if self.repository.find_by_login(&input.username).await?.is_some() {
            return Err(AppError::conflict(
                "Username already taken",
                json!({ "username": input.username }),
            ));
        }
        if self.repository.find_by_login(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already registered",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_password(&input.password).map_err(|e| {
            AppError::internal("Password hashing failed", json!({ "reason": e.to_string() }))
        })?;

        let display_name = input.display_name.unwrap_or_else(|| input.username.clone());

        let user = self
            .repository
            .create(NewUser {
                username: input.username,
                email,
                password_hash,
                display_name,
                role: "user".to_string(),
            })
            .await?;

        let pair = self.tokens.issue_pair(&user)?;

        Ok((user, pair))
    }

    /// Authenticates by username or email plus password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown identifier or a
    /// wrong password; the two are indistinguishable to the caller.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(User, TokenPair), AppError> {
        let invalid_credentials =
            || AppError::unauthorized("Unauthorized", json!({ "reason": "invalid credentials" }));

        let user = self
            .repository
            .find_by_login(identifier)
            .await?
            .ok_or_else(invalid_credentials)?;

        let matches = verify_password(password, &user.password_hash).map_err(|e| {
            AppError::internal(
                "Password verification failed",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !matches {
            return Err(invalid_credentials());
        }

        let pair = self.tokens.issue_pair(&user)?;

        Ok((user, pair))
    }

    /// Exchanges a refresh token for a fresh token pair.
    ///
    /// The user record is re-read so the new access token carries current
    /// profile claims, not the ones from login time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an expired, invalid, or
    /// wrong-kind token, and for a subject that no longer exists.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let user_id = self.tokens.verify_refresh(refresh_token)?;

        let user = self.repository.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "unknown subject" }))
        })?;

        Ok(self.tokens.issue_pair(&user)?)
    }

    /// Loads a profile by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_profile(&self, id: i64) -> Result<User, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))
    }

    /// Applies a partial profile update. A new email is normalized to
    /// lowercase first.
    pub async fn update_profile(&self, id: i64, mut patch: UserPatch) -> Result<User, AppError> {
        if let Some(email) = patch.email.take() {
            patch.email = Some(email.to_lowercase());
        }

        self.repository.update(id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(Some("unit-test-secret".to_string()), 7))
    }

    fn stored_user(id: i64, username: &str, password: &str) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: hash_password(password).unwrap(),
            display_name: username.to_string(),
            bio: String::new(),
            role: "user".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn registration(username: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: format!("{}@Example.COM", username),
            password: "secret123".to_string(),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_issues_tokens() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_login().times(2).returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user: &NewUser| {
                new_user.email == "alice@example.com"
                    && new_user.role == "user"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| {
                let mut user = stored_user(1, "alice", "secret123");
                user.email = new_user.email;
                Ok(user)
            });

        let service = UserService::new(Arc::new(repo), tokens());
        let (user, pair) = service.register(registration("alice")).await.unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_login()
            .times(1)
            .returning(|_| Ok(Some(stored_user(9, "alice", "x12345"))));
        repo.expect_create().times(0);

        let service = UserService::new(Arc::new(repo), tokens());
        let result = service.register(registration("alice")).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_login()
            .withf(|id| id == "alice")
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "alice", "secret123"))));

        let service = UserService::new(Arc::new(repo), tokens());
        let (user, pair) = service.login("alice", "secret123").await.unwrap();

        assert_eq!(user.id, 1);
        assert!(!pair.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_login()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "alice", "secret123"))));

        let service = UserService::new(Arc::new(repo), tokens());
        let result = service.login("alice", "wrong-password").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_unauthorized() {
        let mut repo = MockUserRepository::new();

        repo.expect_find_by_login().times(1).returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repo), tokens());
        let result = service.login("ghost", "whatever").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_refresh_reloads_profile_claims() {
        let token_service = tokens();
        let refresh_token = token_service.issue_refresh(1).unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "alice", "secret123"))));

        let service = UserService::new(Arc::new(repo), token_service.clone());
        let pair = service.refresh(&refresh_token).await.unwrap();

        let claims = token_service.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let token_service = tokens();
        let access = token_service
            .issue_access(&stored_user(1, "alice", "secret123"))
            .unwrap();

        let repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(repo), token_service);

        let err = service.refresh(&access).await.unwrap_err();
        let info = err.to_error_info();

        assert_eq!(info.code, "unauthorized");
        assert_eq!(info.details["reason"], "wrong token kind");
    }

    #[tokio::test]
    async fn test_update_profile_lowercases_email() {
        let mut repo = MockUserRepository::new();

        repo.expect_update()
            .withf(|_, patch| patch.email.as_deref() == Some("new@example.com"))
            .times(1)
            .returning(|_, _| Ok(stored_user(1, "alice", "secret123")));

        let service = UserService::new(Arc::new(repo), tokens());
        let patch = UserPatch {
            email: Some("New@Example.COM".to_string()),
            ..UserPatch::default()
        };

        service.update_profile(1, patch).await.unwrap();
    }
}
