//! Signed, time-limited access and refresh tokens.
//!
//! Access tokens carry the profile claims handlers need; refresh tokens
//! carry the subject id only, so a month-old refresh token cannot smuggle
//! stale profile data back in. Each kind is tagged and verification
//! rejects a syntactically valid token of the wrong kind.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::entities::User;
use crate::error::AppError;

/// Refresh token lifetime. Fixed, not configuration.
pub const REFRESH_TTL_DAYS: i64 = 30;

/// Token failure kinds, distinguished so callers can decide between
/// re-authentication (expired) and rejection (invalid/wrong kind).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// No signing secret is configured. Raised at call time by every
    /// issue/verify operation, never at startup.
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("token expired")]
    Expired,
    /// Malformed token or invalid signature.
    #[error("invalid token")]
    Invalid,
    /// Structurally valid token of the other kind.
    #[error("wrong token kind")]
    WrongKind,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::MissingSecret => {
                AppError::internal("Token signing secret is not configured", json!({}))
            }
            TokenError::Expired => {
                AppError::unauthorized("Unauthorized", json!({ "reason": "expired" }))
            }
            TokenError::Invalid => {
                AppError::unauthorized("Unauthorized", json!({ "reason": "invalid token" }))
            }
            TokenError::WrongKind => {
                AppError::unauthorized("Unauthorized", json!({ "reason": "wrong token kind" }))
            }
        }
    }
}

/// Access token claims.
///
/// The profile fields default to empty on decode so a refresh token (which
/// omits them) still decodes far enough for the kind check to reject it as
/// [`TokenError::WrongKind`] rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Refresh token claims. Subject id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: i64,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Access + refresh token pair returned by register/login/refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and verifies JWTs (HS256).
///
/// Constructed from explicit configuration rather than ambient environment
/// lookups, so the missing-secret path is testable.
pub struct TokenService {
    secret: Option<String>,
    access_ttl: Duration,
}

impl TokenService {
    /// # Arguments
    ///
    /// - `secret` - signing secret; `None` makes every operation fail with
    ///   [`TokenError::MissingSecret`]
    /// - `access_ttl_days` - access token lifetime (default config: 7)
    pub fn new(secret: Option<String>, access_ttl_days: i64) -> Self {
        Self {
            secret,
            access_ttl: Duration::days(access_ttl_days),
        }
    }

    /// Every issue/verify call goes through here; configuration is
    /// re-checked at call time per the service contract.
    fn secret_bytes(&self) -> Result<&[u8], TokenError> {
        self.secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(TokenError::MissingSecret)
    }

    /// Issues an access token embedding the user's profile claims.
    pub fn issue_access(&self, user: &User) -> Result<String, TokenError> {
        let secret = self.secret_bytes()?;
        let now = Utc::now();

        let claims = AccessClaims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            token_type: "access".to_string(),
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|_| TokenError::Invalid)
    }

    /// Issues a refresh token carrying the subject id only.
    pub fn issue_refresh(&self, user_id: i64) -> Result<String, TokenError> {
        let secret = self.secret_bytes()?;
        let now = Utc::now();

        let claims = RefreshClaims {
            sub: user_id,
            token_type: "refresh".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(REFRESH_TTL_DAYS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|_| TokenError::Invalid)
    }

    /// Issues an access + refresh pair for a user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access(user)?,
            refresh_token: self.issue_refresh(user.id)?,
        })
    }

    /// Verifies an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`TokenError::Expired`] past `exp`
    /// - [`TokenError::WrongKind`] for a refresh token
    /// - [`TokenError::Invalid`] for anything malformed or mis-signed
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let secret = self.secret_bytes()?;

        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map_err(map_decode_error)?;

        if data.claims.token_type != "access" {
            return Err(TokenError::WrongKind);
        }

        Ok(data.claims)
    }

    /// Verifies a refresh token and returns the subject id.
    ///
    /// Mirrors [`Self::verify_access`]: wrong-kind tokens and expired
    /// tokens surface as distinct errors.
    pub fn verify_refresh(&self, token: &str) -> Result<i64, TokenError> {
        let secret = self.secret_bytes()?;

        let data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map_err(map_decode_error)?;

        if data.claims.token_type != "refresh" {
            return Err(TokenError::WrongKind);
        }

        Ok(data.claims.sub)
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}
