use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::extractors::AuthenticatedUser;
use super::password::PasswordHasher;
use super::token::{TokenService, TokenType};
use super::AuthError;
use crate::models::normalize_email;
use crate::repository::UserRepository;

lazy_static! {
    // Verified against when the email is unknown, so a miss costs as much as a wrong password.
    static ref DUMMY_DIGEST: Option<String> = PasswordHasher::new()
        .hash("taskguard-dummy-password")
        .ok();
}

/// Tokens returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

/// A freshly minted access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Login, refresh and per-request identification.
///
/// Holds no per-request state; one instance is shared by every worker.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verifies credentials and issues an access + refresh token pair.
    ///
    /// Unknown email, inactive account and wrong password all fail with the
    /// same `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        let user = match user {
            Some(user) => user,
            None => {
                if let Some(digest) = DUMMY_DIGEST.as_ref() {
                    self.hasher
                        .verify_blocking(password.to_string(), digest.clone())
                        .await;
                }
                debug!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await;
        if !matches {
            warn!("Login rejected: wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            warn!("Login rejected: user {} is inactive", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access(user.id, user.role)?;
        let refresh_token = self.tokens.issue_refresh(user.id)?;
        debug!("User {} logged in", user.id);

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The role is read from the current user record, not from the token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, AuthError> {
        let claims = self
            .tokens
            .validate(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                debug!("Refresh rejected: {}", e);
                AuthError::InvalidToken
            })?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        if !user.is_active {
            warn!("Refresh rejected: user {} is inactive", user.id);
            return Err(AuthError::InactiveAccount);
        }

        Ok(AccessToken {
            access_token: self.tokens.issue_access(user.id, user.role)?,
            token_type: "bearer".to_string(),
        })
    }

    /// Resolves an access token to the caller's identity.
    ///
    /// Trusts the claims once signature and expiry check out; role or
    /// activation changes show up only after the token expires.
    pub fn identify(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self
            .tokens
            .validate(access_token, TokenType::Access)
            .map_err(|e| {
                debug!("Access token rejected: {}", e);
                AuthError::Unauthorized
            })?;

        let role = claims.role.ok_or(AuthError::Unauthorized)?;
        Ok(AuthenticatedUser {
            id: claims.sub,
            role,
        })
    }
}
