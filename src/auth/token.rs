use crate::models::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Distinguishes the two kinds of token this service signs.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject of the token, the user's id.
    pub sub: i32,
    /// Role at issuance time. Present on access tokens only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
}

/// Why a token was rejected or could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    BadSignature,
    #[error("Token is malformed")]
    Malformed,
    #[error("Token is expired")]
    Expired,
    #[error("Expected a {expected} token, got a {actual} token")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

/// Signs and validates access and refresh tokens with a single HS256 key.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issues a short-lived access token carrying the user's current role.
    pub fn issue_access(&self, user_id: i32, role: Role) -> Result<String, TokenError> {
        self.issue(user_id, Some(role), TokenType::Access, self.access_ttl)
    }

    /// Issues a long-lived refresh token. It carries no role.
    pub fn issue_refresh(&self, user_id: i32) -> Result<String, TokenError> {
        self.issue(user_id, None, TokenType::Refresh, self.refresh_ttl)
    }

    fn issue(
        &self,
        user_id: i32,
        role: Option<Role>,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            token_type,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies signature and expiry, then checks the token is of the `expected` type.
    pub fn validate(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        // The decoder only rejects `exp < now`; a token expiring this second is already dead.
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        if claims.token_type != expected {
            return Err(TokenError::WrongType {
                expected,
                actual: claims.token_type,
            });
        }
        if expected == TokenType::Access && claims.role.is_none() {
            return Err(TokenError::Malformed);
        }

        Ok(claims)
    }
}
