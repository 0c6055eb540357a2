pub mod extractors;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod service;
pub mod token;

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{PasswordError, PasswordHasher};
pub use policy::{require_owner, require_role};
pub use service::{AccessToken, AuthService, TokenPair};
pub use token::{Claims, TokenError, TokenService, TokenType};

/// Failure kinds of the authentication and authorization flow.
///
/// Messages are deliberately coarse: they never reveal whether an email
/// exists or why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Account is inactive")]
    InactiveAccount,
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal authentication error: {0}")]
    Internal(String),
    #[error("Credential store error: {0}")]
    Storage(String),
}

impl From<PasswordError> for AuthError {
    fn from(error: PasswordError) -> Self {
        AuthError::Internal(error.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(error: TokenError) -> Self {
        AuthError::Internal(error.to_string())
    }
}

/// OAuth2-style password form posted to the login endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// The account's email address. Not format-checked: anything that is not
    /// a known email fails as invalid credentials.
    #[validate(length(min = 1, max = 254))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body of a refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_form_validation() {
        let valid = LoginForm {
            username: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let not_an_email = LoginForm {
            username: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(not_an_email.validate().is_ok());

        let empty_username = LoginForm {
            username: String::new(),
            password: "password123".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = LoginForm {
            username: "test@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_library_errors_become_internal() {
        let err: AuthError = TokenError::Encoding("boom".into()).into();
        assert!(matches!(err, AuthError::Internal(_)));

        let err: AuthError = PasswordError::HashingFailed("boom".into()).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
