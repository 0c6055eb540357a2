use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// The role of a user.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, bypasses ownership checks.
    Admin,
    /// Regular account, limited to its own resources.
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A user account as stored in the database.
///
/// The password hash is never serialized, so a `User` can be returned from
/// handlers as-is.
#[derive(Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields needed to insert a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Payload for creating a user (admin only).
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Payload for changing a user's role.
#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Payload for activating or deactivating a user.
#[derive(Debug, Deserialize)]
pub struct ActiveUpdate {
    pub is_active: bool,
}

/// Payload for changing the caller's own password.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordChange {
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Lower-cases and trims an email so lookups and the unique constraint agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
