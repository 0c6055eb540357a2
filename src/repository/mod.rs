//! Persistence ports and their implementations.
//!
//! Services only talk to the [`UserRepository`] and [`TaskRepository`] traits.
//! The Postgres implementations back the running server; the in-memory ones
//! back tests and local experiments.

pub mod memory;
pub mod tasks;
pub mod users;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewUser, Role, Task, TaskInput, TaskQuery, User};

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use tasks::PgTaskRepository;
pub use users::PgUserRepository;

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        if let Some(db_err) = error.as_database_error() {
            if db_err.is_unique_violation() {
                return RepositoryError::Conflict(
                    db_err.constraint().unwrap_or("unique constraint").to_string(),
                );
            }
        }
        RepositoryError::Database(error.to_string())
    }
}

/// Access to persisted user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;

    /// Inserts a new, active user.
    ///
    /// # Errors
    /// * `Conflict` - the email is already registered
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Returns `None` when no user has this id.
    async fn set_role(&self, id: i32, role: Role) -> Result<Option<User>, RepositoryError>;

    /// Returns `None` when no user has this id.
    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<User>, RepositoryError>;

    /// Returns `false` when no user has this id.
    async fn set_password_hash(&self, id: i32, password_hash: &str)
        -> Result<bool, RepositoryError>;
}

/// Access to persisted tasks. Ownership rules are enforced by the caller.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Tasks matching `query`, newest first.
    async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError>;

    async fn create(&self, task: Task) -> Result<Task, RepositoryError>;

    /// Returns `None` when no task has this id.
    async fn update(&self, id: Uuid, input: &TaskInput) -> Result<Option<Task>, RepositoryError>;

    /// Returns `false` when no task has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
