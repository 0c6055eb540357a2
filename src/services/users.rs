use log::info;
use std::sync::Arc;

use crate::auth::{require_owner, require_role, AuthenticatedUser, PasswordHasher};
use crate::error::AppError;
use crate::models::{normalize_email, NewUser, PasswordChange, Role, User, UserInput};
use crate::repository::{RepositoryError, UserRepository};

/// What `seed_admin` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(i32),
    AlreadyExists(i32),
}

/// User management. Every operation takes the acting user and enforces the
/// access policy before touching the repository.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Creates an account. Admin only.
    pub async fn create_user(
        &self,
        actor: &AuthenticatedUser,
        input: UserInput,
    ) -> Result<User, AppError> {
        require_role(actor, Role::Admin)?;

        let password_hash = self
            .hasher
            .hash_blocking(input.password)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                email: normalize_email(&input.email),
                password_hash,
                role: input.role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    AppError::Conflict("Email already registered".into())
                }
                other => other.into(),
            })?;

        info!("User {} created by {}", user.id, actor.id);
        Ok(user)
    }

    /// Lists every account. Admin only.
    pub async fn list_users(&self, actor: &AuthenticatedUser) -> Result<Vec<User>, AppError> {
        require_role(actor, Role::Admin)?;
        Ok(self.users.list().await?)
    }

    /// A user may read their own profile; admins may read any.
    pub async fn get_user(&self, actor: &AuthenticatedUser, id: i32) -> Result<User, AppError> {
        require_owner(actor, id)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Changes a user's role. Admin only. Tokens already issued keep the old role.
    pub async fn set_role(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        role: Role,
    ) -> Result<User, AppError> {
        require_role(actor, Role::Admin)?;
        let user = self
            .users
            .set_role(id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        info!("User {} role set to {} by {}", id, role, actor.id);
        Ok(user)
    }

    /// Activates or soft-disables a user. Admin only; admins cannot disable themselves.
    pub async fn set_active(
        &self,
        actor: &AuthenticatedUser,
        id: i32,
        is_active: bool,
    ) -> Result<User, AppError> {
        require_role(actor, Role::Admin)?;
        if actor.id == id && !is_active {
            return Err(AppError::BadRequest("Cannot deactivate your own account".into()));
        }

        let user = self
            .users
            .set_active(id, is_active)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        info!("User {} active={} set by {}", id, is_active, actor.id);
        Ok(user)
    }

    /// Changes the caller's own password after checking the current one.
    pub async fn change_password(
        &self,
        actor: &AuthenticatedUser,
        change: PasswordChange,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_id(actor.id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

        if !self
            .hasher
            .verify_blocking(change.current_password, user.password_hash)
            .await
        {
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }

        let password_hash = self
            .hasher
            .hash_blocking(change.new_password)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        self.users.set_password_hash(actor.id, &password_hash).await?;

        info!("User {} changed their password", actor.id);
        Ok(())
    }
}

/// Creates the initial admin account unless a user with `email` already exists.
pub async fn seed_admin(
    users: &dyn UserRepository,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<SeedOutcome, AppError> {
    let email = normalize_email(email);
    if let Some(existing) = users.find_by_email(&email).await? {
        return Ok(SeedOutcome::AlreadyExists(existing.id));
    }

    let password_hash = hasher
        .hash_blocking(password.to_string())
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let admin = users
        .create(NewUser {
            email,
            password_hash,
            role: Role::Admin,
        })
        .await?;

    Ok(SeedOutcome::Created(admin.id))
}
