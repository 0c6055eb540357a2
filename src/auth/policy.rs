//! Role and ownership checks.
//!
//! Both checks are pure functions of the caller's identity and the target
//! resource's metadata. Admins satisfy every role requirement and bypass
//! ownership checks.

use super::extractors::AuthenticatedUser;
use super::AuthError;
use crate::models::Role;

/// Fails with `Forbidden` unless `user` holds `role` or is an admin.
pub fn require_role(user: &AuthenticatedUser, role: Role) -> Result<(), AuthError> {
    if user.role == Role::Admin || user.role == role {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

/// Fails with `Forbidden` unless `user` owns the resource or is an admin.
pub fn require_owner(user: &AuthenticatedUser, resource_owner_id: i32) -> Result<(), AuthError> {
    if user.role == Role::Admin || user.id == resource_owner_id {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
