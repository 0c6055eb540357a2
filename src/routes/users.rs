use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{ActiveUpdate, RoleUpdate, UserInput},
    services::UserService,
};
use actix_web::{get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Lists all users. Admin only.
#[get("")]
pub async fn list_users(
    users: web::Data<UserService>,
    actor: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(users.list_users(&actor).await?))
}

/// Creates a user. Admin only.
///
/// ## Responses:
/// - `201 Created`: the new user (without password hash).
/// - `403 Forbidden`: the caller is not an admin.
/// - `409 Conflict`: the email is already registered.
/// - `422 Unprocessable Entity`: invalid email or password length.
#[post("")]
pub async fn create_user(
    users: web::Data<UserService>,
    actor: AuthenticatedUser,
    body: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let user = users.create_user(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// A user's profile. Users may only read their own; admins may read any.
#[get("/{id}")]
pub async fn get_user(
    users: web::Data<UserService>,
    actor: AuthenticatedUser,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(users.get_user(&actor, id.into_inner()).await?))
}

/// Changes a user's role. Admin only.
#[patch("/{id}/role")]
pub async fn set_role(
    users: web::Data<UserService>,
    actor: AuthenticatedUser,
    id: web::Path<i32>,
    body: web::Json<RoleUpdate>,
) -> Result<impl Responder, AppError> {
    let user = users.set_role(&actor, id.into_inner(), body.role).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Activates or deactivates a user. Admin only.
#[patch("/{id}/active")]
pub async fn set_active(
    users: web::Data<UserService>,
    actor: AuthenticatedUser,
    id: web::Path<i32>,
    body: web::Json<ActiveUpdate>,
) -> Result<impl Responder, AppError> {
    let user = users
        .set_active(&actor, id.into_inner(), body.is_active)
        .await?;
    Ok(HttpResponse::Ok().json(user))
}
