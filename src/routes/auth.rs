use crate::{
    auth::{AuthService, AuthenticatedUser, LoginForm, RefreshRequest},
    error::AppError,
    models::PasswordChange,
    services::UserService,
};
use actix_web::{get, post, put, web, HttpResponse, Responder};
use validator::Validate;

/// Login
///
/// Accepts an OAuth2-style password form (`username` is the email) and
/// returns an access + refresh token pair.
///
/// ## Responses:
/// - `200 OK`: `{access_token, refresh_token, token_type}`.
/// - `401 Unauthorized`: unknown email, wrong password or inactive account.
/// - `422 Unprocessable Entity`: the form fails validation.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    form.validate()?;
    let tokens = auth.login(&form.username, &form.password).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

/// Refresh
///
/// Exchanges a refresh token for a new access token carrying the user's
/// current role.
///
/// ## Responses:
/// - `200 OK`: `{access_token, token_type}`.
/// - `401 Unauthorized`: the refresh token is invalid, expired or not a refresh token.
/// - `403 Forbidden`: the account has been deactivated.
#[post("/refresh")]
pub async fn refresh(
    auth: web::Data<AuthService>,
    body: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let token = auth.refresh(&body.refresh_token).await?;
    Ok(HttpResponse::Ok().json(token))
}

/// Current user's profile.
#[get("/me")]
pub async fn me(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = users.get_user(&user, user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Change the caller's password. Requires the current password.
#[put("/password")]
pub async fn change_password(
    users: web::Data<UserService>,
    user: AuthenticatedUser,
    body: web::Json<PasswordChange>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    users.change_password(&user, body.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
