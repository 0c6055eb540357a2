use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;
use crate::models::Role;

/// The caller's identity, resolved from a validated access token.
///
/// `AuthMiddleware` inserts it into request extensions; handlers take it as
/// an extractor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub role: Role,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            // Route is not behind AuthMiddleware.
            None => ready(Err(AppError::Unauthorized("Not authenticated".into()).into())),
        }
    }
}
