#![doc = "The `taskguard` library crate."]
#![doc = ""]
#![doc = "A layered CRUD backend: HTTP routes call services, services enforce the"]
#![doc = "access policy and call repositories, repositories own the SQL. The `auth`"]
#![doc = "module holds password hashing, token signing, the login/refresh/identify"]
#![doc = "flow and the role and ownership checks."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use crate::error::AppError;
pub use crate::state::AppServices;
