#![allow(dead_code, unused_macros)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test;
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;

use taskguard::auth::{PasswordHasher, TokenPair, TokenService};
use taskguard::models::Role;
use taskguard::repository::{InMemoryTaskRepository, InMemoryUserRepository};
use taskguard::services::seed_admin;
use taskguard::AppServices;

pub const SECRET: &[u8] = b"integration_test_secret_key_32_bytes!";
pub const ADMIN_EMAIL: &str = "admin@local.com";
pub const ADMIN_PASSWORD: &str = "admin123456";

/// Services over in-memory repositories, with the default admin seeded.
pub struct TestContext {
    pub services: AppServices,
    pub users: Arc<InMemoryUserRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
}

impl TestContext {
    pub async fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let hasher = PasswordHasher::new();

        seed_admin(users.as_ref(), &hasher, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("Failed to seed admin");

        let services = AppServices::new(
            users.clone(),
            tasks.clone(),
            TokenService::new(SECRET, Duration::minutes(30), Duration::days(7)),
            hasher,
        );

        Self {
            services,
            users,
            tasks,
        }
    }
}

/// Builds the full application around a `TestContext`'s services.
macro_rules! test_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| services.register(cfg))
                .wrap(actix_web::middleware::Logger::default())
                .service(taskguard::routes::health::health)
                .service(
                    actix_web::web::scope("/api/v1")
                        .wrap(taskguard::auth::AuthMiddleware)
                        .configure(taskguard::routes::config),
                ),
        )
        .await
    }};
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Posts the login form and returns the status with the raw JSON body.
pub async fn try_login<S, B>(app: &S, email: &str, password: &str) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_form(&[("username", email), ("password", password)])
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> TokenPair
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = try_login(app, email, password).await;
    assert_eq!(status, 200, "Login failed for {}: {}", email, body);
    serde_json::from_value(body).expect("Failed to parse token pair")
}

/// Creates a user through the admin API and returns its id.
pub async fn create_user<S, B>(
    app: &S,
    admin_token: &str,
    email: &str,
    password: &str,
    role: Role,
) -> i32
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(admin_token))
        .set_json(json!({ "email": email, "password": password, "role": role }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "Failed to create user {}", email);
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_i64().expect("user id") as i32
}
