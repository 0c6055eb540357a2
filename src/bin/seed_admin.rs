//! Creates the initial admin account.
//!
//! Reads `DATABASE_URL`, `ADMIN_EMAIL` (default `admin@local.com`) and
//! `ADMIN_PASSWORD` (default `admin123456`). Does nothing if a user with that
//! email already exists.

use dotenv::dotenv;
use log::{error, info};
use sqlx::PgPool;
use std::env;
use std::process::ExitCode;

use taskguard::auth::PasswordHasher;
use taskguard::repository::PgUserRepository;
use taskguard::services::{seed_admin, SeedOutcome};

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Ok(database_url) = env::var("DATABASE_URL") else {
        error!("DATABASE_URL is missing in env");
        return ExitCode::FAILURE;
    };
    let email = env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@local.com".to_string());
    let password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123456".to_string());

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let repo = PgUserRepository::new(pool.clone());
    let outcome = seed_admin(&repo, &PasswordHasher::new(), &email, &password).await;
    pool.close().await;

    match outcome {
        Ok(SeedOutcome::Created(id)) => {
            info!("Admin created: {} (id {})", email, id);
            ExitCode::SUCCESS
        }
        Ok(SeedOutcome::AlreadyExists(id)) => {
            info!("Admin already exists: {} (id {})", email, id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to seed admin: {}", e);
            ExitCode::FAILURE
        }
    }
}
