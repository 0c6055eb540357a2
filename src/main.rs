use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;

use taskguard::auth::{AuthMiddleware, PasswordHasher, TokenService};
use taskguard::config::Config;
use taskguard::repository::{PgTaskRepository, PgUserRepository};
use taskguard::routes::{self, health};
use taskguard::AppServices;

fn startup_error<E>(context: &str, error: E) -> io::Error
where
    E: std::fmt::Display,
{
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| startup_error("Failed to connect to database", e))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;

    let services = AppServices::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgTaskRepository::new(pool)),
        TokenService::new(
            config.jwt_secret.as_bytes(),
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        ),
        PasswordHasher::new(),
    );

    info!("Starting taskguard server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .configure(|cfg| services.register(cfg))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api/v1")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
