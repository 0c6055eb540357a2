use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthService, PasswordHasher, TokenService};
use crate::repository::{TaskRepository, UserRepository};
use crate::services::{TaskService, UserService};

/// The services shared by every worker, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub auth: web::Data<AuthService>,
    pub users: web::Data<UserService>,
    pub tasks: web::Data<TaskService>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        task_repo: Arc<dyn TaskRepository>,
        tokens: TokenService,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(
                user_repo.clone(),
                hasher.clone(),
                tokens,
            )),
            users: web::Data::new(UserService::new(user_repo, hasher)),
            tasks: web::Data::new(TaskService::new(task_repo)),
        }
    }

    /// Registers the services as app data. Use with `App::configure`.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.auth.clone())
            .app_data(self.users.clone())
            .app_data(self.tasks.clone());
    }
}
