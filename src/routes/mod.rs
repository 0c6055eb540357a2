pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Registers every `/api/v1` route. Mount inside a scope wrapped with
/// [`AuthMiddleware`](crate::auth::AuthMiddleware).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::refresh)
            .service(auth::me)
            .service(auth::change_password),
    )
    .service(
        web::scope("/users")
            .service(users::list_users)
            .service(users::create_user)
            .service(users::get_user)
            .service(users::set_role)
            .service(users::set_active),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
