use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{TaskInput, TaskQuery},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Retrieves a list of tasks.
///
/// Regular users get their own tasks; admins get every task, optionally
/// narrowed by `owner_id`. Tasks are ordered by creation date, newest first.
///
/// ## Query Parameters:
/// - `status` (optional): e.g. "todo", "in_progress", "done".
/// - `priority` (optional): e.g. "low", "medium", "high".
/// - `owner_id` (optional, admins only): the owning user's id.
/// - `search` (optional): case-insensitive match on title or description.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid access token.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskService>,
    actor: AuthenticatedUser,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let found = tasks.list(&actor, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Creates a new task owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the new `Task`.
/// - `400 Bad Request`: the body cannot be deserialized.
/// - `401 Unauthorized`: missing or invalid access token.
/// - `422 Unprocessable Entity`: `TaskInput` validation failed.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    actor: AuthenticatedUser,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let task = tasks.create(&actor, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a task by id.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `403 Forbidden`: the caller neither owns the task nor is an admin.
/// - `404 Not Found`: no task with this id.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    actor: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(&actor, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Replaces a task's fields. Owner or admin only.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    actor: AuthenticatedUser,
    id: web::Path<Uuid>,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let task = tasks.update(&actor, id.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Owner or admin only.
///
/// ## Responses:
/// - `204 No Content`: deleted.
/// - `403 Forbidden`: the caller neither owns the task nor is an admin.
/// - `404 Not Found`: no task with this id.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    actor: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    tasks.delete(&actor, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

