use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{require_owner, AuthenticatedUser};
use crate::error::AppError;
use crate::models::{Role, Task, TaskInput, TaskQuery};
use crate::repository::TaskRepository;

/// Task CRUD scoped by ownership.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Regular users only ever see their own tasks; admins see everything
    /// unless they filter by `owner_id`.
    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        mut query: TaskQuery,
    ) -> Result<Vec<Task>, AppError> {
        if actor.role != Role::Admin {
            query.owner_id = Some(actor.id);
        }
        Ok(self.tasks.list(&query).await?)
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        Ok(self.tasks.create(Task::new(input, actor.id)).await?)
    }

    pub async fn get(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<Task, AppError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        require_owner(actor, task.owner_id)?;
        Ok(task)
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        self.get(actor, id).await?;
        self.tasks
            .update(id, &input)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> Result<(), AppError> {
        self.get(actor, id).await?;
        if !self.tasks.delete(id).await? {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
