use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{RepositoryError, TaskRepository};
use crate::models::{Task, TaskInput, TaskQuery};

const TASK_COLUMNS: &str =
    "id, title, description, priority, status, due_date, created_at, updated_at, owner_id";

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, RepositoryError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE TRUE"));

        if let Some(owner_id) = query.owner_id {
            builder.push(" AND owner_id = ").push_bind(owner_id);
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(priority) = query.priority {
            builder.push(" AND priority = ").push_bind(priority);
        }
        if let Some(search) = &query.search {
            let pattern = format!("%{}%", escape_like(search));
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\' OR description ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
        builder.push(" ORDER BY created_at DESC");

        let tasks = builder
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;

        Ok(tasks)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        let task =
            sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(task)
    }

    async fn create(&self, task: Task) -> Result<Task, RepositoryError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks
                 (id, title, description, priority, status, due_date,
                  created_at, updated_at, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(task.id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.priority)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(task.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: Uuid, input: &TaskInput) -> Result<Option<Task>, RepositoryError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = $1, description = $2, priority = $3, status = $4, due_date = $5,
                 updated_at = NOW()
             WHERE id = $6
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority)
        .bind(input.status)
        .bind(input.due_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Makes `%`, `_` and `\` match literally inside an `ILIKE ... ESCAPE '\'` pattern.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
