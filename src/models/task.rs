use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

/// Input structure for creating or updating a task.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,

    pub status: TaskStatus,
}

/// A task as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The user who created the task. Non-admins only see their own tasks.
    pub owner_id: i32,
}

/// Query parameters for filtering tasks when listing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Only honoured for admins; regular users are always scoped to themselves.
    pub owner_id: Option<i32>,
    /// Case-insensitive match against title or description.
    pub search: Option<String>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput`, owned by `owner_id`.
    pub fn new(input: TaskInput, owner_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: input.status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
            owner_id,
        }
    }

    /// Whether this task passes every filter set in `query`.
    pub fn matches(&self, query: &TaskQuery) -> bool {
        if query.owner_id.map_or(false, |owner| owner != self.owner_id) {
            return false;
        }
        if query.status.map_or(false, |status| status != self.status) {
            return false;
        }
        if query.priority.is_some() && query.priority != self.priority {
            return false;
        }
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            let in_title = self.title.to_lowercase().contains(&needle);
            let in_description = self
                .description
                .as_deref()
                .map_or(false, |d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}
