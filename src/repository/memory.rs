use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepositoryError, TaskRepository, UserRepository};
use crate::models::{NewUser, Role, Task, TaskInput, TaskQuery, User};

/// A `UserRepository` held in process memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }

        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn set_role(&self, id: i32, role: Role) -> Result<Option<User>, RepositoryError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<Option<User>, RepositoryError> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.is_active = is_active;
            u.clone()
        }))
    }

    async fn set_password_hash(
        &self,
        id: i32,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// A `TaskRepository` held in process memory.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, RepositoryError> {
        let tasks = self.tasks.read().await;
        let mut found: Vec<Task> = tasks.iter().filter(|t| t.matches(query)).cloned().collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, task: Task) -> Result<Task, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(RepositoryError::Conflict("tasks_pkey".to_string()));
        }
        tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, input: &TaskInput) -> Result<Option<Task>, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.title = input.title.clone();
            task.description = input.description.clone();
            task.priority = input.priority;
            task.status = input.status;
            task.due_date = input.due_date;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskPriority, TaskStatus};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        }
    }

    #[actix_rt::test]
    async fn test_user_crud() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(new_user("one@example.com")).await.unwrap();
        let second = repo.create(new_user("two@example.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_active);

        assert!(matches!(
            repo.create(new_user("one@example.com")).await,
            Err(RepositoryError::Conflict(_))
        ));

        let found = repo.find_by_email("two@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, 2);
        assert!(repo.find_by_email("three@example.com").await.unwrap().is_none());

        let promoted = repo.set_role(1, Role::Admin).await.unwrap().unwrap();
        assert_eq!(promoted.role, Role::Admin);
        let disabled = repo.set_active(2, false).await.unwrap().unwrap();
        assert!(!disabled.is_active);
        assert!(repo.set_active(99, false).await.unwrap().is_none());

        assert!(repo.set_password_hash(1, "new-hash").await.unwrap());
        assert!(!repo.set_password_hash(99, "new-hash").await.unwrap());
        assert_eq!(
            repo.find_by_id(1).await.unwrap().unwrap().password_hash,
            "new-hash"
        );
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn test_task_crud() {
        let repo = InMemoryTaskRepository::new();
        let input = TaskInput {
            title: "Original".to_string(),
            description: None,
            priority: Some(TaskPriority::Low),
            status: TaskStatus::Todo,
            due_date: None,
        };

        let task = repo.create(Task::new(input.clone(), 1)).await.unwrap();
        repo.create(Task::new(input.clone(), 2)).await.unwrap();

        let mine = repo
            .list(&TaskQuery {
                owner_id: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(repo.list(&TaskQuery::default()).await.unwrap().len(), 2);

        let changed = TaskInput {
            title: "Changed".to_string(),
            status: TaskStatus::Done,
            ..input
        };
        let updated = repo.update(task.id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.title, "Changed");
        assert_eq!(updated.status, TaskStatus::Done);
        assert_eq!(updated.owner_id, 1);

        assert!(repo.delete(task.id).await.unwrap());
        assert!(!repo.delete(task.id).await.unwrap());
        assert!(repo.find_by_id(task.id).await.unwrap().is_none());
    }
}
