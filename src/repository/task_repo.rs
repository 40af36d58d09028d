//! In-memory to-do task store

use crate::{
    error::AppError,
    models::task::{Task, TaskId},
};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Tasks keyed by id, owned by the application state
#[derive(Default)]
pub struct TaskStore {
    tasks: RwLock<BTreeMap<TaskId, Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task under `id`, or under the next free id (max + 1) when `id` is `None`.
    /// Ids start at 1.
    pub async fn create(&self, id: Option<TaskId>, task: Task) -> Result<TaskId, AppError> {
        let mut tasks = self.tasks.write().await;

        let id = match id {
            Some(id) if id < 1 => {
                return Err(AppError::Validation("task_id must be >= 1".to_string()))
            }
            Some(id) if tasks.contains_key(&id) => return Err(AppError::TaskExists),
            Some(id) => id,
            None => match tasks.keys().next_back() {
                None => 1,
                Some(last) => last
                    .checked_add(1)
                    .ok_or_else(|| AppError::Validation("task id space exhausted".to_string()))?,
            },
        };
        tasks.insert(id, task);

        Ok(id)
    }

    pub async fn list(&self) -> BTreeMap<TaskId, Task> {
        self.tasks.read().await.clone()
    }

    pub async fn get(&self, id: TaskId) -> Result<Task, AppError> {
        self.tasks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("Task"))
    }

    /// Replace an existing task
    pub async fn update(&self, id: TaskId, task: Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;

        let slot = tasks.get_mut(&id).ok_or(AppError::NotFound("Task"))?;
        *slot = task.clone();

        Ok(task)
    }

    pub async fn delete(&self, id: TaskId) -> Result<(), AppError> {
        self.tasks
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound("Task"))
    }
}
