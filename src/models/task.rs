//! To-do task models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Task id, assigned by the client or by the store
pub type TaskId = i64;

/// To-do task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Task {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Query string of `POST /tasks`
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskQuery {
    pub task_id: Option<TaskId>,
}
