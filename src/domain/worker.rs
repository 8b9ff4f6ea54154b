use serde::{Deserialize, Serialize};

use crate::domain::ticket::optional_scalar;
use crate::error::{AppError, AppResult};

const DEFAULT_TASK: &str = "General Maintenance";

/// A casual worker on the maintenance roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Worker {
    #[serde(default, deserialize_with = "optional_scalar")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub task: String,
}

impl Worker {
    pub fn task_label(&self) -> &str {
        let task = self.task.trim();
        if task.is_empty() { DEFAULT_TASK } else { task }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWorker {
    pub name: String,
    pub task: String,
}

impl NewWorker {
    pub fn new(name: &str, task: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("worker name is required".to_string()));
        }
        let task = task.trim();
        Ok(Self {
            name: name.to_string(),
            task: if task.is_empty() {
                DEFAULT_TASK.to_string()
            } else {
                task.to_string()
            },
        })
    }
}
