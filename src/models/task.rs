use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::employee_tasks::{self, TaskStatus};

/// Body of `POST /tasks` and `PUT /tasks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub employee_id: i32,
    pub task_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: i32,
    pub employee_id: i32,
    pub task_description: String,
    pub status: TaskStatus,
    pub assigned_at: DateTime<FixedOffset>,
    pub completed_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<employee_tasks::Model> for TaskResponse {
    fn from(task: employee_tasks::Model) -> Self {
        Self {
            id: task.id,
            employee_id: task.employee_id,
            task_description: task.task_description,
            status: task.status,
            assigned_at: task.assigned_at,
            completed_at: task.completed_at,
            created_at: task.created_at,
        }
    }
}
