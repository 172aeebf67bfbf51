//! Employee tasks

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::employee_tasks::{self, TaskStatus};
use crate::entities::employees::EmployeeRole;
use crate::entities::prelude::*;
use crate::error::{AppError, AppResult, DbResultExt};
use crate::models::task::TaskRequest;
use crate::services::employees;

/// `completed_at` for a task entering `status`
fn completion_stamp(status: TaskStatus, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    match status {
        TaskStatus::Completed => Some(now),
        TaskStatus::Pending | TaskStatus::InProgress => None,
    }
}

async fn validate(db: &DatabaseConnection, request: &TaskRequest) -> AppResult<()> {
    if request.task_description.trim().is_empty() {
        return Err(AppError::validation("task description cannot be empty"));
    }

    let assignee = employees::get_employee(db, request.employee_id).await?;
    if assignee.role != EmployeeRole::Employee {
        return Err(AppError::validation(
            "tasks can only be assigned to employees with role 'employee'",
        ));
    }
    Ok(())
}

pub async fn get_task(db: &DatabaseConnection, task_id: i32) -> AppResult<employee_tasks::Model> {
    EmployeeTasks::find_by_id(task_id)
        .one(db)
        .await
        .context("failed to find task")?
        .ok_or_else(|| AppError::not_found("task not found"))
}

pub async fn list_tasks(db: &DatabaseConnection) -> AppResult<Vec<employee_tasks::Model>> {
    EmployeeTasks::find()
        .order_by_asc(employee_tasks::Column::Id)
        .all(db)
        .await
        .context("failed to list tasks")
}

pub async fn list_for_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> AppResult<Vec<employee_tasks::Model>> {
    EmployeeTasks::find()
        .filter(employee_tasks::Column::EmployeeId.eq(employee_id))
        .order_by_asc(employee_tasks::Column::Id)
        .all(db)
        .await
        .context("failed to list tasks for employee")
}

pub async fn create_task(
    db: &DatabaseConnection,
    request: TaskRequest,
) -> AppResult<employee_tasks::Model> {
    validate(db, &request).await?;

    let now = Utc::now().fixed_offset();
    let task = employee_tasks::ActiveModel {
        employee_id: Set(request.employee_id),
        task_description: Set(request.task_description),
        status: Set(TaskStatus::Pending),
        assigned_at: Set(now),
        completed_at: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .context("failed to create task")?;

    tracing::info!(task_id = task.id, employee_id = task.employee_id, "Task assigned");
    Ok(task)
}

/// Reassign or reword a task; status is changed through [`update_status`]
pub async fn update_task(
    db: &DatabaseConnection,
    task_id: i32,
    request: TaskRequest,
) -> AppResult<employee_tasks::Model> {
    validate(db, &request).await?;

    let current = get_task(db, task_id).await?;
    let reassigned = current.employee_id != request.employee_id;

    let mut active: employee_tasks::ActiveModel = current.into();
    active.task_description = Set(request.task_description);
    active.employee_id = Set(request.employee_id);
    if reassigned {
        active.assigned_at = Set(Utc::now().fixed_offset());
    }

    active.update(db).await.context("failed to update task")
}

pub async fn update_status(
    db: &DatabaseConnection,
    task_id: i32,
    status: TaskStatus,
) -> AppResult<employee_tasks::Model> {
    let current = get_task(db, task_id).await?;

    let mut active: employee_tasks::ActiveModel = current.into();
    active.status = Set(status);
    active.completed_at = Set(completion_stamp(status, Utc::now().fixed_offset()));

    let task = active
        .update(db)
        .await
        .context("failed to update task status")?;

    tracing::info!(task_id, status = ?task.status, "Task status changed");
    Ok(task)
}

pub async fn delete_task(db: &DatabaseConnection, task_id: i32) -> AppResult<()> {
    let result = EmployeeTasks::delete_by_id(task_id)
        .exec(db)
        .await
        .context("failed to delete task")?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("task not found"));
    }
    Ok(())
}
