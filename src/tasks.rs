//! Task store operations, including the eager overdue-recompute pass.
//!
//! Every mutation commits immediately; there are no transactions spanning
//! more than one operation. `list` takes the `now` instant as a parameter so
//! the overdue boundaries are testable without a clock.

use log::debug;
use sqlx::SqlitePool;

use crate::due;
use crate::error::AppError;
use crate::models::{Task, TaskInput};

const TASK_COLUMNS: &str = "id, text, due, done, overdue, user_id";

/// Recomputes and persists the overdue flag for every task in the store,
/// the caller's or not, against the given `now` instant. A task with no due
/// value is never overdue. The flag is written unconditionally, done tasks
/// included.
pub async fn recompute_overdue(pool: &SqlitePool, now: &str) -> Result<(), AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!("SELECT {} FROM todos", TASK_COLUMNS))
        .fetch_all(pool)
        .await?;

    debug!("Recomputing overdue flags for {} tasks", tasks.len());
    for task in tasks {
        let overdue = task
            .due
            .as_deref()
            .map(|due| due::is_overdue(due, now))
            .unwrap_or(false);

        sqlx::query("UPDATE todos SET overdue = ? WHERE id = ?")
            .bind(overdue)
            .bind(task.id)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Runs the recompute pass, then returns the two list views: pending tasks
/// ascending by raw due string and completed tasks descending by raw due
/// string. SQLite's TEXT ordering is byte-wise, which is the lexical order
/// this service promises.
pub async fn list(pool: &SqlitePool, now: &str) -> Result<(Vec<Task>, Vec<Task>), AppError> {
    recompute_overdue(pool, now).await?;

    let pending = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM todos WHERE done = 0 ORDER BY due ASC",
        TASK_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    let completed = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM todos WHERE done = 1 ORDER BY due DESC",
        TASK_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok((pending, completed))
}

/// Inserts a new task for the given owner. The task starts pending and not
/// overdue; the next list pass settles the real overdue state.
pub async fn insert(pool: &SqlitePool, user_id: i64, input: &TaskInput) -> Result<Task, AppError> {
    let due = due::combine_due(&input.date, input.time_part());

    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO todos (text, due, done, overdue, user_id)
         VALUES (?, ?, 0, 0, ?)
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.text)
    .bind(due)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

pub async fn fetch(pool: &SqlitePool, task_id: i64) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM todos WHERE id = ?",
        TASK_COLUMNS
    ))
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Replaces a task's text and due value. The done flag is not part of the
/// edit form and must survive edits.
pub async fn update(pool: &SqlitePool, task_id: i64, input: &TaskInput) -> Result<Task, AppError> {
    let due = due::combine_due(&input.date, input.time_part());

    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE todos SET text = ?, due = ? WHERE id = ? RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(&input.text)
    .bind(due)
    .bind(task_id)
    .fetch_optional(pool)
    .await?;

    task.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Flips the done flag for mark-done and restore.
pub async fn set_done(pool: &SqlitePool, task_id: i64, done: bool) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE todos SET done = ? WHERE id = ?")
        .bind(done)
        .bind(task_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(())
}

/// Removes a task permanently.
pub async fn delete(pool: &SqlitePool, task_id: i64) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(task_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }
    Ok(())
}
