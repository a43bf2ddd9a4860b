//! Task queries.
//!
//! Tasks carry no owner column of their own; every ownership-relevant fetch
//! joins the parent project so callers can run the same ownership check they
//! run for projects.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::ids::uuidv7;
use crate::models::project::{Task, TaskStatus, TaskWithOwner};

type TaskRow = (
    String,
    String,
    String,
    Option<String>,
    String,
    Option<DateTime<Utc>>,
    i32,
    DateTime<Utc>,
    DateTime<Utc>,
);

const TASK_COLUMNS: &str = "t.id::text, t.project_id::text, t.title, t.description, \
     t.status, t.due_date, t.position, t.created_at, t.updated_at";

fn from_row(row: TaskRow) -> Task {
    let (id, project_id, title, description, status, due_date, position, created_at, updated_at) =
        row;
    Task {
        id,
        project_id,
        title,
        description,
        status: TaskStatus::parse(&status).unwrap_or_default(),
        due_date,
        position,
        created_at,
        updated_at,
    }
}

/// Fetch a task by id, joined with its project's owner.
pub async fn find_task(pool: &PgPool, id: &str) -> Result<Option<TaskWithOwner>, sqlx::Error> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    type TaskOwnerRow = (
        String,
        String,
        String,
        Option<String>,
        String,
        Option<DateTime<Utc>>,
        i32,
        DateTime<Utc>,
        DateTime<Utc>,
        String,
    );
    let row = sqlx::query_as::<_, TaskOwnerRow>(&format!(
        "SELECT {TASK_COLUMNS}, p.owner_id::text \
         FROM tasks t JOIN projects p ON p.id = t.project_id \
         WHERE t.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|(a, b, c, d, e, f, g, h, i, owner_id)| TaskWithOwner {
        task: from_row((a, b, c, d, e, f, g, h, i)),
        owner_id,
    }))
}

/// List a project's tasks in board order (position, then recency).
pub async fn list_tasks_by_project(
    pool: &PgPool,
    project_id: &str,
) -> Result<Vec<Task>, sqlx::Error> {
    let Ok(project) = Uuid::parse_str(project_id) else {
        return Ok(Vec::new());
    };
    let rows = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks t \
         WHERE t.project_id = $1 \
         ORDER BY t.position ASC, t.updated_at DESC"
    ))
    .bind(project)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(from_row).collect())
}

/// Create a task at the end of the project's board.
pub async fn create_task(
    pool: &PgPool,
    project_id: &str,
    title: &str,
    description: Option<&str>,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
) -> Result<Task, sqlx::Error> {
    let project = Uuid::parse_str(project_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    let next_position = sqlx::query_scalar::<_, i32>(
        "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE project_id = $1",
    )
    .bind(project)
    .fetch_one(pool)
    .await?;

    let row = sqlx::query_as::<_, TaskRow>(&format!(
        "INSERT INTO tasks (id, project_id, title, description, status, due_date, position) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(uuidv7())
    .bind(project)
    .bind(title)
    .bind(description)
    .bind(status.as_str())
    .bind(due_date)
    .bind(next_position)
    .fetch_one(pool)
    .await?;
    Ok(from_row(row))
}

/// Update a task. Title, description, and due date are overwritten; status
/// and position keep their stored value when absent.
pub async fn update_task(
    pool: &PgPool,
    id: &str,
    title: &str,
    description: Option<&str>,
    status: Option<TaskStatus>,
    due_date: Option<DateTime<Utc>>,
    position: Option<i32>,
) -> Result<Task, sqlx::Error> {
    let id = Uuid::parse_str(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let row = sqlx::query_as::<_, TaskRow>(&format!(
        "UPDATE tasks t SET title = $2, description = $3, \
             status = COALESCE($4, status), due_date = $5, \
             position = COALESCE($6, position), updated_at = now() \
         WHERE t.id = $1 \
         RETURNING {TASK_COLUMNS}"
    ))
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(status.map(|s| s.as_str()))
    .bind(due_date)
    .bind(position)
    .fetch_one(pool)
    .await?;
    Ok(from_row(row))
}

/// Delete a task.
pub async fn delete_task(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(());
    };
    sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
