//! Project queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::ids::uuidv7;
use crate::models::project::Project;

type ProjectRow = (
    String,
    String,
    String,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

const PROJECT_COLUMNS: &str =
    "id::text, owner_id::text, title, description, created_at, updated_at";

fn from_row(row: ProjectRow) -> Project {
    let (id, owner_id, title, description, created_at, updated_at) = row;
    Project {
        id,
        owner_id,
        title,
        description,
        created_at,
        updated_at,
    }
}

/// Fetch a project by id.
pub async fn find_project(pool: &PgPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(from_row))
}

/// List a user's projects, most recently updated first.
pub async fn list_projects_by_owner(
    pool: &PgPool,
    owner_id: &str,
) -> Result<Vec<Project>, sqlx::Error> {
    let Ok(owner) = Uuid::parse_str(owner_id) else {
        return Ok(Vec::new());
    };
    let rows = sqlx::query_as::<_, ProjectRow>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects WHERE owner_id = $1 ORDER BY updated_at DESC"
    ))
    .bind(owner)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(from_row).collect())
}

/// Create a project for the given owner.
pub async fn create_project(
    pool: &PgPool,
    owner_id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    let owner = Uuid::parse_str(owner_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let row = sqlx::query_as::<_, ProjectRow>(&format!(
        "INSERT INTO projects (id, owner_id, title, description) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {PROJECT_COLUMNS}"
    ))
    .bind(uuidv7())
    .bind(owner)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(from_row(row))
}

/// Update a project's title and description. Description is overwritten, not
/// merged — an absent description clears the stored one.
pub async fn update_project(
    pool: &PgPool,
    id: &str,
    title: &str,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    let id = Uuid::parse_str(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    let row = sqlx::query_as::<_, ProjectRow>(&format!(
        "UPDATE projects SET title = $2, description = $3, updated_at = now() \
         WHERE id = $1 \
         RETURNING {PROJECT_COLUMNS}"
    ))
    .bind(id)
    .bind(title)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(from_row(row))
}

/// Delete a project. Associated tasks go with it (FK cascade).
pub async fn delete_project(pool: &PgPool, id: &str) -> Result<(), sqlx::Error> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(());
    };
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
