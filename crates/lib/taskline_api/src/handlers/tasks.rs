//! Task request handlers.
//!
//! Task ownership flows through the parent project: list/create check the
//! project the task belongs to, id-scoped routes check the owner joined
//! onto the task row.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use taskline_core::auth::ownership::authorize_owner;
use taskline_core::store::{projects, tasks};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::resolve_identity;
use crate::middleware::gate::CurrentUser;
use crate::models::{
    CreateTaskRequest, MessageResponse, TaskEnvelope, TaskListQuery, TaskListResponse,
    TaskResponse, UpdateTaskRequest,
};

/// `GET /api/tasks?projectId=…` — list a project's tasks in board order.
pub async fn list_tasks_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<TaskListResponse>> {
    let user = resolve_identity(&state, &current).await?;
    let Some(project_id) = query.project_id else {
        return Err(AppError::Validation("Project ID is required".into()));
    };

    let project = projects::find_project(&state.pool, &project_id).await?;
    let project = authorize_owner(&user, project).map_err(|e| AppError::from_access(e, "Project"))?;

    let tasks = tasks::list_tasks_by_project(&state.pool, &project.id).await?;
    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

/// `POST /api/tasks` — create a task at the end of the project's board.
pub async fn create_task_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Json(body): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskEnvelope>)> {
    let user = resolve_identity(&state, &current).await?;
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if body.project_id.trim().is_empty() {
        return Err(AppError::Validation("Project ID is required".into()));
    }

    let project = projects::find_project(&state.pool, &body.project_id).await?;
    let project = authorize_owner(&user, project).map_err(|e| AppError::from_access(e, "Project"))?;

    let task = tasks::create_task(
        &state.pool,
        &project.id,
        body.title.trim(),
        body.description.as_deref(),
        body.status.unwrap_or_default(),
        body.due_date,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskEnvelope {
            task: TaskResponse::from(task),
        }),
    ))
}

/// `GET /api/tasks/{id}` — fetch one task.
pub async fn get_task_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<TaskEnvelope>> {
    let user = resolve_identity(&state, &current).await?;
    let found = tasks::find_task(&state.pool, &id).await?;
    let found = authorize_owner(&user, found).map_err(|e| AppError::from_access(e, "Task"))?;
    Ok(Json(TaskEnvelope {
        task: TaskResponse::from(found.task),
    }))
}

/// `PUT /api/tasks/{id}` — update a task, including its board position.
pub async fn update_task_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskEnvelope>> {
    let user = resolve_identity(&state, &current).await?;
    let existing = tasks::find_task(&state.pool, &id).await?;
    let existing = authorize_owner(&user, existing).map_err(|e| AppError::from_access(e, "Task"))?;

    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    let task = tasks::update_task(
        &state.pool,
        &existing.task.id,
        body.title.trim(),
        body.description.as_deref(),
        body.status,
        body.due_date,
        body.order,
    )
    .await?;
    Ok(Json(TaskEnvelope {
        task: TaskResponse::from(task),
    }))
}

/// `DELETE /api/tasks/{id}` — delete a task.
pub async fn delete_task_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let user = resolve_identity(&state, &current).await?;
    let existing = tasks::find_task(&state.pool, &id).await?;
    let existing = authorize_owner(&user, existing).map_err(|e| AppError::from_access(e, "Task"))?;

    tasks::delete_task(&state.pool, &existing.task.id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".into(),
    }))
}
