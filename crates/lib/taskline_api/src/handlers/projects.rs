//! Project request handlers.
//!
//! Every handler re-resolves the caller's identity and, for id-scoped
//! routes, runs the ownership check before touching resource data.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use taskline_core::auth::ownership::authorize_owner;
use taskline_core::store::{projects, tasks};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::resolve_identity;
use crate::middleware::gate::CurrentUser;
use crate::models::{
    CreateProjectRequest, MessageResponse, ProjectDetailEnvelope, ProjectDetailResponse,
    ProjectEnvelope, ProjectListResponse, ProjectResponse, TaskResponse, UpdateProjectRequest,
};

/// `GET /api/projects` — list the caller's projects, most recent first.
pub async fn list_projects_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
) -> AppResult<Json<ProjectListResponse>> {
    let user = resolve_identity(&state, &current).await?;
    let projects = projects::list_projects_by_owner(&state.pool, &user.id).await?;
    Ok(Json(ProjectListResponse {
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

/// `POST /api/projects` — create a project owned by the caller.
pub async fn create_project_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Json(body): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectEnvelope>)> {
    let user = resolve_identity(&state, &current).await?;
    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    let project = projects::create_project(
        &state.pool,
        &user.id,
        body.title.trim(),
        body.description.as_deref(),
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectEnvelope {
            project: ProjectResponse::from(project),
        }),
    ))
}

/// `GET /api/projects/{id}` — fetch one project with its tasks in board order.
pub async fn get_project_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetailEnvelope>> {
    let user = resolve_identity(&state, &current).await?;
    let project = projects::find_project(&state.pool, &id).await?;
    let project = authorize_owner(&user, project).map_err(|e| AppError::from_access(e, "Project"))?;

    let tasks = tasks::list_tasks_by_project(&state.pool, &project.id).await?;
    Ok(Json(ProjectDetailEnvelope {
        project: ProjectDetailResponse {
            id: project.id,
            title: project.title,
            description: project.description,
            created_at: project.created_at.to_rfc3339(),
            updated_at: project.updated_at.to_rfc3339(),
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        },
    }))
}

/// `PUT /api/projects/{id}` — update title/description.
pub async fn update_project_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectEnvelope>> {
    let user = resolve_identity(&state, &current).await?;
    let existing = projects::find_project(&state.pool, &id).await?;
    let existing =
        authorize_owner(&user, existing).map_err(|e| AppError::from_access(e, "Project"))?;

    if body.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    let project = projects::update_project(
        &state.pool,
        &existing.id,
        body.title.trim(),
        body.description.as_deref(),
    )
    .await?;
    Ok(Json(ProjectEnvelope {
        project: ProjectResponse::from(project),
    }))
}

/// `DELETE /api/projects/{id}` — delete a project and its tasks.
pub async fn delete_project_handler(
    State(state): State<AppState>,
    axum::Extension(current): axum::Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let user = resolve_identity(&state, &current).await?;
    let existing = projects::find_project(&state.pool, &id).await?;
    let existing =
        authorize_owner(&user, existing).map_err(|e| AppError::from_access(e, "Project"))?;

    projects::delete_project(&state.pool, &existing.id).await?;
    Ok(Json(MessageResponse {
        message: "Project deleted successfully".into(),
    }))
}
