//! # taskline_api
//!
//! HTTP API library for Taskline.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{auth, projects, tasks};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration. Holds the one signing secret shared by the edge
    /// gate and the login flow.
    pub config: ApiConfig,
}

/// Run embedded database migrations.
///
/// Delegates to `taskline_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    taskline_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes, the edge gate, and shared state.
///
/// The gate is layered over the entire router (fallback included) so it runs
/// ahead of routing for every request; the public-path allowlist is the
/// gate's own short-circuit, not a routing concern.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/session", get(auth::session_handler))
        .route(
            "/api/projects",
            get(projects::list_projects_handler).post(projects::create_project_handler),
        )
        .route(
            "/api/projects/{id}",
            get(projects::get_project_handler)
                .put(projects::update_project_handler)
                .delete(projects::delete_project_handler),
        )
        .route(
            "/api/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            get(tasks::get_task_handler)
                .put(tasks::update_task_handler)
                .delete(tasks::delete_task_handler),
        )
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::gate::request_gate,
        ))
        .layer(cors)
        .with_state(state)
}
