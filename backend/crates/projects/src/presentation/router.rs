//! Projects Router

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, post, put},
};
use std::sync::Arc;

use crate::application::config::ProjectsConfig;
use crate::domain::repository::{FileRepository, FileStore, ProjectRepository, PromptRepository};
use crate::presentation::handlers::{self, ProjectsAppState};

/// Create the workspace router for any repository/file-store pair
///
/// Authentication is layered on by the caller; every handler here
/// expects a resolved `Principal` in the request extensions.
pub fn projects_router<R, S>(
    repo: Arc<R>,
    file_store: Arc<S>,
    config: Arc<ProjectsConfig>,
) -> Router
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    // Leave headroom above the payload cap for multipart framing
    let body_limit = config.max_file_size_bytes + 64 * 1024;

    let state = ProjectsAppState {
        repo,
        file_store,
        config,
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_project::<R, S>).get(handlers::list_projects::<R, S>),
        )
        .route("/{project_id}", delete(handlers::delete_project::<R, S>))
        .route(
            "/{project_id}/prompts",
            post(handlers::create_prompt::<R, S>).get(handlers::list_prompts::<R, S>),
        )
        .route(
            "/prompts/{prompt_id}",
            put(handlers::update_prompt::<R, S>).delete(handlers::delete_prompt::<R, S>),
        )
        .route(
            "/{project_id}/files",
            post(handlers::upload_file::<R, S>).get(handlers::list_files::<R, S>),
        )
        .route("/files/{file_id}", delete(handlers::delete_file::<R, S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
