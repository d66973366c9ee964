//! HTTP Handlers
//!
//! Every handler takes the resolved [`Principal`] from request
//! extensions; the auth middleware put it there before the handler ran.

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use auth::Principal;
use kernel::id::{FileRecordId, ProjectId, PromptId};

use crate::application::config::ProjectsConfig;
use crate::application::{FileUseCase, ProjectUseCase, PromptUseCase};
use crate::domain::repository::{FileRepository, FileStore, ProjectRepository, PromptRepository};
use crate::error::{ProjectError, ProjectResult};
use crate::presentation::dto::{
    FileResponse, ProjectCreateRequest, ProjectResponse, PromptCreateRequest, PromptResponse,
    PromptUpdateRequest,
};

/// Shared state for workspace handlers
pub struct ProjectsAppState<R, S>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub file_store: Arc<S>,
    pub config: Arc<ProjectsConfig>,
}

impl<R, S> Clone for ProjectsAppState<R, S>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            file_store: self.file_store.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

/// POST /api/projects
pub async fn create_project<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<ProjectCreateRequest>,
) -> ProjectResult<Json<ProjectResponse>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = ProjectUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
    );

    let project = use_case.create(&principal, req.name).await?;

    Ok(Json(project.into()))
}

/// GET /api/projects
pub async fn list_projects<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
) -> ProjectResult<Json<Vec<ProjectResponse>>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = ProjectUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
    );

    let projects = use_case.list(&principal).await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

/// DELETE /api/projects/{project_id}
pub async fn delete_project<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(project_id): Path<i64>,
) -> ProjectResult<StatusCode>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = ProjectUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
    );

    use_case
        .delete(&principal, ProjectId::from_i64(project_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Prompts
// ============================================================================

/// POST /api/projects/{project_id}/prompts
pub async fn create_prompt<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(project_id): Path<i64>,
    Json(req): Json<PromptCreateRequest>,
) -> ProjectResult<Json<PromptResponse>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = PromptUseCase::new(state.repo.clone(), state.repo.clone());

    let prompt = use_case
        .create(
            &principal,
            ProjectId::from_i64(project_id),
            req.name,
            req.content,
        )
        .await?;

    Ok(Json(prompt.into()))
}

/// GET /api/projects/{project_id}/prompts
pub async fn list_prompts<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(project_id): Path<i64>,
) -> ProjectResult<Json<Vec<PromptResponse>>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = PromptUseCase::new(state.repo.clone(), state.repo.clone());

    let prompts = use_case
        .list(&principal, ProjectId::from_i64(project_id))
        .await?;

    Ok(Json(prompts.into_iter().map(Into::into).collect()))
}

/// PUT /api/projects/prompts/{prompt_id}
pub async fn update_prompt<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(prompt_id): Path<i64>,
    Json(req): Json<PromptUpdateRequest>,
) -> ProjectResult<Json<PromptResponse>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = PromptUseCase::new(state.repo.clone(), state.repo.clone());

    let prompt = use_case
        .update(
            &principal,
            PromptId::from_i64(prompt_id),
            req.name,
            req.content,
        )
        .await?;

    Ok(Json(prompt.into()))
}

/// DELETE /api/projects/prompts/{prompt_id}
pub async fn delete_prompt<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(prompt_id): Path<i64>,
) -> ProjectResult<StatusCode>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = PromptUseCase::new(state.repo.clone(), state.repo.clone());

    use_case
        .delete(&principal, PromptId::from_i64(prompt_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Files
// ============================================================================

/// POST /api/projects/{project_id}/files
pub async fn upload_file<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(project_id): Path<i64>,
    mut multipart: Multipart,
) -> ProjectResult<Json<FileResponse>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ProjectError::Internal(format!("Multipart read failed: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "upload".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ProjectError::Internal(format!("Multipart read failed: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or(ProjectError::MissingFile)?;

    let use_case = FileUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
        state.config.clone(),
    );

    let record = use_case
        .upload(&principal, ProjectId::from_i64(project_id), filename, bytes)
        .await?;

    Ok(Json(record.into()))
}

/// GET /api/projects/{project_id}/files
pub async fn list_files<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(project_id): Path<i64>,
) -> ProjectResult<Json<Vec<FileResponse>>>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = FileUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
        state.config.clone(),
    );

    let records = use_case
        .list(&principal, ProjectId::from_i64(project_id))
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// DELETE /api/projects/files/{file_id}
pub async fn delete_file<R, S>(
    State(state): State<ProjectsAppState<R, S>>,
    Extension(principal): Extension<Principal>,
    Path(file_id): Path<i64>,
) -> ProjectResult<StatusCode>
where
    R: ProjectRepository + PromptRepository + FileRepository + Send + Sync + 'static,
    S: FileStore + Send + Sync + 'static,
{
    let use_case = FileUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.file_store.clone(),
        state.config.clone(),
    );

    use_case
        .delete(&principal, FileRecordId::from_i64(file_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
