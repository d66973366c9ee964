//! File Use Cases
//!
//! Uploads push the bytes to the external store and keep only a metadata
//! row locally. Deletes remove the external blob first, logging (not
//! swallowing) a provider failure, then drop the row.

use std::sync::Arc;

use auth::Principal;
use kernel::id::{FileRecordId, ProjectId};

use crate::application::config::ProjectsConfig;
use crate::domain::entities::FileRecord;
use crate::domain::repository::{FileRepository, FileStore, ProjectRepository};
use crate::error::{ProjectError, ProjectResult};

/// File use cases
pub struct FileUseCase<P, F, S>
where
    P: ProjectRepository,
    F: FileRepository,
    S: FileStore,
{
    project_repo: Arc<P>,
    file_repo: Arc<F>,
    file_store: Arc<S>,
    config: Arc<ProjectsConfig>,
}

impl<P, F, S> FileUseCase<P, F, S>
where
    P: ProjectRepository,
    F: FileRepository,
    S: FileStore,
{
    pub fn new(
        project_repo: Arc<P>,
        file_repo: Arc<F>,
        file_store: Arc<S>,
        config: Arc<ProjectsConfig>,
    ) -> Self {
        Self {
            project_repo,
            file_repo,
            file_store,
            config,
        }
    }

    async fn require_owned_project(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectResult<()> {
        self.project_repo
            .find_owned(project_id, principal.user_id)
            .await?
            .map(|_| ())
            .ok_or(ProjectError::ProjectNotFound)
    }

    /// Upload a file into an owned project
    pub async fn upload(
        &self,
        principal: &Principal,
        project_id: ProjectId,
        filename: String,
        bytes: Vec<u8>,
    ) -> ProjectResult<FileRecord> {
        self.require_owned_project(principal, project_id).await?;

        if bytes.len() > self.config.max_file_size_bytes {
            return Err(ProjectError::FileTooLarge {
                max_bytes: self.config.max_file_size_bytes,
            });
        }

        let file_size = bytes.len() as i64;
        let external_file_id = self.file_store.store(&filename, bytes).await?;

        let record = self
            .file_repo
            .insert(project_id, &filename, &external_file_id, file_size)
            .await?;

        tracing::info!(
            file_id = %record.file_id,
            project_id = %project_id,
            filename = %record.filename,
            file_size,
            "File uploaded"
        );

        Ok(record)
    }

    /// List the file records of an owned project
    pub async fn list(
        &self,
        principal: &Principal,
        project_id: ProjectId,
    ) -> ProjectResult<Vec<FileRecord>> {
        self.require_owned_project(principal, project_id).await?;
        self.file_repo.list_for_project(project_id).await
    }

    /// Delete a file by id; non-owned files look missing
    pub async fn delete(&self, principal: &Principal, file_id: FileRecordId) -> ProjectResult<()> {
        let record = self
            .file_repo
            .find_owned(file_id, principal.user_id)
            .await?
            .ok_or(ProjectError::FileNotFound)?;

        // The metadata row is removed regardless; a failed provider
        // delete is surfaced in the logs, never silently dropped
        if let Err(e) = self.file_store.delete(&record.external_file_id).await {
            tracing::warn!(
                file_id = %file_id,
                external_file_id = %record.external_file_id,
                error = %e,
                "External file delete failed"
            );
        }

        let deleted = self
            .file_repo
            .delete_owned(file_id, principal.user_id)
            .await?;

        if !deleted {
            return Err(ProjectError::FileNotFound);
        }

        tracing::info!(file_id = %file_id, "File deleted");

        Ok(())
    }
}
