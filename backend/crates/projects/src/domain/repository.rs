//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer.
//!
//! Every `*_owned` method applies the ownership filter in the same lookup
//! that fetches or mutates the row: a non-owned id behaves exactly like a
//! missing one. Prompt and file lookups by primary key join through the
//! parent project, since neither carries an owner of its own.

use kernel::id::{FileRecordId, ProjectId, PromptId, UserId};
use thiserror::Error;

use crate::domain::entities::{FileRecord, Project, Prompt};
use crate::error::ProjectResult;

/// Project repository trait
#[trait_variant::make(ProjectRepository: Send)]
pub trait LocalProjectRepository {
    /// Create a new project owned by `owner_id`
    async fn insert(&self, owner_id: UserId, name: &str) -> ProjectResult<Project>;

    /// List all projects owned by `owner_id`, oldest first
    async fn list_by_owner(&self, owner_id: UserId) -> ProjectResult<Vec<Project>>;

    /// Find a project by id, visible only to its owner
    async fn find_owned(
        &self,
        project_id: ProjectId,
        owner_id: UserId,
    ) -> ProjectResult<Option<Project>>;

    /// Delete an owned project and its dependent rows in one transaction
    ///
    /// Returns `false` when the project is missing or not owned; nothing
    /// is deleted in that case.
    async fn delete_owned(&self, project_id: ProjectId, owner_id: UserId) -> ProjectResult<bool>;
}

/// Prompt repository trait
///
/// `insert` and `list_for_project` are only reachable after the caller
/// has resolved the parent project through its owner filter.
#[trait_variant::make(PromptRepository: Send)]
pub trait LocalPromptRepository {
    /// Create a new prompt under a project
    async fn insert(
        &self,
        project_id: ProjectId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Prompt>;

    /// List prompts of a project in creation order
    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<Prompt>>;

    /// Update a prompt by id, joined through the owning project
    async fn update_owned(
        &self,
        prompt_id: PromptId,
        owner_id: UserId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Option<Prompt>>;

    /// Delete a prompt by id, joined through the owning project
    async fn delete_owned(&self, prompt_id: PromptId, owner_id: UserId) -> ProjectResult<bool>;
}

/// File metadata repository trait
#[trait_variant::make(FileRepository: Send)]
pub trait LocalFileRepository {
    /// Record an uploaded file under a project
    async fn insert(
        &self,
        project_id: ProjectId,
        filename: &str,
        external_file_id: &str,
        file_size: i64,
    ) -> ProjectResult<FileRecord>;

    /// List file records of a project in creation order
    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<FileRecord>>;

    /// Find a file record by id, joined through the owning project
    async fn find_owned(
        &self,
        file_id: FileRecordId,
        owner_id: UserId,
    ) -> ProjectResult<Option<FileRecord>>;

    /// Delete a file record by id, joined through the owning project
    async fn delete_owned(&self, file_id: FileRecordId, owner_id: UserId) -> ProjectResult<bool>;
}

// ============================================================================
// External file store
// ============================================================================

/// Error from the external file store
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct FileStoreError(pub String);

/// External blob store holding the actual uploaded bytes
///
/// Deletion returns an explicit result; callers that choose to continue
/// past a failed delete must do so visibly (log it), never by swallowing
/// the error.
#[trait_variant::make(FileStore: Send)]
pub trait LocalFileStore {
    /// Upload bytes, returning the provider-assigned file id
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> Result<String, FileStoreError>;

    /// Delete a previously stored file
    async fn delete(&self, external_file_id: &str) -> Result<(), FileStoreError>;
}
