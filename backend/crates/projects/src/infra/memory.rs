//! In-Memory Repository Implementations
//!
//! Single-process stores used by tests and local development. All maps
//! sit behind one mutex so multi-row mutations (project cascade delete)
//! are atomic, matching the transactional postgres implementation. The
//! same owner filters apply: a non-owned id behaves like a missing one.

use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use kernel::id::{FileRecordId, ProjectId, PromptId, UserId};

use crate::domain::entities::{FileRecord, Project, Prompt};
use crate::domain::repository::{
    FileRepository, FileStore, FileStoreError, ProjectRepository, PromptRepository,
};
use crate::error::ProjectResult;

#[derive(Default)]
struct Inner {
    next_project_id: i64,
    next_prompt_id: i64,
    next_file_id: i64,
    projects: BTreeMap<i64, Project>,
    prompts: BTreeMap<i64, Prompt>,
    files: BTreeMap<i64, FileRecord>,
}

impl Inner {
    fn owns(&self, project_id: ProjectId, owner_id: UserId) -> bool {
        self.projects
            .get(&project_id.as_i64())
            .is_some_and(|p| p.owner_id == owner_id)
    }
}

/// In-memory workspace repository
#[derive(Default)]
pub struct MemoryProjectsRepository {
    inner: Mutex<Inner>,
}

impl MemoryProjectsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectRepository for MemoryProjectsRepository {
    async fn insert(&self, owner_id: UserId, name: &str) -> ProjectResult<Project> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        inner.next_project_id += 1;
        let project = Project {
            project_id: ProjectId::from_i64(inner.next_project_id),
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };

        inner
            .projects
            .insert(project.project_id.as_i64(), project.clone());
        Ok(project)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> ProjectResult<Vec<Project>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .projects
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        project_id: ProjectId,
        owner_id: UserId,
    ) -> ProjectResult<Option<Project>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .projects
            .get(&project_id.as_i64())
            .filter(|p| p.owner_id == owner_id)
            .cloned())
    }

    async fn delete_owned(&self, project_id: ProjectId, owner_id: UserId) -> ProjectResult<bool> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if !inner.owns(project_id, owner_id) {
            return Ok(false);
        }

        inner
            .prompts
            .retain(|_, p| p.project_id != project_id);
        inner.files.retain(|_, f| f.project_id != project_id);
        inner.projects.remove(&project_id.as_i64());

        Ok(true)
    }
}

impl PromptRepository for MemoryProjectsRepository {
    async fn insert(
        &self,
        project_id: ProjectId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Prompt> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        inner.next_prompt_id += 1;
        let prompt = Prompt {
            prompt_id: PromptId::from_i64(inner.next_prompt_id),
            project_id,
            name: name.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        inner
            .prompts
            .insert(prompt.prompt_id.as_i64(), prompt.clone());
        Ok(prompt)
    }

    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<Prompt>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // BTreeMap iteration order is id order, i.e. creation order
        Ok(inner
            .prompts
            .values()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_owned(
        &self,
        prompt_id: PromptId,
        owner_id: UserId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Option<Prompt>> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        let Some(project_id) = inner
            .prompts
            .get(&prompt_id.as_i64())
            .map(|p| p.project_id)
        else {
            return Ok(None);
        };

        if !inner.owns(project_id, owner_id) {
            return Ok(None);
        }

        let prompt = inner
            .prompts
            .get_mut(&prompt_id.as_i64())
            .expect("prompt existed under the same lock");
        prompt.name = name.to_string();
        prompt.content = content.to_string();

        Ok(Some(prompt.clone()))
    }

    async fn delete_owned(&self, prompt_id: PromptId, owner_id: UserId) -> ProjectResult<bool> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        let Some(project_id) = inner
            .prompts
            .get(&prompt_id.as_i64())
            .map(|p| p.project_id)
        else {
            return Ok(false);
        };

        if !inner.owns(project_id, owner_id) {
            return Ok(false);
        }

        inner.prompts.remove(&prompt_id.as_i64());
        Ok(true)
    }
}

impl FileRepository for MemoryProjectsRepository {
    async fn insert(
        &self,
        project_id: ProjectId,
        filename: &str,
        external_file_id: &str,
        file_size: i64,
    ) -> ProjectResult<FileRecord> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        inner.next_file_id += 1;
        let record = FileRecord {
            file_id: FileRecordId::from_i64(inner.next_file_id),
            project_id,
            filename: filename.to_string(),
            external_file_id: external_file_id.to_string(),
            file_size,
            created_at: Utc::now(),
        };

        inner.files.insert(record.file_id.as_i64(), record.clone());
        Ok(record)
    }

    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<FileRecord>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner
            .files
            .values()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn find_owned(
        &self,
        file_id: FileRecordId,
        owner_id: UserId,
    ) -> ProjectResult<Option<FileRecord>> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        Ok(inner
            .files
            .get(&file_id.as_i64())
            .filter(|f| inner.owns(f.project_id, owner_id))
            .cloned())
    }

    async fn delete_owned(&self, file_id: FileRecordId, owner_id: UserId) -> ProjectResult<bool> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        let Some(project_id) = inner.files.get(&file_id.as_i64()).map(|f| f.project_id) else {
            return Ok(false);
        };

        if !inner.owns(project_id, owner_id) {
            return Ok(false);
        }

        inner.files.remove(&file_id.as_i64());
        Ok(true)
    }
}

// ============================================================================
// In-memory file store
// ============================================================================

#[derive(Default)]
struct StoreInner {
    next_id: u64,
    blobs: BTreeMap<String, Vec<u8>>,
}

/// In-memory blob store standing in for the provider's file API
#[derive(Default)]
pub struct MemoryFileStore {
    inner: Mutex<StoreInner>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blobs currently held
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .blobs
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileStore for MemoryFileStore {
    async fn store(&self, _filename: &str, bytes: Vec<u8>) -> Result<String, FileStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.next_id += 1;
        let external_file_id = format!("mem-file-{}", inner.next_id);
        inner.blobs.insert(external_file_id.clone(), bytes);
        Ok(external_file_id)
    }

    async fn delete(&self, external_file_id: &str) -> Result<(), FileStoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner
            .blobs
            .remove(external_file_id)
            .map(|_| ())
            .ok_or_else(|| FileStoreError(format!("no such file: {}", external_file_id)))
    }
}
