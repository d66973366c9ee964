//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entities::{FileRecord, Project, Prompt};

// ============================================================================
// Projects
// ============================================================================

/// Create project request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateRequest {
    pub name: String,
}

/// Project response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i64,
    pub name: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.project_id.as_i64(),
            name: project.name,
        }
    }
}

// ============================================================================
// Prompts
// ============================================================================

/// Create prompt request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptCreateRequest {
    pub name: String,
    pub content: String,
}

/// Update prompt request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptUpdateRequest {
    pub name: String,
    pub content: String,
}

/// Prompt response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub content: String,
}

impl From<Prompt> for PromptResponse {
    fn from(prompt: Prompt) -> Self {
        Self {
            id: prompt.prompt_id.as_i64(),
            project_id: prompt.project_id.as_i64(),
            name: prompt.name,
            content: prompt.content,
        }
    }
}

// ============================================================================
// Files
// ============================================================================

/// File record response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: i64,
    pub project_id: i64,
    pub filename: String,
    pub external_file_id: String,
    pub file_size: i64,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.file_id.as_i64(),
            project_id: record.project_id.as_i64(),
            filename: record.filename,
            external_file_id: record.external_file_id,
            file_size: record.file_size,
        }
    }
}
