//! Domain Entities
//!
//! Core entities of the workspace: a project owned by exactly one user,
//! with prompts and uploaded-file records reachable only through it.

use chrono::{DateTime, Utc};
use kernel::id::{FileRecordId, ProjectId, PromptId, UserId};

/// Project entity - the unit of ownership
///
/// The owner reference is set at creation and never changes.
#[derive(Debug, Clone)]
pub struct Project {
    pub project_id: ProjectId,
    pub owner_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Prompt entity - a named template belonging to one project
///
/// Prompts carry no owner of their own; ownership is derived from the
/// parent project.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub prompt_id: PromptId,
    pub project_id: ProjectId,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// FileRecord entity - metadata for a file held in the external store
///
/// The bytes themselves are not kept here; `external_file_id` points into
/// the provider's file store.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub file_id: FileRecordId,
    pub project_id: ProjectId,
    pub filename: String,
    pub external_file_id: String,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
}
