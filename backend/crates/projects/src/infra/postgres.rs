//! PostgreSQL Repository Implementations
//!
//! Every owner-scoped statement carries the owner predicate in the query
//! itself; prompt and file lookups by primary key join through the
//! `projects` table.

use chrono::{DateTime, Utc};
use kernel::id::{FileRecordId, ProjectId, PromptId, UserId};
use sqlx::PgPool;

use crate::domain::entities::{FileRecord, Project, Prompt};
use crate::domain::repository::{FileRepository, ProjectRepository, PromptRepository};
use crate::error::ProjectResult;

/// PostgreSQL-backed workspace repository
#[derive(Clone)]
pub struct PgProjectsRepository {
    pool: PgPool,
}

impl PgProjectsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Project Repository Implementation
// ============================================================================

impl ProjectRepository for PgProjectsRepository {
    async fn insert(&self, owner_id: UserId, name: &str) -> ProjectResult<Project> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (owner_id, name, created_at)
            VALUES ($1, $2, $3)
            RETURNING project_id, owner_id, name, created_at
            "#,
        )
        .bind(owner_id.as_i64())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_project())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> ProjectResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT project_id, owner_id, name, created_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY project_id
            "#,
        )
        .bind(owner_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    async fn find_owned(
        &self,
        project_id: ProjectId,
        owner_id: UserId,
    ) -> ProjectResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT project_id, owner_id, name, created_at
            FROM projects
            WHERE project_id = $1 AND owner_id = $2
            "#,
        )
        .bind(project_id.as_i64())
        .bind(owner_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProjectRow::into_project))
    }

    async fn delete_owned(&self, project_id: ProjectId, owner_id: UserId) -> ProjectResult<bool> {
        let mut tx = self.pool.begin().await?;

        // Lock the project row under its owner filter; bail without
        // touching anything when it is missing or not owned
        let owned = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT project_id FROM projects
            WHERE project_id = $1 AND owner_id = $2
            FOR UPDATE
            "#,
        )
        .bind(project_id.as_i64())
        .bind(owner_id.as_i64())
        .fetch_optional(&mut *tx)
        .await?;

        if owned.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM project_files WHERE project_id = $1")
            .bind(project_id.as_i64())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM prompts WHERE project_id = $1")
            .bind(project_id.as_i64())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(project_id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}

// ============================================================================
// Prompt Repository Implementation
// ============================================================================

impl PromptRepository for PgProjectsRepository {
    async fn insert(
        &self,
        project_id: ProjectId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Prompt> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            INSERT INTO prompts (project_id, name, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING prompt_id, project_id, name, content, created_at
            "#,
        )
        .bind(project_id.as_i64())
        .bind(name)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_prompt())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<Prompt>> {
        let rows = sqlx::query_as::<_, PromptRow>(
            r#"
            SELECT prompt_id, project_id, name, content, created_at
            FROM prompts
            WHERE project_id = $1
            ORDER BY prompt_id
            "#,
        )
        .bind(project_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PromptRow::into_prompt).collect())
    }

    async fn update_owned(
        &self,
        prompt_id: PromptId,
        owner_id: UserId,
        name: &str,
        content: &str,
    ) -> ProjectResult<Option<Prompt>> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            UPDATE prompts
            SET name = $3, content = $4
            FROM projects
            WHERE prompts.prompt_id = $1
              AND projects.project_id = prompts.project_id
              AND projects.owner_id = $2
            RETURNING prompts.prompt_id, prompts.project_id, prompts.name,
                      prompts.content, prompts.created_at
            "#,
        )
        .bind(prompt_id.as_i64())
        .bind(owner_id.as_i64())
        .bind(name)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PromptRow::into_prompt))
    }

    async fn delete_owned(&self, prompt_id: PromptId, owner_id: UserId) -> ProjectResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM prompts
            USING projects
            WHERE prompts.prompt_id = $1
              AND projects.project_id = prompts.project_id
              AND projects.owner_id = $2
            "#,
        )
        .bind(prompt_id.as_i64())
        .bind(owner_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// File Repository Implementation
// ============================================================================

impl FileRepository for PgProjectsRepository {
    async fn insert(
        &self,
        project_id: ProjectId,
        filename: &str,
        external_file_id: &str,
        file_size: i64,
    ) -> ProjectResult<FileRecord> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            INSERT INTO project_files (project_id, filename, external_file_id, file_size, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING file_id, project_id, filename, external_file_id, file_size, created_at
            "#,
        )
        .bind(project_id.as_i64())
        .bind(filename)
        .bind(external_file_id)
        .bind(file_size)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_file_record())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> ProjectResult<Vec<FileRecord>> {
        let rows = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT file_id, project_id, filename, external_file_id, file_size, created_at
            FROM project_files
            WHERE project_id = $1
            ORDER BY file_id
            "#,
        )
        .bind(project_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FileRow::into_file_record).collect())
    }

    async fn find_owned(
        &self,
        file_id: FileRecordId,
        owner_id: UserId,
    ) -> ProjectResult<Option<FileRecord>> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT f.file_id, f.project_id, f.filename, f.external_file_id,
                   f.file_size, f.created_at
            FROM project_files f
            JOIN projects p ON p.project_id = f.project_id
            WHERE f.file_id = $1 AND p.owner_id = $2
            "#,
        )
        .bind(file_id.as_i64())
        .bind(owner_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FileRow::into_file_record))
    }

    async fn delete_owned(&self, file_id: FileRecordId, owner_id: UserId) -> ProjectResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM project_files
            USING projects
            WHERE project_files.file_id = $1
              AND projects.project_id = project_files.project_id
              AND projects.owner_id = $2
            "#,
        )
        .bind(file_id.as_i64())
        .bind(owner_id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProjectRow {
    project_id: i64,
    owner_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            project_id: ProjectId::from_i64(self.project_id),
            owner_id: UserId::from_i64(self.owner_id),
            name: self.name,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    prompt_id: i64,
    project_id: i64,
    name: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl PromptRow {
    fn into_prompt(self) -> Prompt {
        Prompt {
            prompt_id: PromptId::from_i64(self.prompt_id),
            project_id: ProjectId::from_i64(self.project_id),
            name: self.name,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FileRow {
    file_id: i64,
    project_id: i64,
    filename: String,
    external_file_id: String,
    file_size: i64,
    created_at: DateTime<Utc>,
}

impl FileRow {
    fn into_file_record(self) -> FileRecord {
        FileRecord {
            file_id: FileRecordId::from_i64(self.file_id),
            project_id: ProjectId::from_i64(self.project_id),
            filename: self.filename,
            external_file_id: self.external_file_id,
            file_size: self.file_size,
            created_at: self.created_at,
        }
    }
}
