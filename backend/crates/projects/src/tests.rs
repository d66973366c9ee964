//! Unit tests for the projects crate
//!
//! Ownership isolation is exercised end-to-end against the in-memory
//! stores: two principals, each touching the other's resources, must see
//! NotFound everywhere.

#[cfg(test)]
mod ownership_tests {
    use std::sync::Arc;

    use auth::Principal;
    use kernel::id::{FileRecordId, ProjectId, PromptId, UserId};

    use crate::application::config::ProjectsConfig;
    use crate::application::{FileUseCase, ProjectUseCase, PromptUseCase};
    use crate::error::ProjectError;
    use crate::infra::memory::{MemoryFileStore, MemoryProjectsRepository};

    fn principal(id: i64, email: &str) -> Principal {
        Principal {
            user_id: UserId::from_i64(id),
            email: auth::Email::from_db(email),
        }
    }

    fn setup() -> (
        Arc<MemoryProjectsRepository>,
        Arc<MemoryFileStore>,
        Arc<ProjectsConfig>,
    ) {
        (
            Arc::new(MemoryProjectsRepository::new()),
            Arc::new(MemoryFileStore::new()),
            Arc::new(ProjectsConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_first_project_gets_id_one() {
        let (repo, store, _) = setup();
        let alice = principal(1, "alice@example.com");

        let use_case = ProjectUseCase::new(repo.clone(), repo.clone(), store);
        let project = use_case.create(&alice, "Demo".to_string()).await.unwrap();

        assert_eq!(project.project_id.as_i64(), 1);
        assert_eq!(project.owner_id, alice.user_id);
        assert_eq!(project.name, "Demo");
    }

    #[tokio::test]
    async fn test_projects_are_isolated_between_owners() {
        let (repo, store, _) = setup();
        let alice = principal(1, "alice@example.com");
        let bob = principal(2, "bob@example.com");

        let use_case = ProjectUseCase::new(repo.clone(), repo.clone(), store);
        let project = use_case.create(&alice, "Demo".to_string()).await.unwrap();

        // Bob's listing does not contain Alice's project
        assert!(use_case.list(&bob).await.unwrap().is_empty());

        // Bob deleting Alice's project looks like a missing project
        let err = use_case
            .delete(&bob, project.project_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));

        // Alice still sees it
        assert_eq!(use_case.list(&alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_ownership_is_transitive() {
        let (repo, store, _) = setup();
        let alice = principal(1, "alice@example.com");
        let bob = principal(2, "bob@example.com");

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store);
        let prompts = PromptUseCase::new(repo.clone(), repo.clone());

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();
        let prompt = prompts
            .create(
                &alice,
                project.project_id,
                "tone".to_string(),
                "Be concise.".to_string(),
            )
            .await
            .unwrap();

        // Bob cannot create under, list, update through, or delete through
        // Alice's project even with valid ids
        let err = prompts
            .create(&bob, project.project_id, "x".to_string(), "y".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));

        let err = prompts.list(&bob, project.project_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));

        let err = prompts
            .update(&bob, prompt.prompt_id, "x".to_string(), "y".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::PromptNotFound));

        let err = prompts.delete(&bob, prompt.prompt_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::PromptNotFound));

        // Alice's access is untouched
        let listed = prompts.list(&alice, project.project_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "Be concise.");
    }

    #[tokio::test]
    async fn test_prompt_update_and_delete_by_owner() {
        let (repo, store, _) = setup();
        let alice = principal(1, "alice@example.com");

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store);
        let prompts = PromptUseCase::new(repo.clone(), repo.clone());

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();
        let prompt = prompts
            .create(
                &alice,
                project.project_id,
                "tone".to_string(),
                "Be concise.".to_string(),
            )
            .await
            .unwrap();

        let updated = prompts
            .update(
                &alice,
                prompt.prompt_id,
                "tone".to_string(),
                "Be thorough.".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(updated.content, "Be thorough.");

        prompts.delete(&alice, prompt.prompt_id).await.unwrap();
        assert!(prompts
            .list(&alice, project.project_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_file_ownership_is_transitive() {
        let (repo, store, config) = setup();
        let alice = principal(1, "alice@example.com");
        let bob = principal(2, "bob@example.com");

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store.clone());
        let files = FileUseCase::new(repo.clone(), repo.clone(), store.clone(), config);

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();
        let record = files
            .upload(
                &alice,
                project.project_id,
                "notes.txt".to_string(),
                b"hello".to_vec(),
            )
            .await
            .unwrap();

        assert_eq!(record.file_size, 5);
        assert_eq!(store.len(), 1);

        let err = files.list(&bob, project.project_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));

        let err = files.delete(&bob, record.file_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::FileNotFound));
        assert_eq!(store.len(), 1, "blob must survive a denied delete");

        files.delete(&alice, record.file_id).await.unwrap();
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_size_cap() {
        let (repo, store, _) = setup();
        let alice = principal(1, "alice@example.com");

        let config = Arc::new(ProjectsConfig {
            max_file_size_bytes: 4,
        });

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store.clone());
        let files = FileUseCase::new(repo.clone(), repo.clone(), store.clone(), config);

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();

        let err = files
            .upload(
                &alice,
                project.project_id,
                "big.bin".to_string(),
                vec![0u8; 5],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::FileTooLarge { max_bytes: 4 }));

        // Nothing reached the external store
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_project_delete_cascades() {
        let (repo, store, config) = setup();
        let alice = principal(1, "alice@example.com");

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store.clone());
        let prompts = PromptUseCase::new(repo.clone(), repo.clone());
        let files = FileUseCase::new(repo.clone(), repo.clone(), store.clone(), config);

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();
        let keep = projects.create(&alice, "Keep".to_string()).await.unwrap();

        prompts
            .create(
                &alice,
                project.project_id,
                "tone".to_string(),
                "Be concise.".to_string(),
            )
            .await
            .unwrap();
        let record = files
            .upload(
                &alice,
                project.project_id,
                "notes.txt".to_string(),
                b"hello".to_vec(),
            )
            .await
            .unwrap();

        projects.delete(&alice, project.project_id).await.unwrap();

        // Rows and blob are gone; the untouched project survives
        assert_eq!(projects.list(&alice).await.unwrap().len(), 1);
        assert_eq!(store.len(), 0);
        let err = files.delete(&alice, record.file_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::FileNotFound));
        let err = prompts.list(&alice, project.project_id).await.unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));

        assert_eq!(
            projects.list(&alice).await.unwrap()[0].project_id,
            keep.project_id
        );
    }

    #[tokio::test]
    async fn test_missing_ids_and_foreign_ids_look_the_same() {
        let (repo, store, config) = setup();
        let alice = principal(1, "alice@example.com");
        let bob = principal(2, "bob@example.com");

        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store.clone());
        let prompts = PromptUseCase::new(repo.clone(), repo.clone());
        let files = FileUseCase::new(repo.clone(), repo.clone(), store, config);

        let project = projects.create(&alice, "Demo".to_string()).await.unwrap();

        // A genuinely absent id and Alice's id produce identical errors
        // from Bob's point of view
        let absent = projects
            .delete(&bob, ProjectId::from_i64(999))
            .await
            .unwrap_err();
        let foreign = projects
            .delete(&bob, project.project_id)
            .await
            .unwrap_err();
        assert_eq!(
            std::mem::discriminant(&absent),
            std::mem::discriminant(&foreign)
        );

        let absent = prompts
            .delete(&bob, PromptId::from_i64(999))
            .await
            .unwrap_err();
        assert!(matches!(absent, ProjectError::PromptNotFound));

        let absent = files
            .delete(&bob, FileRecordId::from_i64(999))
            .await
            .unwrap_err();
        assert!(matches!(absent, ProjectError::FileNotFound));
    }
}

#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;

    use auth::application::{
        LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, ResolveIdentityUseCase,
    };
    use auth::store::MemoryUserRepository;
    use auth::{AuthConfig, Principal};

    use crate::application::ProjectUseCase;
    use crate::error::ProjectError;
    use crate::infra::memory::{MemoryFileStore, MemoryProjectsRepository};

    async fn sign_up_and_in(
        users: &Arc<MemoryUserRepository>,
        config: &Arc<AuthConfig>,
        email: &str,
        password: &str,
    ) -> Principal {
        RegisterUseCase::new(users.clone(), config.clone())
            .execute(RegisterInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap();

        let token = LoginUseCase::new(users.clone(), config.clone())
            .execute(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap()
            .access_token;

        ResolveIdentityUseCase::new(users.clone(), config.clone())
            .execute(&token)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_login_create_and_cross_tenant_lookup() {
        let users = Arc::new(MemoryUserRepository::new());
        let auth_config = Arc::new(AuthConfig::with_random_secret());
        let repo = Arc::new(MemoryProjectsRepository::new());
        let store = Arc::new(MemoryFileStore::new());

        // Register and log in; wrong password first, as a sanity check
        let login = LoginUseCase::new(users.clone(), auth_config.clone());
        RegisterUseCase::new(users.clone(), auth_config.clone())
            .execute(RegisterInput {
                email: "alice@example.com".to_string(),
                password: "Passw0rd".to_string(),
            })
            .await
            .unwrap();
        assert!(login
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "nope1234".to_string(),
            })
            .await
            .is_err());

        let token = login
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "Passw0rd".to_string(),
            })
            .await
            .unwrap()
            .access_token;

        let alice = ResolveIdentityUseCase::new(users.clone(), auth_config.clone())
            .execute(&token)
            .await
            .unwrap();

        // Alice creates the first project; it gets id 1 and her ownership
        let projects = ProjectUseCase::new(repo.clone(), repo.clone(), store);
        let project = projects
            .create(&alice, "Demo".to_string())
            .await
            .unwrap();
        assert_eq!(project.project_id.as_i64(), 1);
        assert_eq!(project.owner_id, alice.user_id);

        // A second, freshly registered user cannot reach project 1
        let mallory =
            sign_up_and_in(&users, &auth_config, "mallory@example.com", "Passw0rd").await;
        let err = projects
            .delete(&mallory, project.project_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::ProjectNotFound));
        assert!(projects.list(&mallory).await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_project_create_request_deserialization() {
        let json = r#"{"name":"Demo"}"#;
        let request: ProjectCreateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Demo");
    }

    #[test]
    fn test_project_response_serialization() {
        let response = ProjectResponse {
            id: 1,
            name: "Demo".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""id":1"#));
        assert!(json.contains(r#""name":"Demo""#));
    }

    #[test]
    fn test_file_response_serialization() {
        let response = FileResponse {
            id: 3,
            project_id: 1,
            filename: "notes.txt".to_string(),
            external_file_id: "file-abc".to_string(),
            file_size: 5,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("projectId"));
        assert!(json.contains("externalFileId"));
        assert!(json.contains("fileSize"));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::repository::FileStoreError;
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(ProjectError, StatusCode)> = vec![
            (ProjectError::ProjectNotFound, StatusCode::NOT_FOUND),
            (ProjectError::PromptNotFound, StatusCode::NOT_FOUND),
            (ProjectError::FileNotFound, StatusCode::NOT_FOUND),
            (
                ProjectError::FileTooLarge { max_bytes: 1 },
                StatusCode::BAD_REQUEST,
            ),
            (ProjectError::MissingFile, StatusCode::BAD_REQUEST),
            (
                ProjectError::Storage(FileStoreError("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ProjectError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_not_found_messages_do_not_leak_ownership() {
        // The same message serves both "missing" and "not yours"
        assert_eq!(ProjectError::ProjectNotFound.to_string(), "Project not found");
        assert_eq!(ProjectError::PromptNotFound.to_string(), "Prompt not found");
        assert_eq!(ProjectError::FileNotFound.to_string(), "File not found");
    }
}
