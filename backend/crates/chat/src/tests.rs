//! Unit tests for the chat crate
//!
//! The model client is replaced with a scripted mock so the retry policy
//! and conversation assembly are exercised without network access.

#[cfg(test)]
mod converse_tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use auth::Principal;
    use kernel::id::{ProjectId, UserId};
    use platform::rate_limit::{MemoryRateLimitStore, RateLimitConfig};
    use projects::domain::repository::{ProjectRepository, PromptRepository};
    use projects::store::MemoryProjectsRepository;

    use crate::application::config::ChatConfig;
    use crate::application::ConverseUseCase;
    use crate::domain::model::{ChatTurn, ModelClient, ModelError, TurnRole};
    use crate::error::ChatError;

    /// Mock client that replays a scripted sequence of outcomes
    #[derive(Default)]
    struct ScriptedModelClient {
        script: Mutex<VecDeque<Result<String, ModelError>>>,
        attempts: AtomicU32,
        last_turns: Mutex<Option<Vec<ChatTurn>>>,
    }

    impl ScriptedModelClient {
        fn with_script(script: Vec<Result<String, ModelError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                ..Default::default()
            })
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }

        fn captured_turns(&self) -> Vec<ChatTurn> {
            self.last_turns.lock().unwrap().clone().unwrap_or_default()
        }
    }

    impl ModelClient for ScriptedModelClient {
        async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ModelError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            *self.last_turns.lock().unwrap() = Some(turns.to_vec());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("out of script".to_string()))
        }
    }

    fn principal(id: i64, email: &str) -> Principal {
        Principal {
            user_id: UserId::from_i64(id),
            email: auth::Email::from_db(email),
        }
    }

    async fn seeded_project(
        repo: &Arc<MemoryProjectsRepository>,
        owner: &Principal,
        prompts: &[&str],
    ) -> ProjectId {
        let project = ProjectRepository::insert(repo.as_ref(), owner.user_id, "Demo")
            .await
            .unwrap();
        for (i, content) in prompts.iter().enumerate() {
            PromptRepository::insert(
                repo.as_ref(),
                project.project_id,
                &format!("prompt-{i}"),
                content,
            )
            .await
            .unwrap();
        }
        project.project_id
    }

    fn use_case(
        repo: Arc<MemoryProjectsRepository>,
        model: Arc<ScriptedModelClient>,
        config: ChatConfig,
    ) -> ConverseUseCase<MemoryProjectsRepository, ScriptedModelClient, MemoryRateLimitStore> {
        ConverseUseCase::new(
            repo,
            model,
            Arc::new(MemoryRateLimitStore::new()),
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn test_prompts_become_system_context_in_creation_order() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id =
            seeded_project(&repo, &alice, &["You are terse.", "Answer in French."]).await;

        let model = ScriptedModelClient::with_script(vec![Ok("Bonjour.".to_string())]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let reply = uc
            .execute(&alice, project_id, "Say hello".to_string())
            .await
            .unwrap();
        assert_eq!(reply, "Bonjour.");

        let turns = model.captured_turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::System);
        assert_eq!(turns[0].content, "You are terse.\nAnswer in French.");
        assert_eq!(turns[1].role, TurnRole::User);
        assert_eq!(turns[1].content, "Say hello");
    }

    #[tokio::test]
    async fn test_default_system_context_when_project_has_no_prompts() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let model = ScriptedModelClient::with_script(vec![Ok("hi".to_string())]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        uc.execute(&alice, project_id, "hello".to_string())
            .await
            .unwrap();

        let turns = model.captured_turns();
        assert_eq!(turns[0].role, TurnRole::System);
        assert!(turns[0].content.contains("helpful assistant"));
    }

    #[tokio::test]
    async fn test_auth_error_is_never_retried() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let model = ScriptedModelClient::with_script(vec![Err(ModelError::Auth)]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let err = uc
            .execute(&alice, project_id, "hello".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Upstream(ModelError::Auth)));
        assert_eq!(model.attempts(), 1, "auth failures must not be retried");
    }

    #[tokio::test]
    async fn test_quota_error_is_never_retried() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let model = ScriptedModelClient::with_script(vec![Err(ModelError::QuotaExceeded)]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let err = uc
            .execute(&alice, project_id, "hello".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Upstream(ModelError::QuotaExceeded)));
        assert_eq!(model.attempts(), 1, "quota failures must not be retried");
    }

    #[tokio::test]
    async fn test_transient_failures_retry_until_success() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let model = ScriptedModelClient::with_script(vec![
            Err(ModelError::RateLimited),
            Err(ModelError::Other("connection reset".to_string())),
            Ok("finally".to_string()),
        ]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let reply = uc
            .execute(&alice, project_id, "hello".to_string())
            .await
            .unwrap();

        assert_eq!(reply, "finally");
        assert_eq!(model.attempts(), 3);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let model = ScriptedModelClient::with_script(vec![
            Err(ModelError::RateLimited),
            Err(ModelError::RateLimited),
            Err(ModelError::RateLimited),
            Ok("never reached".to_string()),
        ]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let err = uc
            .execute(&alice, project_id, "hello".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Upstream(ModelError::RateLimited)));
        assert_eq!(model.attempts(), 3, "must stop at max_attempts");
    }

    #[tokio::test]
    async fn test_foreign_project_is_not_found_before_any_model_call() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let bob = principal(2, "bob@example.com");
        let project_id = seeded_project(&repo, &alice, &["secret context"]).await;

        let model = ScriptedModelClient::with_script(vec![Ok("leak".to_string())]);
        let uc = use_case(repo, model.clone(), ChatConfig::immediate());

        let err = uc
            .execute(&bob, project_id, "hello".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::ProjectNotFound));
        assert_eq!(model.attempts(), 0, "the model must never see the request");
    }

    #[tokio::test]
    async fn test_local_rate_limit() {
        let repo = Arc::new(MemoryProjectsRepository::new());
        let alice = principal(1, "alice@example.com");
        let project_id = seeded_project(&repo, &alice, &[]).await;

        let config = ChatConfig {
            rate_limit: RateLimitConfig::new(1, 60),
            ..ChatConfig::immediate()
        };
        let model = ScriptedModelClient::with_script(vec![Ok("one".to_string())]);
        let uc = use_case(repo, model.clone(), config);

        uc.execute(&alice, project_id, "first".to_string())
            .await
            .unwrap();

        let err = uc
            .execute(&alice, project_id, "second".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::RateLimitExceeded));
        assert_eq!(model.attempts(), 1);
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_chat_request_deserialization() {
        let json = r#"{"projectId":1,"message":"hello"}"#;
        let request: ChatRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.project_id, 1);
        assert_eq!(request.message, "hello");
    }

    #[test]
    fn test_chat_response_serialization() {
        let response = ChatResponse {
            reply: "hi".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"reply":"hi"}"#);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::domain::model::ModelError;
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(ChatError, StatusCode)> = vec![
            (ChatError::ProjectNotFound, StatusCode::NOT_FOUND),
            (ChatError::RateLimitExceeded, StatusCode::TOO_MANY_REQUESTS),
            (
                ChatError::Upstream(ModelError::RateLimited),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ChatError::Upstream(ModelError::Auth),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ChatError::Upstream(ModelError::QuotaExceeded),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ChatError::Internal("test".into()),
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
}
