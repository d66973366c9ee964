//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::middleware::{AuthMiddlewareState, require_auth};
use auth::{AuthConfig, PgUserRepository};
use axum::{
    Json, Router,
    extract::Request,
    http,
    http::{Method, header},
    middleware::Next,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use chat::{ChatConfig, HttpModelClient, chat_router};
use platform::rate_limit::MemoryRateLimitStore;
use projects::{PgProjectsRepository, ProjectsConfig, projects_router};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,projects=info,chat=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration: the token secret is mandatory outside debug
    // builds and the server refuses to start without a strong one
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        let secret_b64 =
            env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set in production");
        let secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        AuthConfig::new(secret)?
    };

    if let Ok(pepper_b64) = env::var("PASSWORD_PEPPER") {
        auth_config.password_pepper =
            Some(Engine::decode(&general_purpose::STANDARD, &pepper_b64)?);
    }

    let auth_config = Arc::new(auth_config);

    // Model provider configuration: no key, no server
    let model_api_key =
        env::var("MODEL_API_KEY").expect("MODEL_API_KEY must be set in environment");
    let model_base_url =
        env::var("MODEL_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

    let mut chat_config = ChatConfig::default();
    if let Ok(model) = env::var("MODEL_NAME") {
        chat_config.model = model;
    }
    let chat_config = Arc::new(chat_config);

    tracing::info!(
        base_url = %model_base_url,
        model = %chat_config.model,
        "Model provider configured"
    );

    // Stores and clients
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let projects_repo = Arc::new(PgProjectsRepository::new(pool.clone()));
    let model_client = Arc::new(HttpModelClient::new(
        model_base_url,
        model_api_key,
        &chat_config,
    ));
    let rate_limiter = Arc::new(MemoryRateLimitStore::new());
    let projects_config = Arc::new(ProjectsConfig::default());

    // Every protected route goes through the identity resolver
    let mw_state = AuthMiddlewareState {
        repo: user_repo.clone(),
        config: auth_config.clone(),
    };
    let require_auth_layer = axum::middleware::from_fn(move |req: Request, next: Next| {
        let state = mw_state.clone();
        async move { require_auth(state, req, next).await }
    });

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/api/users",
            auth::router::auth_router_generic(user_repo.clone(), auth_config.clone()),
        )
        .nest(
            "/api/projects",
            projects_router(
                projects_repo.clone(),
                model_client.clone(),
                projects_config.clone(),
            )
            .layer(require_auth_layer.clone()),
        )
        .nest(
            "/api/chat",
            chat_router(
                projects_repo.clone(),
                model_client.clone(),
                rate_limiter,
                chat_config.clone(),
            )
            .layer(require_auth_layer),
        )
        .route("/health", get(health_check).with_state(pool.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health - liveness probe with a database round trip
async fn health_check(
    axum::extract::State(pool): axum::extract::State<PgPool>,
) -> Json<serde_json::Value> {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => Json(serde_json::json!({
            "status": "healthy",
            "database": "connected",
        })),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Json(serde_json::json!({
                "status": "unhealthy",
                "error": e.to_string(),
            }))
        }
    }
}
