use careerpilot::{
    build_router,
    config::session::{load_session_key, validate_production_config, SessionConfig},
    db,
    repositories::{
        SqliteDraftRepository, SqliteJobRepository, SqliteProfileRepository, SqliteUserRepository,
    },
    services::{
        AuthService, DraftService, GenerationClient, JobSearchClient, ProfileService, UserService,
    },
    AppState,
};

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "careerpilot=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    validate_production_config();

    // Database connection
    let pool = db::create_pool().await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize repositories
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let profile_repository = Arc::new(SqliteProfileRepository::new(pool.clone()));
    let draft_repository = Arc::new(SqliteDraftRepository::new(pool.clone()));
    let job_repository = Arc::new(SqliteJobRepository::new(pool.clone()));

    // Initialize services
    let user_service = Arc::new(UserService::new(user_repository.clone()));
    let auth_service = Arc::new(AuthService::new(user_repository.clone()));
    let profile_service = Arc::new(ProfileService::new(
        profile_repository.clone(),
        user_repository.clone(),
        draft_repository.clone(),
        job_repository.clone(),
    ));
    let draft_service = Arc::new(DraftService::new(draft_repository.clone()));

    // External clients
    let job_search = Arc::new(JobSearchClient::from_env());
    let generation_client = Arc::new(GenerationClient::from_env());

    let state = AppState {
        user_service,
        auth_service,
        profile_service,
        draft_service,
        job_repository,
        job_search,
        generation_client,
        session_config: SessionConfig::from_env(),
        cookie_key: load_session_key(),
        pool,
    };

    let app = build_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
