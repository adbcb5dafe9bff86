pub mod test_helpers {
    use crate::config::session::SessionConfig;
    use crate::repositories::{
        SqliteDraftRepository, SqliteJobRepository, SqliteProfileRepository, SqliteUserRepository,
    };
    use crate::services::{
        AuthService, DraftService, GenerationClient, JobSearchClient, ProfileService, UserService,
    };
    use crate::AppState;
    use axum::Router;
    use axum_extra::extract::cookie::{Key, SameSite};
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    /// External endpoints for a test app. `None` means unconfigured, which
    /// exercises the CONFIGURATION_ERROR paths.
    #[derive(Default)]
    pub struct TestAppConfig {
        pub job_search_url: Option<String>,
        pub generation_api_key: Option<String>,
        pub generation_url: Option<String>,
    }

    /// Session policy matching a development deployment; tests construct it
    /// directly instead of reading the process environment.
    pub fn test_session_config() -> SessionConfig {
        SessionConfig {
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            max_age: time::Duration::days(7),
            name: "career_session".to_string(),
        }
    }

    /// Full router over an in-memory database, wired the same way `main`
    /// wires production.
    pub async fn build_test_app(config: TestAppConfig) -> Result<(Router, SqlitePool), sqlx::Error> {
        let pool = create_test_db().await?;

        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let profile_repository = Arc::new(SqliteProfileRepository::new(pool.clone()));
        let draft_repository = Arc::new(SqliteDraftRepository::new(pool.clone()));
        let job_repository = Arc::new(SqliteJobRepository::new(pool.clone()));

        let job_search = JobSearchClient::with_config(
            config.job_search_url.clone(),
            config.job_search_url.as_ref().map(|_| "test-id".to_string()),
            config.job_search_url.as_ref().map(|_| "test-key".to_string()),
        );

        let generation_client = GenerationClient::with_config(
            config.generation_api_key,
            config
                .generation_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            "test-model".to_string(),
        );

        let state = AppState {
            user_service: Arc::new(UserService::new(user_repository.clone())),
            auth_service: Arc::new(AuthService::new(user_repository.clone())),
            profile_service: Arc::new(ProfileService::new(
                profile_repository,
                user_repository,
                draft_repository.clone(),
                job_repository.clone(),
            )),
            draft_service: Arc::new(DraftService::new(draft_repository)),
            job_repository,
            job_search: Arc::new(job_search),
            generation_client: Arc::new(generation_client),
            session_config: test_session_config(),
            cookie_key: Key::generate(),
            pool: pool.clone(),
        };

        Ok((crate::build_router(state), pool))
    }

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let result = sqlx::query("INSERT INTO users (email, password_hash) VALUES (?, ?)")
            .bind(email)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a profile row directly, bypassing the service layer
    pub async fn insert_test_profile(
        pool: &SqlitePool,
        user_id: i64,
        experience: Option<&str>,
        education: Option<&str>,
        skills: Option<&str>,
        strengths: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO profiles (user_id, experience, education, skills, strengths) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(experience)
        .bind(education)
        .bind(skills)
        .bind(strengths)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Insert a draft row directly
    pub async fn insert_test_draft(
        pool: &SqlitePool,
        user_id: i64,
        name: &str,
        content: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO drafts (user_id, name, content) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(name)
            .bind(content)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}
