pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use axum::extract::FromRef;
use axum::routing::{delete, get, post, put};
use axum::Router;
use axum_extra::extract::cookie::Key;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use config::session::SessionConfig;
use handlers::{
    auth_handlers, draft_handlers, generation_handlers, job_handlers, profile_handlers,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<services::user_service::UserService>,
    pub auth_service: Arc<services::auth_service::AuthService>,
    pub profile_service: Arc<services::profile_service::ProfileService>,
    pub draft_service: Arc<services::draft_service::DraftService>,
    pub job_repository: Arc<dyn repositories::JobRepository>,
    pub job_search: Arc<services::job_search::JobSearchClient>,
    pub generation_client: Arc<services::generation_client::GenerationClient>,
    pub session_config: SessionConfig,
    pub cookie_key: Key,
    pub pool: sqlx::SqlitePool,
}

// Lets the private cookie jar pull its encryption key out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auth/signup", post(auth_handlers::signup))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/logout", post(auth_handlers::logout))
        .route("/auth/session", get(auth_handlers::session))
        .route(
            "/profile",
            get(profile_handlers::get_profile)
                .put(profile_handlers::update_profile)
                .delete(profile_handlers::delete_profile),
        )
        .route(
            "/jobs",
            get(job_handlers::search_jobs).post(job_handlers::save_job),
        )
        .route("/jobs/saved", get(job_handlers::list_saved_jobs))
        .route("/jobs/{id}", delete(job_handlers::delete_saved_job))
        .route(
            "/newApplication",
            post(generation_handlers::new_application),
        )
        .route(
            "/drafts",
            get(draft_handlers::list_drafts).post(draft_handlers::create_draft),
        )
        .route(
            "/drafts/{id}",
            put(draft_handlers::update_draft).delete(draft_handlers::delete_draft),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
