pub mod draft_repository;
pub mod job_repository;
pub mod profile_repository;
pub mod user_repository;

pub use draft_repository::{DraftRepository, SqliteDraftRepository};
pub use job_repository::{JobRepository, SqliteJobRepository};
pub use profile_repository::{ProfileRepository, SqliteProfileRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Not found")]
    NotFound,
    #[error("Already exists")]
    AlreadyExists,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
