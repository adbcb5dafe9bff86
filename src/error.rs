use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-level error, rendered as `{success: false, error: {code, message}}`.
///
/// Every lower-layer error (repository, service, external client) converges
/// here before crossing the HTTP boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "USER_EXISTS",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Database(_) | AppError::Internal => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_)
            | AppError::Configuration(_)
            | AppError::Database(_)
            | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        // Database internals stay out of client responses
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "error": {
                "code": code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

impl From<crate::repositories::RepositoryError> for AppError {
    fn from(err: crate::repositories::RepositoryError) -> Self {
        use crate::repositories::RepositoryError;
        match err {
            RepositoryError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepositoryError::AlreadyExists => {
                AppError::Conflict("Resource already exists".to_string())
            }
            RepositoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl From<crate::services::user_service::UserServiceError> for AppError {
    fn from(err: crate::services::user_service::UserServiceError) -> Self {
        use crate::services::user_service::UserServiceError;
        match err {
            UserServiceError::InvalidEmail => {
                AppError::Validation("Please enter a valid email address".to_string())
            }
            UserServiceError::InvalidPassword => {
                AppError::Validation("Password must be between 6 and 100 characters".to_string())
            }
            UserServiceError::PasswordMismatch => {
                AppError::Validation("Passwords do not match".to_string())
            }
            UserServiceError::EmailTaken => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            UserServiceError::UserNotFound => AppError::NotFound("User not found".to_string()),
            UserServiceError::HashingError(e) => {
                tracing::error!("Password hashing failed: {}", e);
                AppError::Internal
            }
            UserServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<crate::services::auth_service::AuthServiceError> for AppError {
    fn from(err: crate::services::auth_service::AuthServiceError) -> Self {
        use crate::services::auth_service::AuthServiceError;
        match err {
            AuthServiceError::InvalidCredentials => AppError::InvalidCredentials,
            AuthServiceError::UserNotFound => AppError::NotFound("User not found".to_string()),
            AuthServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<crate::services::profile_service::ProfileServiceError> for AppError {
    fn from(err: crate::services::profile_service::ProfileServiceError) -> Self {
        use crate::services::profile_service::ProfileServiceError;
        match err {
            ProfileServiceError::FieldTooLong { field, max } => AppError::Validation(format!(
                "Field '{}' exceeds the maximum length of {} characters",
                field, max
            )),
            ProfileServiceError::NoFields => {
                AppError::Validation("At least one field is required".to_string())
            }
            ProfileServiceError::UserNotFound => AppError::NotFound("User not found".to_string()),
            ProfileServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<crate::services::draft_service::DraftServiceError> for AppError {
    fn from(err: crate::services::draft_service::DraftServiceError) -> Self {
        use crate::services::draft_service::DraftServiceError;
        match err {
            DraftServiceError::EmptyContent => {
                AppError::Validation("Content is required".to_string())
            }
            DraftServiceError::NotFound => AppError::NotFound("Draft not found".to_string()),
            DraftServiceError::RepositoryError(e) => e.into(),
        }
    }
}

impl From<crate::services::job_search::JobSearchError> for AppError {
    fn from(err: crate::services::job_search::JobSearchError) -> Self {
        use crate::services::job_search::JobSearchError;
        match err {
            JobSearchError::MissingCredentials => {
                AppError::Configuration("Job search credentials are not configured".to_string())
            }
            JobSearchError::UpstreamStatus(status) => {
                AppError::Upstream(format!("Job search returned status {}", status))
            }
            JobSearchError::Request(e) => {
                tracing::warn!("Job search request failed: {}", e);
                AppError::Upstream("Failed to fetch jobs".to_string())
            }
            JobSearchError::MalformedResponse(msg) => {
                AppError::Upstream(format!("Job search returned an unexpected payload: {}", msg))
            }
        }
    }
}

impl From<crate::services::generation_client::GenerationError> for AppError {
    fn from(err: crate::services::generation_client::GenerationError) -> Self {
        use crate::services::generation_client::GenerationError;
        match err {
            GenerationError::MissingApiKey => {
                AppError::Configuration("Generation backend API key is not set".to_string())
            }
            GenerationError::UpstreamStatus { status, .. } => {
                AppError::Upstream(format!("Generation backend returned status {}", status))
            }
            GenerationError::Request(e) => {
                tracing::warn!("Generation request failed: {}", e);
                AppError::Upstream("Generation backend is unreachable".to_string())
            }
            GenerationError::EmptyCompletion => {
                AppError::Upstream("Generation backend returned no completion".to_string())
            }
        }
    }
}
