use crate::models::draft::Draft;
use crate::repositories::draft_repository::DraftRepository;
use chrono::Utc;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum DraftServiceError {
    #[error("Content is required")]
    EmptyContent,
    #[error("Draft not found")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::RepositoryError),
}

pub struct DraftService {
    repository: Arc<dyn DraftRepository>,
}

impl DraftService {
    pub fn new(repository: Arc<dyn DraftRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<Draft>, DraftServiceError> {
        Ok(self.repository.list_by_user(user_id).await?)
    }

    pub async fn create(
        &self,
        user_id: i64,
        name: Option<String>,
        content: String,
    ) -> Result<Draft, DraftServiceError> {
        if content.trim().is_empty() {
            return Err(DraftServiceError::EmptyContent);
        }

        let name = match name.filter(|n| !n.trim().is_empty()) {
            Some(name) => name,
            None => format!("Draft {}", Utc::now().format("%Y-%m-%d %H:%M")),
        };

        Ok(self.repository.create(user_id, &name, &content).await?)
    }

    /// Updates a draft the user owns. A draft that doesn't exist and a draft
    /// owned by someone else are the same `NotFound` to the caller.
    pub async fn update(
        &self,
        user_id: i64,
        draft_id: i64,
        name: Option<String>,
        content: String,
    ) -> Result<Draft, DraftServiceError> {
        if content.trim().is_empty() {
            return Err(DraftServiceError::EmptyContent);
        }

        self.repository
            .update_owned(user_id, draft_id, name.as_deref(), &content)
            .await?
            .ok_or(DraftServiceError::NotFound)
    }

    pub async fn delete(&self, user_id: i64, draft_id: i64) -> Result<(), DraftServiceError> {
        if self.repository.delete_owned(user_id, draft_id).await? {
            Ok(())
        } else {
            Err(DraftServiceError::NotFound)
        }
    }
}
