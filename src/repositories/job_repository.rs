use crate::models::job::SavedJob;
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Persistence for bookmarked job listings. These back the profile page's
/// job count and the saved-jobs list; the listings themselves come from the
/// external search and are copied, not referenced.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait JobRepository: Send + Sync {
    async fn save(
        &self,
        user_id: i64,
        external_id: &str,
        title: &str,
        company_name: &str,
        location: &str,
        redirect_url: Option<&str>,
    ) -> RepositoryResult<SavedJob>;
    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<SavedJob>>;
    async fn delete_owned(&self, user_id: i64, job_id: i64) -> RepositoryResult<bool>;
    async fn count_by_user(&self, user_id: i64) -> RepositoryResult<i64>;
}

pub struct SqliteJobRepository {
    pool: SqlitePool,
}

impl SqliteJobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for SqliteJobRepository {
    async fn save(
        &self,
        user_id: i64,
        external_id: &str,
        title: &str,
        company_name: &str,
        location: &str,
        redirect_url: Option<&str>,
    ) -> RepositoryResult<SavedJob> {
        let job = sqlx::query_as::<_, SavedJob>(
            r#"
            INSERT INTO saved_jobs (user_id, external_id, title, company_name, location, redirect_url)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, external_id, title, company_name, location, redirect_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(external_id)
        .bind(title)
        .bind(company_name)
        .bind(location)
        .bind(redirect_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<SavedJob>> {
        let jobs = sqlx::query_as::<_, SavedJob>(
            r#"
            SELECT id, user_id, external_id, title, company_name, location, redirect_url, created_at
            FROM saved_jobs
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn delete_owned(&self, user_id: i64, job_id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE id = ? AND user_id = ?")
            .bind(job_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_user(&self, user_id: i64) -> RepositoryResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM saved_jobs WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
