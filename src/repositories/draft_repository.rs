use crate::models::draft::Draft;
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait DraftRepository: Send + Sync {
    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Draft>>;
    async fn create(&self, user_id: i64, name: &str, content: &str) -> RepositoryResult<Draft>;
    /// Returns `None` when the draft doesn't exist or belongs to another user.
    async fn update_owned(
        &self,
        user_id: i64,
        draft_id: i64,
        name: Option<&str>,
        content: &str,
    ) -> RepositoryResult<Option<Draft>>;
    /// Returns `false` when the draft doesn't exist or belongs to another user.
    async fn delete_owned(&self, user_id: i64, draft_id: i64) -> RepositoryResult<bool>;
    async fn count_by_user(&self, user_id: i64) -> RepositoryResult<i64>;
}

pub struct SqliteDraftRepository {
    pool: SqlitePool,
}

impl SqliteDraftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DraftRepository for SqliteDraftRepository {
    async fn list_by_user(&self, user_id: i64) -> RepositoryResult<Vec<Draft>> {
        let drafts = sqlx::query_as::<_, Draft>(
            r#"
            SELECT id, user_id, name, content, created_at
            FROM drafts
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(drafts)
    }

    async fn create(&self, user_id: i64, name: &str, content: &str) -> RepositoryResult<Draft> {
        let draft = sqlx::query_as::<_, Draft>(
            r#"
            INSERT INTO drafts (user_id, name, content)
            VALUES (?, ?, ?)
            RETURNING id, user_id, name, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft)
    }

    // Ownership is enforced in the WHERE clause, not by a prior read, so a
    // mismatched user can't tell "not yours" apart from "doesn't exist".
    async fn update_owned(
        &self,
        user_id: i64,
        draft_id: i64,
        name: Option<&str>,
        content: &str,
    ) -> RepositoryResult<Option<Draft>> {
        let draft = sqlx::query_as::<_, Draft>(
            r#"
            UPDATE drafts
            SET name = COALESCE(?, name), content = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, name, content, created_at
            "#,
        )
        .bind(name)
        .bind(content)
        .bind(draft_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(draft)
    }

    async fn delete_owned(&self, user_id: i64, draft_id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM drafts WHERE id = ? AND user_id = ?")
            .bind(draft_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_user(&self, user_id: i64) -> RepositoryResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM drafts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
