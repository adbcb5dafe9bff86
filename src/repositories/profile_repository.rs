use crate::models::profile::{Profile, ProfileUpdate};
use crate::repositories::RepositoryResult;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Option<Profile>>;
    async fn upsert(&self, user_id: i64, fields: &ProfileUpdate) -> RepositoryResult<Profile>;
    async fn delete_by_user(&self, user_id: i64) -> RepositoryResult<bool>;
}

pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, experience, education, skills, strengths, updated_at
            FROM profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    // Single atomic insert-on-conflict-update keyed by user_id. COALESCE
    // keeps the stored value for any field the caller didn't provide, so a
    // partial update can never clobber unrelated fields, and concurrent
    // upserts for the same user can't race a read-then-write.
    async fn upsert(&self, user_id: i64, fields: &ProfileUpdate) -> RepositoryResult<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, experience, education, skills, strengths, updated_at)
            VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(user_id) DO UPDATE SET
                experience = COALESCE(excluded.experience, profiles.experience),
                education = COALESCE(excluded.education, profiles.education),
                skills = COALESCE(excluded.skills, profiles.skills),
                strengths = COALESCE(excluded.strengths, profiles.strengths),
                updated_at = CURRENT_TIMESTAMP
            RETURNING id, user_id, experience, education, skills, strengths, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.experience)
        .bind(&fields.education)
        .bind(&fields.skills)
        .bind(&fields.strengths)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
