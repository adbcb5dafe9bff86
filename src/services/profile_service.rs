use crate::models::profile::{Profile, ProfileUpdate};
use crate::repositories::draft_repository::DraftRepository;
use crate::repositories::job_repository::JobRepository;
use crate::repositories::profile_repository::ProfileRepository;
use crate::repositories::user_repository::UserRepository;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

// Store-level caps; the UI's softer limits (e.g. five strength tags) are not
// enforced here.
const MAX_EXPERIENCE: usize = 2000;
const MAX_EDUCATION: usize = 2000;
const MAX_SKILLS: usize = 500;
const MAX_STRENGTHS: usize = 1000;

const MASKED_PASSWORD: &str = "••••••••••••";

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("Field '{field}' exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("At least one field is required")]
    NoFields,
    #[error("User not found")]
    UserNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::RepositoryError),
}

/// Read-only account block shown on the profile page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountInfo {
    pub email: String,
    pub password_hash: String,
    pub created_at: String,
    pub member_since: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub job_count: i64,
    pub draft_count: i64,
    pub profile_completeness: u8,
}

#[derive(Debug, Serialize)]
pub struct ProfileOverview {
    pub user: UserAccountInfo,
    pub stats: UserStats,
    pub profile: Option<Profile>,
}

pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    users: Arc<dyn UserRepository>,
    drafts: Arc<dyn DraftRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl ProfileService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        users: Arc<dyn UserRepository>,
        drafts: Arc<dyn DraftRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            profiles,
            users,
            drafts,
            jobs,
        }
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<Profile>, ProfileServiceError> {
        Ok(self.profiles.find_by_user(user_id).await?)
    }

    pub async fn upsert(
        &self,
        user_id: i64,
        fields: ProfileUpdate,
    ) -> Result<Profile, ProfileServiceError> {
        if fields.is_empty() {
            return Err(ProfileServiceError::NoFields);
        }
        validate_len(&fields.experience, "experience", MAX_EXPERIENCE)?;
        validate_len(&fields.education, "education", MAX_EDUCATION)?;
        validate_len(&fields.skills, "skills", MAX_SKILLS)?;
        validate_len(&fields.strengths, "strengths", MAX_STRENGTHS)?;

        Ok(self.profiles.upsert(user_id, &fields).await?)
    }

    /// Drops the profile row; the user stays. Deleting a profile that was
    /// never created succeeds and says so.
    pub async fn clear(&self, user_id: i64) -> Result<bool, ProfileServiceError> {
        Ok(self.profiles.delete_by_user(user_id).await?)
    }

    /// Account info, stats and profile for the profile page.
    pub async fn overview(&self, user_id: i64) -> Result<ProfileOverview, ProfileServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ProfileServiceError::UserNotFound)?;

        let profile = self.profiles.find_by_user(user_id).await?;
        let draft_count = self.drafts.count_by_user(user_id).await?;
        let job_count = self.jobs.count_by_user(user_id).await?;

        let created_raw = user.created_at.unwrap_or_default();

        Ok(ProfileOverview {
            user: UserAccountInfo {
                email: user.email,
                password_hash: MASKED_PASSWORD.to_string(),
                created_at: iso_timestamp(&created_raw),
                member_since: member_since(&created_raw),
            },
            stats: UserStats {
                job_count,
                draft_count,
                profile_completeness: completeness(profile.as_ref()),
            },
            profile,
        })
    }
}

fn validate_len(
    value: &Option<String>,
    field: &'static str,
    max: usize,
) -> Result<(), ProfileServiceError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ProfileServiceError::FieldTooLong { field, max }),
        _ => Ok(()),
    }
}

/// Percentage of the four profile fields that are non-blank after trimming.
/// Always one of 0, 25, 50, 75, 100; a missing profile scores 0.
pub fn completeness(profile: Option<&Profile>) -> u8 {
    let Some(profile) = profile else {
        return 0;
    };

    let fields = [
        &profile.experience,
        &profile.education,
        &profile.skills,
        &profile.strengths,
    ];

    let filled = fields
        .iter()
        .filter(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
        .count();

    ((filled as f64 / fields.len() as f64) * 100.0).round() as u8
}

// SQLite stores CURRENT_TIMESTAMP as "YYYY-MM-DD HH:MM:SS"; unparseable
// values pass through untouched rather than failing the request.
fn parse_sqlite_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok()
}

fn iso_timestamp(raw: &str) -> String {
    parse_sqlite_timestamp(raw)
        .map(|dt| dt.and_utc().to_rfc3339())
        .unwrap_or_else(|| raw.to_string())
}

fn member_since(raw: &str) -> String {
    parse_sqlite_timestamp(raw)
        .map(|dt| dt.format("%B %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}
