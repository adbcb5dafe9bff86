use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's career profile, 1:1 with the user and created lazily on first
/// save. All four content fields are optional free text; `strengths` is a
/// comma-joined tag list.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub strengths: Option<String>,
    pub updated_at: Option<String>,
}

/// Partial update: only fields present in the request change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub experience: Option<String>,
    pub education: Option<String>,
    pub skills: Option<String>,
    pub strengths: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.experience.is_none()
            && self.education.is_none()
            && self.skills.is_none()
            && self.strengths.is_none()
    }
}
