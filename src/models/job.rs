use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A normalized job listing from the external search API.
///
/// This is the shape the client sees regardless of what the upstream
/// provider returns; the adapter owns the mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub category: String,
    /// `"$min - $max"` when both bounds exist, `"$min"` when only a minimum
    /// exists, otherwise absent.
    pub salary_range: Option<String>,
    pub created_at: Option<String>,
    pub redirect_url: Option<String>,
    pub description: String,
}

/// A listing the user bookmarked for later.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: i64,
    pub user_id: i64,
    pub external_id: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub redirect_url: Option<String>,
    pub created_at: Option<String>,
}
