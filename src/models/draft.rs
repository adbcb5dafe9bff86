use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A saved, editable cover-letter text owned by one user.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub content: String,
    pub created_at: Option<String>,
}
