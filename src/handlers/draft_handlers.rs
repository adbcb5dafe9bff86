use crate::auth::session::require_session;
use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct DraftBody {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// GET /drafts. Newest first, only the caller's.
pub async fn list_drafts(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    let drafts = state.draft_service.list(user.user_id).await?;

    Ok(Json(json!({ "success": true, "drafts": drafts })))
}

/// POST /drafts. Name is optional and defaults to a timestamped one.
pub async fn create_draft(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<DraftBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_session(&jar, &state.session_config)?;

    let draft = state
        .draft_service
        .create(user.user_id, body.name, body.content.unwrap_or_default())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "draft": draft })),
    ))
}

/// PUT /drafts/{id}
pub async fn update_draft(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(draft_id): Path<i64>,
    Json(body): Json<DraftBody>,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;

    let draft = state
        .draft_service
        .update(
            user.user_id,
            draft_id,
            body.name,
            body.content.unwrap_or_default(),
        )
        .await?;

    Ok(Json(json!({ "success": true, "draft": draft })))
}

/// DELETE /drafts/{id}
pub async fn delete_draft(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(draft_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    state.draft_service.delete(user.user_id, draft_id).await?;

    Ok(Json(json!({ "success": true, "message": "Draft deleted" })))
}
