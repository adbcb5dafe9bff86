use crate::auth::session::require_session;
use crate::error::AppError;
use crate::models::profile::ProfileUpdate;
use crate::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::PrivateCookieJar;
use serde_json::{json, Value};

/// GET /profile. Account block, stats and profile fields in one payload.
pub async fn get_profile(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    let overview = state.profile_service.overview(user.user_id).await?;

    Ok(Json(json!({ "success": true, "data": overview })))
}

/// PUT /profile. Partial update; omitted fields keep their stored values.
pub async fn update_profile(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    let profile = state.profile_service.upsert(user.user_id, body).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "profile": profile,
            "message": "Profile saved",
        },
    })))
}

/// DELETE /profile. Idempotent; deleting a profile that never existed is
/// still a success.
pub async fn delete_profile(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    let removed = state.profile_service.clear(user.user_id).await?;

    let message = if removed {
        "Profile deleted"
    } else {
        "No profile to delete"
    };

    Ok(Json(json!({
        "success": true,
        "data": { "message": message },
    })))
}
