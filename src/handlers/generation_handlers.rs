use crate::auth::session::require_session;
use crate::error::AppError;
use crate::services::prompt_builder::{build_prompt, GenerationOptions, ProfileSnapshot};
use crate::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplicationBody {
    pub job_description: Option<String>,
    pub length: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
}

/// POST /newApplication. Builds the prompt from the pasted job description
/// plus whatever profile fields exist, calls the model, and returns the
/// structured result merged with `success: true`.
pub async fn new_application(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<NewApplicationBody>,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;

    let job_description = body
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    // A missing profile is fine; the prompt adapts to what is present.
    let profile = state.profile_service.get(user.user_id).await?;
    let snapshot = ProfileSnapshot {
        strengths: profile.as_ref().and_then(|p| p.strengths.clone()),
        experience: profile.as_ref().and_then(|p| p.experience.clone()),
        education: profile.as_ref().and_then(|p| p.education.clone()),
    };

    let options = GenerationOptions::resolve(
        body.length.as_deref(),
        body.tone.as_deref(),
        body.language.as_deref(),
    );

    let prompt = build_prompt(job_description, &snapshot, &options);
    let output = state.generation_client.generate(&prompt).await?;

    if output.is_fallback() {
        tracing::warn!(
            user_id = user.user_id,
            "Model output did not match the contract; returning fallback wrapper"
        );
    }

    let mut response = serde_json::to_value(output.into_result()).map_err(|e| {
        tracing::error!("Failed to serialize generation result: {}", e);
        AppError::Internal
    })?;
    if let Some(object) = response.as_object_mut() {
        object.insert("success".to_string(), json!(true));
    }

    Ok(Json(response))
}
