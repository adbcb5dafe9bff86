use crate::auth::session::require_session;
use crate::error::AppError;
use crate::services::job_search::JobQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub what: Option<String>,
    #[serde(rename = "where")]
    pub location: Option<String>,
    pub salary_min: Option<u32>,
    pub results_per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
    pub full_time: Option<String>,
    pub permanent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveJobBody {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub redirect_url: Option<String>,
}

/// GET /jobs. Proxies the external search; no persistence.
pub async fn search_jobs(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    require_session(&jar, &state.session_config)?;

    let query = JobQuery {
        what: params.what,
        location: params.location,
        salary_min: params.salary_min,
        results_per_page: params.results_per_page.unwrap_or(20),
        page: params.page.unwrap_or(1),
        sort_by: params.sort_by,
        full_time: params.full_time,
        permanent: params.permanent,
    };

    let jobs = state.job_search.search(&query).await?;

    Ok(Json(json!({ "success": true, "jobs": jobs })))
}

/// POST /jobs. Bookmarks a listing from the search results.
pub async fn save_job(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<SaveJobBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_session(&jar, &state.session_config)?;

    if body.id.trim().is_empty() || body.title.trim().is_empty() {
        return Err(AppError::Validation(
            "Job id and title are required".to_string(),
        ));
    }

    let job = state
        .job_repository
        .save(
            user.user_id,
            &body.id,
            &body.title,
            &body.company_name,
            &body.location,
            body.redirect_url.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "job": job })),
    ))
}

/// GET /jobs/saved
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;
    let jobs = state.job_repository.list_by_user(user.user_id).await?;

    Ok(Json(json!({ "success": true, "jobs": jobs })))
}

/// DELETE /jobs/{id}. Scoped to the owner; someone else's bookmark is a 404.
pub async fn delete_saved_job(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(job_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let user = require_session(&jar, &state.session_config)?;

    if !state
        .job_repository
        .delete_owned(user.user_id, job_id)
        .await?
    {
        return Err(AppError::NotFound("Saved job not found".to_string()));
    }

    Ok(Json(json!({ "success": true, "message": "Saved job removed" })))
}
