use crate::auth::session::{create_session, destroy_session, read_session, SessionUser};
use crate::error::AppError;
use crate::services::auth_service::LoginRequest;
use crate::services::user_service::CreateUserRequest;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// POST /auth/signup. Creates the account and signs the user in, in one
/// step. The session cookie rides on the 201 response.
pub async fn signup(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<SignupBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .user_service
        .create_user(CreateUserRequest {
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;

    let session_user = SessionUser {
        user_id: user.id,
        email: user.email.clone(),
    };
    let jar = create_session(jar, &state.session_config, &session_user);

    tracing::info!("New user registered: {}", user.email);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(json!({
            "success": true,
            "user": { "id": user.id, "email": user.email },
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .auth_service
        .authenticate(LoginRequest {
            email: body.email,
            password: body.password,
        })
        .await?;

    let session_user = SessionUser {
        user_id: user.id,
        email: user.email.clone(),
    };
    let jar = create_session(jar, &state.session_config, &session_user);

    Ok((
        jar,
        Json(json!({
            "success": true,
            "user": { "id": user.id, "email": user.email },
        })),
    ))
}

/// POST /auth/logout. Always succeeds, signed in or not.
pub async fn logout(State(state): State<AppState>, jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = destroy_session(jar, &state.session_config);
    (jar, Json(json!({ "success": true })))
}

/// GET /auth/session. 200 either way; `isAuthenticated` tells the client
/// which case it is.
pub async fn session(State(state): State<AppState>, jar: PrivateCookieJar) -> impl IntoResponse {
    match read_session(&jar, &state.session_config) {
        Some(user) => Json(json!({
            "success": true,
            "isAuthenticated": true,
            "user": user,
        })),
        None => Json(json!({
            "success": true,
            "isAuthenticated": false,
            "user": null,
        })),
    }
}
