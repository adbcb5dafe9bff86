use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::config::session::SessionConfig;
use crate::error::AppError;

/// The authenticated identity carried by the encrypted session cookie.
///
/// This is the only session state the server knows about; there are no
/// session rows to look up or expire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
}

/// Serializes the session user into the private cookie jar.
///
/// The jar encrypts and authenticates the value; tampering or a wrong key
/// makes the cookie unreadable, which `read_session` treats as "no session".
pub fn create_session(
    jar: PrivateCookieJar,
    config: &SessionConfig,
    user: &SessionUser,
) -> PrivateCookieJar {
    let value = serde_json::to_string(user).unwrap_or_default();

    let cookie = Cookie::build((config.name.clone(), value))
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(config.max_age)
        .build();

    jar.add(cookie)
}

/// Reads the session from the jar. A missing, expired, or undecryptable
/// cookie is not an error; it degrades to `None` and callers decide whether
/// that means 401.
pub fn read_session(jar: &PrivateCookieJar, config: &SessionConfig) -> Option<SessionUser> {
    let cookie = jar.get(&config.name)?;
    serde_json::from_str(cookie.value()).ok()
}

/// Maps an absent session to `Unauthorized`. Every protected handler calls
/// this itself rather than relying on router middleware, so no operation can
/// be reached with an unchecked session.
pub fn require_session(
    jar: &PrivateCookieJar,
    config: &SessionConfig,
) -> Result<SessionUser, AppError> {
    read_session(jar, config).ok_or(AppError::Unauthorized)
}

/// Clears the session cookie.
pub fn destroy_session(jar: PrivateCookieJar, config: &SessionConfig) -> PrivateCookieJar {
    let removal = Cookie::build((config.name.clone(), ""))
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .build();
    jar.remove(removal)
}
