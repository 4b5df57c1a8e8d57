//! Establishing, ending and reading login sessions.

use crate::{ServerConfig, cookie};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use firegate_core::{Result, User};
use firegate_session::{CreateRequest, DeleteRequest, GetRequest};
use uuid::Uuid;

/// Start a session for `user` and attach its cookie.
///
/// Any session the request already carried is ended first, so a login
/// always issues a fresh session id.
pub async fn login(config: &ServerConfig, jar: CookieJar, user: &User, backend: &str) -> Result<CookieJar> {
    if let Some(previous) = cookie::session_id(&jar, &config.cookie) {
        config.session_service.delete(DeleteRequest { session_id: previous }).await?;
    }

    let session = config
        .session_service
        .create(CreateRequest { user_id: user.id.to_string(), backend: backend.to_string() })
        .await?;

    tracing::info!(user.id = %user.id, backend = %backend, "user logged in");

    let max_age = (session.expires_at - Utc::now()).num_seconds();
    Ok(jar.add(cookie::session_cookie(session.id, max_age, &config.cookie)))
}

/// End the request's session, if any, and clear the cookie.
pub async fn logout(config: &ServerConfig, jar: CookieJar) -> Result<CookieJar> {
    if let Some(session_id) = cookie::session_id(&jar, &config.cookie) {
        config.session_service.delete(DeleteRequest { session_id }).await?;
        tracing::info!("user logged out");
    }
    Ok(cookie::clear_session_cookie(jar, &config.cookie))
}

/// The active user behind the request's session cookie.
///
/// Unknown or expired sessions, deleted users and deactivated users all
/// read as anonymous.
pub async fn current_user(config: &ServerConfig, jar: &CookieJar) -> Result<Option<User>> {
    let Some(session_id) = cookie::session_id(jar, &config.cookie) else {
        return Ok(None);
    };
    let Some(session) = config.session_service.get(GetRequest { session_id }).await? else {
        return Ok(None);
    };
    let Ok(user_id) = Uuid::parse_str(&session.user_id) else {
        tracing::warn!(user.id = %session.user_id, "session references a malformed user id");
        return Ok(None);
    };

    Ok(config.user_store.get(user_id).await?.filter(|u| u.is_active))
}
