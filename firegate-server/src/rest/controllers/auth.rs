use crate::{ServerConfig, login};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use firegate_auth::{AuthError, UserLookupError};
use firegate_telemetry::{Instrument, login_span, record_user};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AuthController {
    config: ServerConfig,
}

impl AuthController {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }
}

/// `{"status": "ok"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

fn auth_error_response(status: StatusCode, err: AuthError) -> Response {
    (status, Json(err.response_body())).into_response()
}

/// Exchange a Firebase ID token for a session.
pub async fn authenticate(
    State(controller): State<AuthController>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let span = login_span("firebase");
    let config = &controller.config;

    async move {
        let claims = match config.account_verifier.verify(&headers).await {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!(error = err.code(), "firebase login rejected");
                return auth_error_response(StatusCode::UNAUTHORIZED, err);
            }
        };

        let user = match config.user_getter.get_or_create_user(&claims).await {
            Ok(user) => user,
            Err(UserLookupError::NotFound) => {
                tracing::debug!(uid = %claims.uid(), "no local user for firebase identity");
                return auth_error_response(StatusCode::UNAUTHORIZED, AuthError::UserNotRegistered);
            }
            Err(UserLookupError::Store(err)) => {
                tracing::error!(error = %err, "user lookup failed");
                return auth_error_response(StatusCode::INTERNAL_SERVER_ERROR, AuthError::Other);
            }
        };
        record_user(&tracing::Span::current(), &user.id.to_string());

        match login::login(config, jar, &user, &config.firebase.auth_backend).await {
            Ok(jar) => (jar, Json(StatusBody::ok())).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to establish session");
                auth_error_response(StatusCode::INTERNAL_SERVER_ERROR, AuthError::Other)
            }
        }
    }
    .instrument(span)
    .await
}

/// End the current session. Always succeeds for the client.
pub async fn logout(State(controller): State<AuthController>, jar: CookieJar) -> Response {
    match login::logout(&controller.config, jar).await {
        Ok(jar) => (jar, Json(StatusBody::ok())).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to end session");
            auth_error_response(StatusCode::INTERNAL_SERVER_ERROR, AuthError::Other)
        }
    }
}

pub async fn health_check() -> Json<StatusBody> {
    Json(StatusBody::ok())
}
