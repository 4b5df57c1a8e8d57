#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use firegate_auth::FirebaseAuthConfig;
use firegate_auth::firebase::{FirebaseClaims, TokenError, TokenValidator};
use firegate_core::{InMemoryUserStore, NewUser, User, UserStore, password};
use firegate_server::{CookieConfig, ServerConfig, create_app};
use firegate_session::InMemorySessionService;
use http_body_util::BodyExt;
use std::sync::Arc;

pub const STAFF_EMAIL: &str = "staff@example.com";
pub const MEMBER_EMAIL: &str = "member@example.com";
pub const PASSWORD: &str = "correct horse battery staple";

/// Maps fixed token strings to outcomes.
pub struct StubValidator;

#[async_trait]
impl TokenValidator for StubValidator {
    async fn validate(&self, token: &str) -> Result<FirebaseClaims, TokenError> {
        let claims = |sub: &str, email: &str, verified: bool| FirebaseClaims {
            sub: sub.into(),
            email: Some(email.into()),
            email_verified: Some(verified),
            ..Default::default()
        };
        match token {
            "staff-token" => Ok(claims("uid-staff", STAFF_EMAIL, true)),
            "stranger-token" => Ok(claims("uid-stranger", "stranger@example.com", true)),
            "unverified-token" => Ok(claims("uid-staff", STAFF_EMAIL, false)),
            "expired-token" => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid("malformed".into())),
        }
    }

    fn issuer(&self) -> &str {
        "https://securetoken.google.com/firegate-test"
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
    pub sessions: Arc<InMemorySessionService>,
    pub staff: User,
    pub member: User,
}

pub async fn test_app(firebase: FirebaseAuthConfig) -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = Arc::new(InMemorySessionService::new());

    let hash = password::hash_password(PASSWORD).unwrap();
    let staff = users
        .create(NewUser::new("staff").email(STAFF_EMAIL).staff(true).password_hash(hash.clone()))
        .await
        .unwrap();
    let member =
        users.create(NewUser::new("member").email(MEMBER_EMAIL).password_hash(hash)).await.unwrap();

    let config = ServerConfig::new(
        FirebaseAuthConfig { web_api_key: Some("web-key".into()), ..firebase },
        Some(Arc::new(StubValidator)),
        users.clone(),
        sessions.clone(),
    )
    .unwrap()
    .with_cookie_config(CookieConfig::development());

    TestApp { router: create_app(config).unwrap(), users, sessions, staff, member }
}

/// `name=value` of the session cookie set by the response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with("firegate_session="))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .find(|pair| pair != "firegate_session=")
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn token_request(method: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/auth/firebase/authenticate");
    if let Some(token) = token {
        builder = builder.header("X-Firebase-Jwt", token);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn login_form(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/admin/login/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}
