use crate::templates::{AdminIndexContext, LoginPageContext, Templates};
use crate::{ServerConfig, login, urls};
use axum::{
    Form,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use firegate_telemetry::{Instrument, login_span, record_user};
use serde::Deserialize;
use std::sync::Arc;

const BAD_CREDENTIALS: &str = "Wrong email or password";
const NON_STAFF: &str = "To access admin panel, you must login as a staff member";
const EMPTY_EMAIL: &str = "Email field must be non-empty";
const EMPTY_PASSWORD: &str = "Password field must be non-empty";

#[derive(Clone)]
pub struct AdminController {
    config: ServerConfig,
    templates: Arc<Templates>,
}

impl AdminController {
    pub fn new(config: ServerConfig, templates: Arc<Templates>) -> Self {
        Self { config, templates }
    }

    fn next(&self, next: Option<&str>) -> String {
        urls::resolve_next(next, &self.config.firebase.admin_login_redirect_url)
    }

    fn render_login(&self, next: String, error: Option<&str>) -> Response {
        let firebase = &self.config.firebase;
        let ctx = LoginPageContext {
            firebase_web_api_key: firebase.web_api_key.clone(),
            firebase_auth_domain: firebase.auth_domain.clone(),
            enable_google_login: firebase.enable_google_login,
            jwt_header_name: firebase.jwt_header_name.clone(),
            firebase_auth_endpoint: urls::AUTHENTICATE_PATH.to_string(),
            login_redirect_url: next,
            error: error.map(str::to_string),
        };
        match self.templates.render_login(&ctx) {
            Ok(html) => Html(html).into_response(),
            Err(err) => internal_error(err),
        }
    }
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "admin request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub next: Option<String>,
}

/// Show the login form, or skip it for a staff user who is already logged in.
pub async fn login_page(
    State(controller): State<AdminController>,
    jar: CookieJar,
    query: Result<Query<NextQuery>, QueryRejection>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "ignoring unreadable login query");
        NextQuery::default()
    });
    let next = controller.next(query.next.as_deref());

    match login::current_user(&controller.config, &jar).await {
        Ok(Some(user)) if user.is_staff => Redirect::to(&next).into_response(),
        Ok(Some(_)) => controller.render_login(next, Some(NON_STAFF)),
        Ok(None) => controller.render_login(next, None),
        Err(err) => internal_error(err),
    }
}

/// Password login for local accounts.
///
/// A body that is not a readable form counts as one with every field empty.
pub async fn login_submit(
    State(controller): State<AdminController>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let form = form.map(|Form(f)| f).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "unreadable login form");
        LoginForm::default()
    });
    let next = controller.next(form.next.as_deref());

    let Some(email) = form.email.filter(|e| !e.is_empty()) else {
        return controller.render_login(next, Some(EMPTY_EMAIL));
    };
    let Some(password) = form.password.filter(|p| !p.is_empty()) else {
        return controller.render_login(next, Some(EMPTY_PASSWORD));
    };

    async move {
        let config = &controller.config;
        let user = match config.user_store.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!("password login for unknown email");
                return controller.render_login(next, Some(BAD_CREDENTIALS));
            }
            Err(err) => return internal_error(err),
        };

        if !user.is_active || !user.check_password(&password) {
            tracing::debug!(user.id = %user.id, "password login rejected");
            return controller.render_login(next, Some(BAD_CREDENTIALS));
        }
        record_user(&tracing::Span::current(), &user.id.to_string());

        let jar = match login::login(config, jar, &user, &config.firebase.auth_backend).await {
            Ok(jar) => jar,
            Err(err) => return internal_error(err),
        };

        if user.is_staff {
            (jar, Redirect::to(&next)).into_response()
        } else {
            (jar, controller.render_login(next, Some(NON_STAFF))).into_response()
        }
    }
    .instrument(login_span("password"))
    .await
}

/// Staff-only landing page.
pub async fn admin_index(State(controller): State<AdminController>, jar: CookieJar) -> Response {
    match login::current_user(&controller.config, &jar).await {
        Ok(Some(user)) if user.is_staff => {
            let ctx = AdminIndexContext {
                username: user.username,
                email: user.email,
                logout_endpoint: urls::LOGOUT_PATH.to_string(),
            };
            match controller.templates.render_admin_index(&ctx) {
                Ok(html) => Html(html).into_response(),
                Err(err) => internal_error(err),
            }
        }
        Ok(_) => Redirect::to(&format!(
            "{}?next={}",
            urls::ADMIN_LOGIN_PATH,
            urls::ADMIN_INDEX_PATH
        ))
        .into_response(),
        Err(err) => internal_error(err),
    }
}
