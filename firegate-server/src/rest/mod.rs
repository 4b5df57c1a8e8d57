pub mod controllers;

pub use controllers::{AdminController, AuthController};

use crate::templates::Templates;
use crate::{ServerConfig, urls};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    routing::get,
};
use firegate_core::Result;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build CORS layer based on security configuration
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, config.account_verifier.header_name().clone()]);

    if config.security.allowed_origins.is_empty() {
        // Development mode: allow all origins
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> =
            config.security.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins).allow_credentials(true)
    }
}

/// Create the login application.
pub fn create_app(config: ServerConfig) -> Result<Router> {
    let templates = Arc::new(Templates::new()?);
    let auth_controller = AuthController::new(config.clone());
    let admin_controller = AdminController::new(config.clone(), templates);

    if config.security.allowed_origins.is_empty() {
        tracing::warn!("CORS allows any origin; set allowed_origins in production");
    }
    if !config.account_verifier.is_configured() {
        tracing::warn!("no Firebase project configured; token logins will be rejected");
    }

    let app = Router::new()
        .route(urls::HEALTH_PATH, get(controllers::auth::health_check))
        .route(
            urls::AUTHENTICATE_PATH,
            get(controllers::auth::authenticate).post(controllers::auth::authenticate),
        )
        .route(
            urls::LOGOUT_PATH,
            get(controllers::auth::logout).post(controllers::auth::logout),
        )
        .with_state(auth_controller)
        .route(
            urls::ADMIN_LOGIN_PATH,
            get(controllers::admin::login_page).post(controllers::admin::login_submit),
        )
        .route(urls::ADMIN_INDEX_PATH, get(controllers::admin::admin_index))
        .with_state(admin_controller);

    let cors_layer = build_cors_layer(&config);

    Ok(app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.security.request_timeout,
            ))
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
    ))
}
