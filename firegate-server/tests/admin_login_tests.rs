mod common;

use axum::http::{StatusCode, header};
use common::*;
use firegate_auth::FirebaseAuthConfig;
use tower::ServiceExt;

const NON_STAFF: &str = "To access admin panel, you must login as a staff member";
const BAD_CREDENTIALS: &str = "Wrong email or password";

fn form(email: &str, password: &str, next: &str) -> String {
    let mut body = format!("email={email}&password={password}");
    if !next.is_empty() {
        body.push_str(&format!("&next={next}"));
    }
    body
}

fn location(response: &axum::http::Response<axum::body::Body>) -> &str {
    response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

const PASSWORD_ENCODED: &str = "correct+horse+battery+staple";

#[tokio::test]
async fn test_login_page_renders() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app.router.oneshot(get("/admin/login/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"data-api-key="web-key""#));
    assert!(html.contains(r#"data-endpoint="/auth/firebase/authenticate""#));
    assert!(html.contains(r#"name="next" value="/admin/""#));
    assert!(!html.contains("class=\"errornote\""));
}

#[tokio::test]
async fn test_login_page_resolves_next() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let html = body_string(
        app.router.clone().oneshot(get("/admin/login/?next=/reports/", None)).await.unwrap(),
    )
    .await;
    assert!(html.contains(r#"name="next" value="/reports/""#));

    let html = body_string(
        app.router.oneshot(get("/admin/login/?next=https://evil.example/", None)).await.unwrap(),
    )
    .await;
    assert!(html.contains(r#"name="next" value="/admin/""#));
}

#[tokio::test]
async fn test_staff_login_redirects_to_next() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .clone()
        .oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, "/reports/"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/reports/");
    let cookie = session_cookie(&response).expect("session cookie");

    let response = app.router.oneshot(get("/admin/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_staff_login_default_redirect() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response =
        app.router.oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, ""), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/");
}

#[tokio::test]
async fn test_staff_login_named_next() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, "admin:index"), None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/admin/");
}

#[tokio::test]
async fn test_non_staff_login_is_refused_admin() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .clone()
        .oneshot(login_form(&form(MEMBER_EMAIL, PASSWORD_ENCODED, ""), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response).expect("session cookie");
    assert!(body_string(response).await.contains(NON_STAFF));

    let response = app.router.clone().oneshot(get("/admin/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login/?next=/admin/");

    let response = app.router.oneshot(get("/admin/login/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(NON_STAFF));
}

#[tokio::test]
async fn test_wrong_password() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response =
        app.router.oneshot(login_form(&form(STAFF_EMAIL, "nope", ""), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_string(response).await.contains(BAD_CREDENTIALS));
}

#[tokio::test]
async fn test_unknown_email() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .oneshot(login_form(&form("ghost@example.com", PASSWORD_ENCODED, ""), None))
        .await
        .unwrap();
    assert!(body_string(response).await.contains(BAD_CREDENTIALS));
}

#[tokio::test]
async fn test_empty_fields() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response =
        app.router.clone().oneshot(login_form("email=&password=x", None)).await.unwrap();
    assert!(body_string(response).await.contains("Email field must be non-empty"));

    let response = app.router.oneshot(login_form(&form(STAFF_EMAIL, "", ""), None)).await.unwrap();
    assert!(body_string(response).await.contains("Password field must be non-empty"));
}

#[tokio::test]
async fn test_logged_in_staff_skips_form() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .clone()
        .oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, ""), None))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();

    let response =
        app.router.oneshot(get("/admin/login/?next=/reports/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/reports/");
}

#[tokio::test]
async fn test_login_rotates_session() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let first = app
        .router
        .clone()
        .oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, ""), None))
        .await
        .unwrap();
    let first = session_cookie(&first).unwrap();

    let second = app
        .router
        .clone()
        .oneshot(login_form(&form(STAFF_EMAIL, PASSWORD_ENCODED, ""), Some(&first)))
        .await
        .unwrap();
    let second = session_cookie(&second).unwrap();
    assert_ne!(first, second);

    let response = app.router.oneshot(get("/admin/", Some(&first))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_anonymous_admin_redirects_to_login() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app.router.oneshot(get("/admin/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/login/?next=/admin/");
}

#[tokio::test]
async fn test_post_without_form_body_rerenders_form() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app
        .router
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/admin/login/")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_string(response).await.contains("Email field must be non-empty"));
}

#[tokio::test]
async fn test_repeated_next_in_query_falls_back_to_default() {
    let app = test_app(FirebaseAuthConfig::default()).await;
    let response = app.router.oneshot(get("/admin/login/?next=/a&next=/b", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(r#"name="next" value="/admin/""#));
}
