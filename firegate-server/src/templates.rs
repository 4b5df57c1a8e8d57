//! HTML pages.

use firegate_core::{FiregateError, Result};
use handlebars::Handlebars;
use serde::Serialize;

const LOGIN_TEMPLATE: &str = "login";
const ADMIN_INDEX_TEMPLATE: &str = "admin_index";

/// Values the login page needs to drive the Firebase JS SDK and the password form.
#[derive(Debug, Clone, Serialize)]
pub struct LoginPageContext {
    pub firebase_web_api_key: Option<String>,
    pub firebase_auth_domain: Option<String>,
    pub enable_google_login: bool,
    pub jwt_header_name: String,
    pub firebase_auth_endpoint: String,
    pub login_redirect_url: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminIndexContext {
    pub username: String,
    pub email: Option<String>,
    pub logout_endpoint: String,
}

/// Compiled page templates.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(LOGIN_TEMPLATE, include_str!("../templates/login.html"))
            .map_err(|e| FiregateError::Template(e.to_string()))?;
        registry
            .register_template_string(
                ADMIN_INDEX_TEMPLATE,
                include_str!("../templates/admin_index.html"),
            )
            .map_err(|e| FiregateError::Template(e.to_string()))?;
        Ok(Self { registry })
    }

    pub fn render_login(&self, ctx: &LoginPageContext) -> Result<String> {
        self.registry
            .render(LOGIN_TEMPLATE, ctx)
            .map_err(|e| FiregateError::Template(e.to_string()))
    }

    pub fn render_admin_index(&self, ctx: &AdminIndexContext) -> Result<String> {
        self.registry
            .render(ADMIN_INDEX_TEMPLATE, ctx)
            .map_err(|e| FiregateError::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_ctx(error: Option<&str>) -> LoginPageContext {
        LoginPageContext {
            firebase_web_api_key: Some("web-key".into()),
            firebase_auth_domain: Some("demo.firebaseapp.com".into()),
            enable_google_login: true,
            jwt_header_name: "X-Firebase-Jwt".into(),
            firebase_auth_endpoint: "/auth/firebase/authenticate".into(),
            login_redirect_url: "/admin/".into(),
            error: error.map(Into::into),
        }
    }

    #[test]
    fn test_render_login() {
        let templates = Templates::new().unwrap();
        let html = templates.render_login(&login_ctx(None)).unwrap();

        assert!(html.contains(r#"data-api-key="web-key""#));
        assert!(html.contains(r#"data-header-name="X-Firebase-Jwt""#));
        assert!(html.contains(r#"name="next" value="/admin/""#));
        assert!(html.contains("google-login"));
        assert!(!html.contains("class=\"errornote\""));
    }

    #[test]
    fn test_render_login_escapes_error() {
        let templates = Templates::new().unwrap();
        let html = templates.render_login(&login_ctx(Some("<script>x</script>"))).unwrap();

        assert!(html.contains("class=\"errornote\""));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x</script>"));
    }

    #[test]
    fn test_render_admin_index() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render_admin_index(&AdminIndexContext {
                username: "staff@example.com".into(),
                email: Some("staff@example.com".into()),
                logout_endpoint: "/auth/firebase/logout".into(),
            })
            .unwrap();
        assert!(html.contains("staff@example.com"));
        assert!(html.contains("/auth/firebase/logout"));
    }
}
