//! Route paths and redirect-target resolution.

pub const AUTHENTICATE_PATH: &str = "/auth/firebase/authenticate";
pub const LOGOUT_PATH: &str = "/auth/firebase/logout";
pub const ADMIN_INDEX_PATH: &str = "/admin/";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login/";
pub const HEALTH_PATH: &str = "/health";

const NAMED_ROUTES: &[(&str, &str)] = &[
    ("firebase_auth:authenticate", AUTHENTICATE_PATH),
    ("firebase_auth:logout", LOGOUT_PATH),
    ("admin:index", ADMIN_INDEX_PATH),
    ("admin:login", ADMIN_LOGIN_PATH),
];

/// Path of a named route.
pub fn reverse(name: &str) -> Option<&'static str> {
    NAMED_ROUTES.iter().find(|(n, _)| *n == name).map(|(_, path)| *path)
}

/// Resolve a route name to its path; anything else is returned unchanged.
pub fn resolve_url(target: &str) -> String {
    reverse(target).map(str::to_string).unwrap_or_else(|| target.to_string())
}

/// Whether `url` stays on this site.
///
/// Scheme-relative (`//host`) and backslash tricks (`/\host`) are rejected.
pub fn is_local_path(url: &str) -> bool {
    url.starts_with('/')
        && !url.starts_with("//")
        && !url.starts_with("/\\")
        && !url.chars().any(char::is_control)
}

/// Where to send the user after logging in.
///
/// A non-empty `next` wins when it resolves to a local path; otherwise the
/// configured default is used.
pub fn resolve_next(next: Option<&str>, default: &str) -> String {
    if let Some(next) = next.map(str::trim).filter(|n| !n.is_empty()) {
        let resolved = resolve_url(next);
        if is_local_path(&resolved) {
            return resolved;
        }
        tracing::warn!(next = %next, "ignoring non-local redirect target");
    }
    resolve_url(default)
}
