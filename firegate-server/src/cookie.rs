//! Session cookie handling.

use crate::CookieConfig;
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Build the session cookie. `max_age_secs` follows the server-side session TTL.
pub fn session_cookie(session_id: String, max_age_secs: i64, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((config.name.clone(), session_id))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(time::Duration::seconds(max_age_secs.max(0)))
        .build();

    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}

/// Remove the session cookie from the browser.
pub fn clear_session_cookie(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    let mut cookie = Cookie::build((config.name.clone(), "")).path(config.path.clone()).build();
    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }
    jar.remove(cookie)
}

/// The session id carried by the request, if any.
pub fn session_id(jar: &CookieJar, config: &CookieConfig) -> Option<String> {
    jar.get(&config.name).map(|c| c.value().to_string()).filter(|v| !v.is_empty())
}
