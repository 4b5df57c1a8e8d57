//! Span helpers for login flows

use tracing::Span;

/// Span around one login attempt.
///
/// # Example
/// ```
/// use firegate_telemetry::login_span;
/// let span = login_span("firebase");
/// let _enter = span.enter();
/// ```
pub fn login_span(method: &str) -> Span {
    tracing::info_span!("auth.login", auth.method = method, user.id = tracing::field::Empty)
}

/// Record the resolved user on the current login span.
pub fn record_user(span: &Span, user_id: &str) {
    span.record("user.id", user_id);
}
