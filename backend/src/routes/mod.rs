//! HTTP surface. Each feature contributes its own router; per-user
//! routes resolve the user from the session store and answer 401 when
//! nobody is logged in.

pub mod activity;
pub mod auth;
pub mod dashboard;
pub mod focus;
pub mod health;
pub mod routine;

use axum::http::StatusCode;

use wellspace_common::User;

use crate::AppState;

/// Resolve the active session's user, or fail the request with 401.
pub(crate) fn require_user(state: &AppState) -> Result<User, (StatusCode, String)> {
    match state.session.current() {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err((StatusCode::UNAUTHORIZED, "No active session".to_string())),
        Err(err) => Err(internal_error(err)),
    }
}

/// Map an unexpected error to a 500, logging the detail server-side.
pub(crate) fn internal_error<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}
