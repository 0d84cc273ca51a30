use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use wellspace_common::User;

use crate::auth::AuthError;
use crate::routes::{internal_error, require_user};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn map_auth_error(err: AuthError) -> (StatusCode, String) {
    match err {
        AuthError::AlreadyExists => (StatusCode::CONFLICT, err.to_string()),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        AuthError::Hash(_) | AuthError::Store(_) => internal_error(err),
    }
}

/// POST /auth/signup - Create an account and open a session for it.
async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<User>), (StatusCode, String)> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "name, email and password are required".to_string(),
        ));
    }

    let user = state
        .credentials
        .sign_up(name, email, &req.password)
        .map_err(map_auth_error)?;

    state.session.set_current(&user).map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login - Open a session for an existing account.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = state
        .credentials
        .login(req.email.trim(), &req.password)
        .map_err(map_auth_error)?;

    state.session.set_current(&user).map_err(internal_error)?;

    Ok(Json(user))
}

/// POST /auth/logout - Clear the active session, if any.
async fn logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, (StatusCode, String)> {
    state.session.clear().map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - The active session's user.
async fn me(State(state): State<Arc<AppState>>) -> Result<Json<User>, (StatusCode, String)> {
    let user = require_user(&state)?;
    Ok(Json(user))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .with_state(state)
}
