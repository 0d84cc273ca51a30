use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::activity::DashboardSnapshot;
use crate::routes::{internal_error, require_user};
use crate::AppState;

/// GET /dashboard - Aggregated wellness stats for the session's user.
async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let snapshot = state
        .activity
        .dashboard(&user.email)
        .map_err(internal_error)?;
    Ok(Json(snapshot))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/dashboard", get(dashboard)).with_state(state)
}
