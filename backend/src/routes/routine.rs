use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use wellspace_common::RoutineDay;

use crate::routes::{internal_error, require_user};
use crate::routine::RoutineError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub free_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct RoutineResponse {
    /// `None` when no plan has been generated yet.
    pub plan: Option<Vec<RoutineDay>>,
    pub completed_days: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct CompletedDaysResponse {
    pub completed_days: Vec<u32>,
}

fn map_routine_error(err: RoutineError) -> (StatusCode, String) {
    match err {
        RoutineError::InvalidFreeMinutes => (StatusCode::BAD_REQUEST, err.to_string()),
        RoutineError::GenerationInFlight => (StatusCode::CONFLICT, err.to_string()),
        RoutineError::Store(_) => internal_error(err),
    }
}

/// GET /routine - The persisted plan and completion state.
async fn get_routine(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoutineResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let plan = state.routine.plan(&user.email).map_err(map_routine_error)?;
    let completed_days = state
        .routine
        .completed_days(&user.email)
        .map_err(map_routine_error)?;

    Ok(Json(RoutineResponse {
        plan,
        completed_days,
    }))
}

/// POST /routine/generate - Generate and persist a fresh plan.
///
/// A generation failure is not an error here: the fallback plan comes
/// back with a 200 like any other result.
async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GeneratePlanRequest>,
) -> Result<Json<Vec<RoutineDay>>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let plan = state
        .routine
        .generate_plan(&user.email, req.free_minutes)
        .await
        .map_err(map_routine_error)?;

    Ok(Json(plan))
}

/// POST /routine/days/{day}/toggle - Flip one day's completion state.
async fn toggle_day(
    State(state): State<Arc<AppState>>,
    Path(day): Path<u32>,
) -> Result<Json<CompletedDaysResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let completed_days = state
        .routine
        .toggle_day(&user.email, day)
        .map_err(map_routine_error)?;

    Ok(Json(CompletedDaysResponse { completed_days }))
}

/// DELETE /routine - Drop the plan and its completion state.
async fn clear(State(state): State<Arc<AppState>>) -> Result<StatusCode, (StatusCode, String)> {
    let user = require_user(&state)?;

    state
        .routine
        .clear_plan(&user.email)
        .map_err(map_routine_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routine", get(get_routine).delete(clear))
        .route("/routine/generate", post(generate))
        .route("/routine/days/:day/toggle", post(toggle_day))
        .with_state(state)
}
