use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityError;
use crate::catalog::{Workout, WorkoutCategory, WORKOUTS};
use crate::routes::{internal_error, require_user};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub steps: u64,
}

#[derive(Debug, Deserialize)]
pub struct SetStepsRequest {
    pub steps: u64,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutsQuery {
    /// Optional category filter; absent means the full catalog.
    pub category: Option<WorkoutCategory>,
}

#[derive(Debug, Serialize)]
pub struct WorkoutsResponse {
    pub workouts: Vec<Workout>,
    pub completed: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct CompletedWorkoutsResponse {
    pub completed: Vec<u32>,
}

/// GET /steps - The session user's current step count.
async fn get_steps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StepsResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let steps = state.activity.steps(&user.email).map_err(internal_error)?;
    Ok(Json(StepsResponse { steps }))
}

/// PUT /steps - Overwrite the step count with what the client reports.
async fn set_steps(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetStepsRequest>,
) -> Result<Json<StepsResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;
    state
        .activity
        .set_steps(&user.email, req.steps)
        .map_err(internal_error)?;
    Ok(Json(StepsResponse { steps: req.steps }))
}

/// GET /workouts - The catalog plus the user's completed ids.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WorkoutsQuery>,
) -> Result<Json<WorkoutsResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let workouts = WORKOUTS
        .iter()
        .filter(|w| query.category.map_or(true, |c| w.category == c))
        .copied()
        .collect();
    let completed = state
        .activity
        .completed_workouts(&user.email)
        .map_err(internal_error)?;

    Ok(Json(WorkoutsResponse { workouts, completed }))
}

/// POST /workouts/{id}/toggle - Flip one workout's done state.
async fn toggle_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<CompletedWorkoutsResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let completed = state
        .activity
        .toggle_workout(&user.email, id)
        .map_err(|err| match err {
            ActivityError::UnknownWorkout(_) => (StatusCode::NOT_FOUND, err.to_string()),
            other => internal_error(other),
        })?;

    Ok(Json(CompletedWorkoutsResponse { completed }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/steps", get(get_steps).put(set_steps))
        .route("/workouts", get(list_workouts))
        .route("/workouts/:id/toggle", post(toggle_workout))
        .with_state(state)
}
