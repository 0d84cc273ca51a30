use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tokio_stream::{wrappers::WatchStream, Stream, StreamExt};

use wellspace_common::TimerSnapshot;

use crate::activity::ActivityError;
use crate::catalog::{SleepSound, SLEEP_SOUNDS};
use crate::focus::FocusError;
use crate::routes::{internal_error, require_user};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SoundsResponse {
    pub sounds: Vec<SleepSound>,
}

#[derive(Debug, Serialize)]
pub struct SoundPlayResponse {
    pub sleep_sessions: u64,
}

fn map_focus_error(err: FocusError) -> (StatusCode, String) {
    internal_error(err)
}

/// GET /focus/timer - Current timer snapshot for the session's user.
async fn timer_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSnapshot>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let snapshot = state.timer.snapshot(&user.email).map_err(map_focus_error)?;
    Ok(Json(snapshot))
}

/// POST /focus/timer/start
async fn timer_start(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSnapshot>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let snapshot = state.timer.start(&user.email).map_err(map_focus_error)?;
    Ok(Json(snapshot))
}

/// POST /focus/timer/pause
async fn timer_pause(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSnapshot>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let snapshot = state.timer.pause(&user.email).map_err(map_focus_error)?;
    Ok(Json(snapshot))
}

/// POST /focus/timer/reset
async fn timer_reset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSnapshot>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let snapshot = state.timer.reset(&user.email).map_err(map_focus_error)?;
    Ok(Json(snapshot))
}

/// GET /focus/timer/events - SSE stream of timer snapshots.
async fn timer_events(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, (StatusCode, String)> {
    let user = require_user(&state)?;
    let receiver = state.timer.subscribe(&user.email).map_err(map_focus_error)?;

    let stream = WatchStream::new(receiver).map(|snapshot| {
        let event = Event::default()
            .json_data(&snapshot)
            .unwrap_or_else(|_| Event::default().data("{}"));
        Ok(event)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// GET /focus/sounds - The fixed sleep sound catalog.
async fn sounds() -> Json<SoundsResponse> {
    Json(SoundsResponse {
        sounds: SLEEP_SOUNDS.to_vec(),
    })
}

/// POST /focus/sounds/{id}/play - Count one play action.
async fn play_sound(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<SoundPlayResponse>, (StatusCode, String)> {
    let user = require_user(&state)?;

    let sleep_sessions = state
        .activity
        .record_sound_play(&user.email, id)
        .map_err(|err| match err {
            ActivityError::UnknownSound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            other => internal_error(other),
        })?;

    Ok(Json(SoundPlayResponse { sleep_sessions }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/focus/timer", get(timer_snapshot))
        .route("/focus/timer/start", post(timer_start))
        .route("/focus/timer/pause", post(timer_pause))
        .route("/focus/timer/reset", post(timer_reset))
        .route("/focus/timer/events", get(timer_events))
        .route("/focus/sounds", get(sounds))
        .route("/focus/sounds/:id/play", post(play_sound))
        .with_state(state)
}
