//! Per-user activity state: steps, completed workouts, sleep-sound
//! plays, and the aggregated dashboard snapshot.

use std::sync::Arc;

use serde::Serialize;

use wellspace_common::PLAN_LENGTH_DAYS;

use crate::catalog;
use crate::store::{keys, KvStore, StoreError};

pub struct ActivityService {
    store: Arc<KvStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Unknown workout id: {0}")]
    UnknownWorkout(u32),
    #[error("Unknown sleep sound id: {0}")]
    UnknownSound(u32),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Aggregated per-user stats, shaped like the original dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub current_steps: u64,
    /// Number of completed routine days (out of 21).
    pub routine_progress: usize,
    pub completed_workouts: usize,
    /// Focus minutes rendered as hours with one decimal, e.g. "1.5".
    pub focus_hours: String,
    pub sleep_sessions: u64,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

impl ActivityService {
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    pub fn steps(&self, email: &str) -> Result<u64, StoreError> {
        self.store.counter(&keys::user_key(email, keys::STEPS))
    }

    pub fn set_steps(&self, email: &str, steps: u64) -> Result<(), StoreError> {
        self.store
            .set_counter(&keys::user_key(email, keys::STEPS), steps)
    }

    pub fn completed_workouts(&self, email: &str) -> Result<Vec<u32>, StoreError> {
        Ok(self
            .store
            .get_json(&keys::user_key(email, keys::COMPLETED_WORKOUTS))?
            .unwrap_or_default())
    }

    /// Flip a workout's done state and return the new id set.
    pub fn toggle_workout(&self, email: &str, id: u32) -> Result<Vec<u32>, ActivityError> {
        if catalog::workout(id).is_none() {
            return Err(ActivityError::UnknownWorkout(id));
        }

        let key = keys::user_key(email, keys::COMPLETED_WORKOUTS);
        let mut completed: Vec<u32> = self.store.get_json(&key)?.unwrap_or_default();

        match completed.iter().position(|w| *w == id) {
            Some(idx) => {
                completed.remove(idx);
            }
            None => completed.push(id),
        }

        self.store.set_json(&key, &completed)?;
        Ok(completed)
    }

    /// Count a sound-play action. Every play increments, including
    /// restarting the same track; nothing ever decrements, so this is a
    /// count of play actions rather than unique sessions.
    pub fn record_sound_play(&self, email: &str, sound_id: u32) -> Result<u64, ActivityError> {
        if catalog::sleep_sound(sound_id).is_none() {
            return Err(ActivityError::UnknownSound(sound_id));
        }

        Ok(self
            .store
            .increment_counter(&keys::user_key(email, keys::SLEEP_SESSIONS), 1)?)
    }

    pub fn dashboard(&self, email: &str) -> Result<DashboardSnapshot, StoreError> {
        let current_steps = self.steps(email)?;
        let routine_progress = self
            .store
            .get_json::<Vec<u32>>(&keys::user_key(email, keys::COMPLETED_DAYS))?
            .unwrap_or_default()
            .len();
        let completed_workouts = self
            .store
            .get_json::<Vec<u32>>(&keys::user_key(email, keys::COMPLETED_WORKOUTS))?
            .unwrap_or_default()
            .len();
        let focus_minutes = self
            .store
            .counter(&keys::user_key(email, keys::FOCUS_MINUTES))?;
        let sleep_sessions = self
            .store
            .counter(&keys::user_key(email, keys::SLEEP_SESSIONS))?;

        Ok(DashboardSnapshot {
            current_steps,
            routine_progress,
            completed_workouts,
            focus_hours: format!("{:.1}", focus_minutes as f64 / 60.0),
            sleep_sessions,
            badges: badges(sleep_sessions, routine_progress),
        })
    }
}

fn badges(sleep_sessions: u64, routine_progress: usize) -> Vec<Badge> {
    // Early Bird and Active Bee have no unlock tracking yet.
    vec![
        Badge {
            name: "Early Bird",
            description: "Woke up early for 7 days!",
            unlocked: false,
        },
        Badge {
            name: "Zen Master",
            description: "Completed 10 meditation sessions.",
            unlocked: sleep_sessions >= 10,
        },
        Badge {
            name: "Active Bee",
            description: "Walked 50,000 steps in a week.",
            unlocked: false,
        },
        Badge {
            name: "Routine Rockstar",
            description: "Completed a 21-day plan.",
            unlocked: routine_progress >= PLAN_LENGTH_DAYS as usize,
        },
    ]
}
