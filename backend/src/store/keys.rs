//! Persisted key layout.
//!
//! Global keys are fixed strings; per-user keys follow the
//! `{email}_{feature}` convention.

/// Array of credential records.
pub const USERS: &str = "wellspace_users";
/// The active session's public user projection.
pub const CURRENT_USER: &str = "wellspace_currentUser";

pub const STEPS: &str = "steps";
pub const ROUTINE_PLAN: &str = "routinePlan";
pub const COMPLETED_DAYS: &str = "completedDays";
pub const COMPLETED_WORKOUTS: &str = "completedWorkouts";
pub const FOCUS_MINUTES: &str = "focusMinutes";
pub const SLEEP_SESSIONS: &str = "sleepSessions";

pub fn user_key(email: &str, feature: &str) -> String {
    format!("{email}_{feature}")
}
