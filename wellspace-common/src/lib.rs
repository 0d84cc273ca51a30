//! WellSpace Common Types
//!
//! Shared domain types used by the backend: user identity, routine plans
//! and the focus/break timer state machine. Everything here is pure logic
//! with no IO.

pub mod routine;
pub mod timer;
pub mod user;

pub use routine::{fallback_plan, normalize_plan, RoutineDay, PLAN_LENGTH_DAYS};
pub use timer::{
    FocusTimer, Phase, TickOutcome, TimerSnapshot, BREAK_DURATION_SECS, FOCUS_CREDIT_MINUTES,
    WORK_DURATION_SECS,
};
pub use user::User;
