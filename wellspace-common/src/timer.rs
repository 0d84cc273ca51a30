//! Focus/break countdown state machine.
//!
//! The timer alternates between a 25-minute work phase and a 5-minute
//! break phase. Completing a work phase is the only event that earns
//! focus-minute credit; the credit itself is committed by the caller
//! (see the backend timer service), keeping this type free of IO.

use serde::{Deserialize, Serialize};

pub const WORK_DURATION_SECS: u32 = 25 * 60;
pub const BREAK_DURATION_SECS: u32 = 5 * 60;

/// Minutes credited for one completed work phase. Partial phases earn
/// nothing.
pub const FOCUS_CREDIT_MINUTES: u64 = (WORK_DURATION_SECS / 60) as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// What a single tick did, so the caller can commit side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing changed.
    Idle,
    /// One second elapsed within the current phase.
    Ticked,
    /// The work phase just completed; the timer now sits at a stopped
    /// break phase and the caller should credit focus minutes.
    WorkCompleted,
    /// The break phase just completed; no credit is earned.
    BreakCompleted,
}

/// Point-in-time view of the timer, for responses and event streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    phase: Phase,
    remaining_secs: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    /// A fresh timer: stopped work phase with the full duration ahead.
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: WORK_DURATION_SECS,
            running: false,
        }
    }

    /// No-op when already running. `running` implies `remaining_secs > 0`:
    /// a phase transition always lands on a stopped full phase.
    pub fn start(&mut self) {
        if !self.running && self.remaining_secs > 0 {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Unconditionally back to a stopped, full work phase. In-progress
    /// phases are discarded without credit.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Advance by one second. A tick that lands on zero flips the phase
    /// in the same instant and stops the timer; the remaining time never
    /// goes negative.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Ticked;
        }
        self.running = false;
        match self.phase {
            Phase::Work => {
                self.phase = Phase::Break;
                self.remaining_secs = BREAK_DURATION_SECS;
                TickOutcome::WorkCompleted
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.remaining_secs = WORK_DURATION_SECS;
                TickOutcome::BreakCompleted
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            running: self.running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut FocusTimer, n: u32) -> Vec<TickOutcome> {
        (0..n).map(|_| timer.tick()).collect()
    }

    #[test]
    fn new_timer_is_stopped_work_phase() {
        let timer = FocusTimer::new();
        let snap = timer.snapshot();

        assert_eq!(snap.phase, Phase::Work);
        assert_eq!(snap.remaining_secs, WORK_DURATION_SECS);
        assert!(!snap.running);
    }

    #[test]
    fn tick_without_start_does_nothing() {
        let mut timer = FocusTimer::new();

        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.snapshot().remaining_secs, WORK_DURATION_SECS);
    }

    #[test]
    fn full_work_phase_transitions_to_stopped_break() {
        let mut timer = FocusTimer::new();
        timer.start();

        let outcomes = run_ticks(&mut timer, WORK_DURATION_SECS);

        assert_eq!(outcomes[WORK_DURATION_SECS as usize - 1], TickOutcome::WorkCompleted);
        assert_eq!(
            outcomes.iter().filter(|o| **o == TickOutcome::WorkCompleted).count(),
            1
        );
        let snap = timer.snapshot();
        assert_eq!(snap.phase, Phase::Break);
        assert_eq!(snap.remaining_secs, BREAK_DURATION_SECS);
        assert!(!snap.running);
    }

    #[test]
    fn full_break_phase_returns_to_stopped_work() {
        let mut timer = FocusTimer::new();
        timer.start();
        run_ticks(&mut timer, WORK_DURATION_SECS);
        timer.start();

        let outcomes = run_ticks(&mut timer, BREAK_DURATION_SECS);

        assert_eq!(outcomes[BREAK_DURATION_SECS as usize - 1], TickOutcome::BreakCompleted);
        let snap = timer.snapshot();
        assert_eq!(snap.phase, Phase::Work);
        assert_eq!(snap.remaining_secs, WORK_DURATION_SECS);
        assert!(!snap.running);
    }

    #[test]
    fn pause_holds_remaining_time() {
        let mut timer = FocusTimer::new();
        timer.start();
        run_ticks(&mut timer, 10);
        timer.pause();

        assert_eq!(timer.tick(), TickOutcome::Idle);
        let snap = timer.snapshot();
        assert_eq!(snap.remaining_secs, WORK_DURATION_SECS - 10);
        assert_eq!(snap.phase, Phase::Work);
    }

    #[test]
    fn start_is_noop_while_running() {
        let mut timer = FocusTimer::new();
        timer.start();
        run_ticks(&mut timer, 5);
        timer.start();

        assert_eq!(timer.snapshot().remaining_secs, WORK_DURATION_SECS - 5);
    }

    #[test]
    fn reset_discards_progress_from_any_state() {
        let mut timer = FocusTimer::new();
        timer.start();
        run_ticks(&mut timer, WORK_DURATION_SECS);
        timer.start();
        run_ticks(&mut timer, 42);

        timer.reset();

        let snap = timer.snapshot();
        assert_eq!(snap.phase, Phase::Work);
        assert_eq!(snap.remaining_secs, WORK_DURATION_SECS);
        assert!(!snap.running);
    }

    #[test]
    fn work_completion_stops_timer_until_restarted() {
        let mut timer = FocusTimer::new();
        timer.start();
        run_ticks(&mut timer, WORK_DURATION_SECS);

        // Break does not run down on its own.
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.snapshot().remaining_secs, BREAK_DURATION_SECS);
    }
}
