//! Focus timer service.
//!
//! Owns one [`FocusTimer`] per user and drives them from a single
//! one-second interval task, decoupled from any client lifecycle.
//! Completing a work phase credits the user's persisted focus minutes;
//! every state change is published on a per-user watch channel so
//! clients subscribe instead of polling.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;

use wellspace_common::{FocusTimer, TickOutcome, TimerSnapshot, FOCUS_CREDIT_MINUTES};

use crate::store::{keys, KvStore, StoreError};

pub struct TimerService {
    store: Arc<KvStore>,
    timers: Mutex<HashMap<String, UserTimer>>,
}

struct UserTimer {
    timer: FocusTimer,
    events: watch::Sender<TimerSnapshot>,
}

impl UserTimer {
    fn new() -> Self {
        let timer = FocusTimer::new();
        let (events, _) = watch::channel(timer.snapshot());
        Self { timer, events }
    }

    fn publish(&self) {
        // Send only fails with no receivers; the next subscriber gets
        // the latest snapshot from the channel anyway.
        let _ = self.events.send(self.timer.snapshot());
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("Timer state unavailable: {0}")]
    Internal(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TimerService {
    pub fn new(store: Arc<KvStore>) -> Self {
        Self {
            store,
            timers: Mutex::new(HashMap::new()),
        }
    }

    fn with_timer<R>(
        &self,
        email: &str,
        f: impl FnOnce(&mut UserTimer) -> R,
    ) -> Result<R, FocusError> {
        let mut timers = self
            .timers
            .lock()
            .map_err(|e| FocusError::Internal(e.to_string()))?;
        let entry = timers
            .entry(email.to_string())
            .or_insert_with(UserTimer::new);
        Ok(f(entry))
    }

    pub fn snapshot(&self, email: &str) -> Result<TimerSnapshot, FocusError> {
        self.with_timer(email, |entry| entry.timer.snapshot())
    }

    pub fn start(&self, email: &str) -> Result<TimerSnapshot, FocusError> {
        self.with_timer(email, |entry| {
            entry.timer.start();
            entry.publish();
            entry.timer.snapshot()
        })
    }

    pub fn pause(&self, email: &str) -> Result<TimerSnapshot, FocusError> {
        self.with_timer(email, |entry| {
            entry.timer.pause();
            entry.publish();
            entry.timer.snapshot()
        })
    }

    /// Discards the in-progress phase without crediting partial work.
    pub fn reset(&self, email: &str) -> Result<TimerSnapshot, FocusError> {
        self.with_timer(email, |entry| {
            entry.timer.reset();
            entry.publish();
            entry.timer.snapshot()
        })
    }

    /// Subscribe to snapshot updates for `email`, creating the timer if
    /// it does not exist yet.
    pub fn subscribe(&self, email: &str) -> Result<watch::Receiver<TimerSnapshot>, FocusError> {
        self.with_timer(email, |entry| entry.events.subscribe())
    }

    /// Advance every running timer by one second, committing focus
    /// credit for work phases completed by this tick.
    pub fn tick_all(&self) -> Result<(), FocusError> {
        let mut credited = Vec::new();
        {
            let mut timers = self
                .timers
                .lock()
                .map_err(|e| FocusError::Internal(e.to_string()))?;
            for (email, entry) in timers.iter_mut() {
                match entry.timer.tick() {
                    TickOutcome::Idle => continue,
                    TickOutcome::WorkCompleted => credited.push(email.clone()),
                    TickOutcome::Ticked | TickOutcome::BreakCompleted => {}
                }
                entry.publish();
            }
        }

        for email in credited {
            let total = self.store.increment_counter(
                &keys::user_key(&email, keys::FOCUS_MINUTES),
                FOCUS_CREDIT_MINUTES,
            )?;
            tracing::info!("Work phase completed for {}, focus minutes now {}", email, total);
        }

        Ok(())
    }

    /// Run the tick loop forever. Spawned once at startup.
    pub async fn run(self: Arc<Self>) {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if let Err(err) = self.tick_all() {
                tracing::error!("Timer tick failed: {}", err);
            }
        }
    }
}
