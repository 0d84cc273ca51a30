//! The 21-day routine plan workflow.
//!
//! One generation request per invocation; any failure is replaced
//! wholesale by the fixed fallback plan and never surfaced as an error.
//! A successful (or fallback) result overwrites the persisted plan and
//! clears the completed-day set.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use wellspace_common::{fallback_plan, RoutineDay};

use crate::llm::GenerationService;
use crate::store::{keys, KvStore, StoreError};

/// The free-time options offered by the plan form.
pub const FREE_MINUTES_CHOICES: [u32; 3] = [15, 30, 45];

pub struct RoutineService {
    store: Arc<KvStore>,
    generator: Arc<dyn GenerationService>,
    /// Emails with a generation currently in flight. At most one
    /// generation per user; a concurrent second request fails fast
    /// instead of racing the persisted write.
    in_flight: Mutex<HashSet<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    #[error("free_minutes must be one of 15, 30 or 45")]
    InvalidFreeMinutes,
    #[error("A plan generation is already in progress for this user")]
    GenerationInFlight,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RoutineService {
    pub fn new(store: Arc<KvStore>, generator: Arc<dyn GenerationService>) -> Self {
        Self {
            store,
            generator,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn lock_in_flight(&self) -> Result<std::sync::MutexGuard<'_, HashSet<String>>, RoutineError> {
        self.in_flight
            .lock()
            .map_err(|e| RoutineError::Store(StoreError::Database(e.to_string())))
    }

    /// Generate and persist a plan for `email`.
    ///
    /// The caller cannot tell a fallback from a degraded-but-successful
    /// generation other than by inspecting the returned days.
    pub async fn generate_plan(
        &self,
        email: &str,
        free_minutes: u32,
    ) -> Result<Vec<RoutineDay>, RoutineError> {
        if !FREE_MINUTES_CHOICES.contains(&free_minutes) {
            return Err(RoutineError::InvalidFreeMinutes);
        }

        if !self.lock_in_flight()?.insert(email.to_string()) {
            return Err(RoutineError::GenerationInFlight);
        }

        let result = self.generator.generate_routine_plan(free_minutes).await;

        self.lock_in_flight()?.remove(email);

        let plan = match result {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!("Plan generation failed, serving fallback plan: {}", err);
                fallback_plan()
            }
        };

        self.store
            .set_json(&keys::user_key(email, keys::ROUTINE_PLAN), &plan)?;
        self.store
            .remove(&keys::user_key(email, keys::COMPLETED_DAYS))?;

        Ok(plan)
    }

    /// The persisted plan, if one was ever generated.
    pub fn plan(&self, email: &str) -> Result<Option<Vec<RoutineDay>>, RoutineError> {
        Ok(self
            .store
            .get_json(&keys::user_key(email, keys::ROUTINE_PLAN))?)
    }

    pub fn completed_days(&self, email: &str) -> Result<Vec<u32>, RoutineError> {
        Ok(self
            .store
            .get_json(&keys::user_key(email, keys::COMPLETED_DAYS))?
            .unwrap_or_default())
    }

    /// Flip a day's completion state and return the new set. Days are
    /// not validated against the current plan.
    pub fn toggle_day(&self, email: &str, day: u32) -> Result<Vec<u32>, RoutineError> {
        let key = keys::user_key(email, keys::COMPLETED_DAYS);
        let mut days: Vec<u32> = self.store.get_json(&key)?.unwrap_or_default();

        match days.iter().position(|d| *d == day) {
            Some(idx) => {
                days.remove(idx);
            }
            None => days.push(day),
        }

        self.store.set_json(&key, &days)?;
        Ok(days)
    }

    /// The regenerate action: drop the plan and its completion state.
    pub fn clear_plan(&self, email: &str) -> Result<(), RoutineError> {
        self.store
            .remove(&keys::user_key(email, keys::ROUTINE_PLAN))?;
        self.store
            .remove(&keys::user_key(email, keys::COMPLETED_DAYS))?;
        Ok(())
    }
}
