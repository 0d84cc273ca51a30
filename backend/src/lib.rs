pub mod activity;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod focus;
pub mod llm;
pub mod logging;
pub mod routes;
pub mod routine;
pub mod store;
pub mod test_util;

pub use activity::ActivityService;
pub use auth::{AuthError, CredentialStore, SessionStore};
pub use config::Config;
pub use focus::TimerService;
pub use llm::{GeminiClient, GenerationService};
pub use routine::RoutineService;
pub use store::{KvStore, StoreError};

use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<KvStore>,
    pub credentials: CredentialStore,
    pub session: SessionStore,
    pub routine: RoutineService,
    pub timer: Arc<TimerService>,
    pub activity: ActivityService,
}

impl AppState {
    /// Wire all services over one store. The generation service is
    /// injected so tests can substitute a stub for the Gemini client.
    pub fn new(config: Config, store: Arc<KvStore>, generator: Arc<dyn GenerationService>) -> Self {
        Self {
            config,
            credentials: CredentialStore::new(store.clone()),
            session: SessionStore::new(store.clone()),
            routine: RoutineService::new(store.clone(), generator),
            timer: Arc::new(TimerService::new(store.clone())),
            activity: ActivityService::new(store.clone()),
            store,
        }
    }
}
