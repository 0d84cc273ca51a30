use std::sync::Arc;

use wellspace_common::User;

use crate::store::{keys, KvStore, StoreError};

/// The single process-wide session: zero or one authenticated user,
/// persisted so a restart resumes where the user left off.
///
/// The session is not validated against the credential store; if records
/// are wiped externally a dangling session simply reads back as-is.
pub struct SessionStore {
    store: Arc<KvStore>,
}

impl SessionStore {
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    pub fn current(&self) -> Result<Option<User>, StoreError> {
        self.store.get_json(keys::CURRENT_USER)
    }

    pub fn set_current(&self, user: &User) -> Result<(), StoreError> {
        self.store.set_json(keys::CURRENT_USER, user)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(keys::CURRENT_USER)
    }
}
