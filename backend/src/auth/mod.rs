//! Local credential and session stores.
//!
//! There is no external identity provider: accounts live in the
//! key-value store as a flat record list, and at most one session is
//! active process-wide.

mod credentials;
mod session;

pub use credentials::{AuthError, CredentialStore};
pub use session::SessionStore;
