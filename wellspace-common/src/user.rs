use serde::{Deserialize, Serialize};

/// Public user projection. The stored credential record additionally
/// carries the password hash; that type never leaves the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Case-insensitive unique identity, also the storage key prefix.
    pub email: String,
}
