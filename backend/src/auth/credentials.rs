use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};

use wellspace_common::User;

use crate::store::{keys, KvStore, StoreError};

/// Flat list of accounts persisted under one global key.
pub struct CredentialStore {
    store: Arc<KvStore>,
}

/// Stored account record. Passwords are argon2-hashed; the original
/// browser build kept them in plaintext, which is not carried over.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialRecord {
    name: String,
    email: String,
    password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    AlreadyExists,
    /// Uniform for unknown email and wrong password alike, so a failed
    /// login does not reveal whether the account exists.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CredentialStore {
    pub fn new(store: Arc<KvStore>) -> Self {
        Self { store }
    }

    fn records(&self) -> Result<Vec<CredentialRecord>, AuthError> {
        Ok(self.store.get_json(keys::USERS)?.unwrap_or_default())
    }

    /// Create an account. Email identity is case-insensitive; a duplicate
    /// leaves the record list untouched.
    pub fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        let mut records = self.records()?;

        if records
            .iter()
            .any(|r| r.email.to_lowercase() == email.to_lowercase())
        {
            return Err(AuthError::AlreadyExists);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hash(e.to_string()))?
            .to_string();

        records.push(CredentialRecord {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        });
        self.store.set_json(keys::USERS, &records)?;

        tracing::info!("Created account for {}", email);

        Ok(User {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Look an account up by credentials. Succeeds only on a
    /// case-insensitive email match AND a verified password.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let records = self.records()?;

        let record = records
            .iter()
            .find(|r| r.email.to_lowercase() == email.to_lowercase())
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&record.password_hash).map_err(|_| AuthError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(User {
            name: record.name.clone(),
            email: record.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(KvStore::open(":memory:").unwrap()))
    }

    #[test]
    fn sign_up_returns_public_projection() {
        let creds = store();

        let user = creds.sign_up("Ada", "ada@example.com", "hunter2").unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let creds = store();
        creds.sign_up("Ada", "ada@example.com", "hunter2").unwrap();

        let err = creds.sign_up("Ada II", "ADA@Example.COM", "other").unwrap_err();

        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[test]
    fn login_matches_email_case_insensitively() {
        let creds = store();
        creds.sign_up("Ada", "ada@example.com", "hunter2").unwrap();

        let user = creds.login("ADA@EXAMPLE.COM", "hunter2").unwrap();

        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn login_failure_is_uniform() {
        let creds = store();
        creds.sign_up("Ada", "ada@example.com", "hunter2").unwrap();

        let unknown = creds.login("nobody@example.com", "hunter2").unwrap_err();
        let wrong = creds.login("ada@example.com", "wrong").unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }

    #[test]
    fn password_for_other_account_does_not_log_in() {
        let creds = store();
        creds.sign_up("Ada", "ada@example.com", "ada-pass").unwrap();
        creds.sign_up("Grace", "grace@example.com", "grace-pass").unwrap();

        let err = creds.login("ada@example.com", "grace-pass").unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn stored_records_do_not_contain_plaintext_password() {
        let kv = Arc::new(KvStore::open(":memory:").unwrap());
        let creds = CredentialStore::new(kv.clone());
        creds.sign_up("Ada", "ada@example.com", "hunter2").unwrap();

        let raw = kv.get(keys::USERS).unwrap().unwrap();

        assert!(!raw.contains("hunter2"));
        assert!(raw.contains("password_hash"));
    }
}
