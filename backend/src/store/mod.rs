//! Flat key-value persistence over SQLite.
//!
//! The browser-origin data model is a string-keyed store with
//! JSON-encoded (or decimal-text) values under deterministic per-user
//! keys; this module keeps that layout intact on top of a single `kv`
//! table.

pub mod keys;

mod kv;

pub use kv::{KvStore, StoreError};
