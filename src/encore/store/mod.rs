//! # Storage Layer
//!
//! Durable storage for this application is a plain string key/value store:
//! one key holds the serialized view document, and nothing in the view
//! machinery knows or cares what medium sits behind it.
//!
//! The [`KeyValueStore`] trait keeps that boundary explicit:
//! - [`fs::FileStore`] is the production backend, one file per key under a
//!   data directory
//! - [`memory::InMemoryStore`] backs tests and the degraded in-memory-only
//!   mode when durable storage is unavailable
//!
//! Implementations are passive. They never interpret the stored strings, and
//! they are not a source of truth on their own: the view store reconciles
//! whatever they return against the current catalog at load time.
//!
//! Writes from a single process are synchronous and totally ordered. Nothing
//! coordinates writers across processes; when two processes share a backend,
//! the last writer's snapshot wins.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for durable string storage.
pub trait KeyValueStore {
    /// Read the value for a key, `None` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, replacing any previous value whole.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
