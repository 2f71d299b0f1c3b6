//! # Storage Layer
//!
//! The local database (the [`Registry`]) is persisted through the [`RegistryStore`] trait.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - A single `database.json` in the per-user data directory
//!   - Created (with an empty registry) on first use, and re-created if it holds invalid JSON
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Counts saves so tests can assert that mutations were checkpointed
//!
//! ## Consistency Model
//!
//! The in-memory `Registry` owned by the API is the source of truth while the process runs.
//! Every mutating command calls [`RegistryStore::save`] before returning, so the file is a
//! checkpoint of the last completed mutation.
//!
//! Saves rewrite the whole file. There is no locking: two `herokron` processes writing at
//! the same time race and the last writer wins.
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "keys": [ { "<api-key>": ["app-a", "app-b"] } ],
//!   "color": 7762880,
//!   "webhook": { "id": "...", "token": "..." }
//! }
//! ```

use crate::error::Result;
use crate::model::Registry;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for registry persistence.
pub trait RegistryStore {
    /// Read the registry from the backing storage
    fn load(&self) -> Result<Registry>;

    /// Overwrite the backing storage with `registry`
    fn save(&mut self, registry: &Registry) -> Result<()>;

    /// Where the registry lives, for file-based stores
    fn location(&self) -> Option<&Path>;
}
