//! # API Facade
//!
//! Single entry point for every herokron operation, whatever the UI.
//!
//! `HerokronApi` owns the three pieces of process-wide state and lends them to the
//! command layer one call at a time:
//!
//! - the in-memory [`Registry`], loaded once at construction
//! - the [`RegistryStore`] that checkpoints it after each mutation
//! - the [`Provider`] used to reach Heroku
//!
//! There is no global database object: construct one API per process and pass it by
//! reference.
//!
//! ## Generic Over Store and Provider
//!
//! - Production: `HerokronApi<FileStore, HerokuProvider>`
//! - Testing: `HerokronApi<InMemoryStore, FakeProvider>`
//!
//! The API does no I/O of its own beyond what the store and provider do, and never prints.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::Registry;
use crate::provider::Provider;
use crate::store::RegistryStore;

pub struct HerokronApi<S: RegistryStore, P: Provider> {
    store: S,
    provider: P,
    registry: Registry,
}

impl<S: RegistryStore, P: Provider> HerokronApi<S, P> {
    pub fn new(store: S, provider: P) -> Result<Self> {
        let registry = store.load()?;
        Ok(Self {
            store,
            provider,
            registry,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> Vec<&str> {
        self.registry.keys()
    }

    pub fn apps(&self) -> Vec<&str> {
        self.registry.apps()
    }

    pub fn add_key(&mut self, key: &str) -> Result<CmdResult> {
        commands::keys::add(&mut self.registry, &mut self.store, &self.provider, key)
    }

    pub fn remove_key(&mut self, key: &str) -> Result<CmdResult> {
        commands::keys::remove(&mut self.registry, &mut self.store, key)
    }

    pub fn set_webhook(&mut self, url: &str) -> Result<CmdResult> {
        commands::settings::set_webhook(&mut self.registry, &mut self.store, url)
    }

    pub fn clear_webhook(&mut self) -> Result<CmdResult> {
        commands::settings::clear_webhook(&mut self.registry, &mut self.store)
    }

    pub fn set_color(&mut self, value: &str) -> Result<CmdResult> {
        commands::settings::set_color(&mut self.registry, &mut self.store, value)
    }

    pub fn sync(&mut self) -> Result<CmdResult> {
        commands::sync::run(&mut self.registry, &mut self.store, &self.provider)
    }

    pub fn sync_key(&mut self, key: &str) -> Result<Vec<String>> {
        commands::sync::one(&mut self.registry, &mut self.store, &self.provider, key)
    }

    pub fn status(&mut self, app: &str) -> Result<CmdResult> {
        commands::app::status(&mut self.registry, &mut self.store, &self.provider, app)
    }

    pub fn on(&mut self, app: &str) -> Result<CmdResult> {
        commands::app::on(&mut self.registry, &mut self.store, &self.provider, app)
    }

    pub fn off(&mut self, app: &str) -> Result<CmdResult> {
        commands::app::off(&mut self.registry, &mut self.store, &self.provider, app)
    }
}

pub use crate::commands::{CmdMessage, MessageLevel, SyncFailure, SyncReport};
pub use crate::model::AppStatus;
