use super::RegistryStore;
use crate::error::Result;
use crate::model::Registry;
use std::path::Path;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    registry: Registry,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self { registry, saves: 0 }
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn saved(&self) -> &Registry {
        &self.registry
    }
}

impl RegistryStore for InMemoryStore {
    fn load(&self) -> Result<Registry> {
        Ok(self.registry.clone())
    }

    fn save(&mut self, registry: &Registry) -> Result<()> {
        self.registry = registry.clone();
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        None
    }
}
