use crate::commands::{CmdMessage, CmdResult};
use crate::error::{mask_key, HerokronError, Result};
use crate::model::Registry;
use crate::provider::{Provider, ProviderSession};
use crate::store::RegistryStore;

#[derive(Debug)]
pub struct SyncFailure {
    pub key: String,
    pub error: HerokronError,
}

/// Outcome of a full resync. Every key is attempted even if earlier ones fail.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub synced: Vec<String>,
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Replace the apps recorded for `key` with what the provider currently reports, then persist.
///
/// On failure the registry is left untouched.
pub fn one<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    key: &str,
) -> Result<Vec<String>> {
    if !registry.contains_key(key) {
        return Err(HerokronError::KeyNotFound(mask_key(key)));
    }

    let apps = provider.connect(key).list_apps()?;
    if let Some(entry) = registry.entry_mut(key) {
        entry.apps = apps.clone();
    }
    store.save(registry)?;

    log::info!("synced {} ({} apps)", mask_key(key), apps.len());
    Ok(apps)
}

/// Sync every key in registry order, collecting remote failures instead of stopping at
/// the first one. Storage failures abort immediately.
pub fn all<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
) -> Result<SyncReport> {
    let keys: Vec<String> = registry.keys().into_iter().map(String::from).collect();
    let mut report = SyncReport::default();

    for key in keys {
        match one(registry, store, provider, &key) {
            Ok(_) => report.synced.push(key),
            Err(error) if error.is_remote() => {
                log::warn!("failed to sync {}: {}", mask_key(&key), error);
                report.failed.push(SyncFailure { key, error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(report)
}

/// Full resync wrapped for the API, with one message per key.
pub fn run<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
) -> Result<CmdResult> {
    let report = all(registry, store, provider)?;
    let mut result = CmdResult::default();

    for key in &report.synced {
        result.add_message(CmdMessage::success(format!("Synced {}", mask_key(key))));
    }
    for failure in &report.failed {
        result.add_message(CmdMessage::error(format!(
            "Failed to sync {}: {}",
            mask_key(&failure.key),
            failure.error
        )));
    }
    if report.synced.is_empty() && report.failed.is_empty() {
        result.add_message(CmdMessage::info("No API keys in the database."));
    }

    Ok(result.with_registry(registry.clone()).with_sync(report))
}
