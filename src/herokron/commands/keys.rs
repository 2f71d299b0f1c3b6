use crate::commands::{CmdMessage, CmdResult};
use crate::error::{mask_key, HerokronError, Result};
use crate::model::Registry;
use crate::provider::{Provider, ProviderSession};
use crate::store::RegistryStore;

/// Register `key` along with the apps it can reach. Adding a known key is a no-op and
/// makes no remote call.
pub fn add<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    key: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if registry.contains_key(key) {
        result.add_message(CmdMessage::info(format!(
            "API key {} is already in the database.",
            mask_key(key)
        )));
        return Ok(result.with_registry(registry.clone()));
    }

    let apps = provider.connect(key).list_apps().map_err(|e| match e {
        HerokronError::Authentication(masked) => HerokronError::InvalidCredential(masked),
        other => other,
    })?;

    let count = apps.len();
    registry.insert_key(key, apps);
    store.save(registry)?;

    log::info!("added {} ({} apps)", mask_key(key), count);
    result.add_message(CmdMessage::success(format!(
        "Added API key {} ({} apps).",
        mask_key(key),
        count
    )));
    if count == 0 {
        result.add_message(CmdMessage::warning(format!(
            "API key {} can't see any apps yet.",
            mask_key(key)
        )));
    }
    Ok(result.with_registry(registry.clone()))
}

/// Forget `key` and its apps. Removing an unknown key is a no-op.
pub fn remove<S: RegistryStore>(
    registry: &mut Registry,
    store: &mut S,
    key: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if registry.remove_key(key) {
        store.save(registry)?;
        log::info!("removed {}", mask_key(key));
        result.add_message(CmdMessage::success(format!(
            "Removed API key {}.",
            mask_key(key)
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "API key {} is not in the database.",
            mask_key(key)
        )));
    }

    Ok(result.with_registry(registry.clone()))
}
