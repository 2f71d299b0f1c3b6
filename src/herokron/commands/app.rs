//! # App Controller
//!
//! Turns an app name into something that can be switched on and off.
//!
//! ## Resolution
//!
//! 1. If the app is not in the local database, resync every key once. There is never a
//!    second attempt.
//! 2. Still unknown → [`HerokronError::AppNotFound`].
//! 3. Open a session with the owning key and read the app's process formation.
//! 4. No process types → [`HerokronError::NoProcessType`].
//! 5. Pick the process type to control: `worker`, else `web`, else the first one listed.
//!
//! An app counts as online when the chosen process type has at least one dyno.
//!
//! ## Lost access
//!
//! Heroku answers 403/404 for an app that was deleted or transferred away from the key
//! the database records. Whether that happens on the formation read or on the scale
//! request, every key is resynced once and the call fails with
//! [`HerokronError::AppAccess`]. The next call sees the refreshed database: the app is
//! either gone or owned by another registered key.
//!
//! ## Switching
//!
//! `on`/`off` skip the remote call entirely when the app is already in the requested
//! state.

use crate::commands::{sync, CmdMessage, CmdResult};
use crate::error::{mask_key, HerokronError, Result};
use crate::model::{AppStatus, Registry};
use crate::provider::{ProcessFormation, Provider, ProviderSession};
use crate::store::RegistryStore;

/// Process types in the order they are preferred for control.
pub const PROCESS_PRIORITY: [&str; 2] = ["worker", "web"];

/// A resolved app, valid for the duration of one operation.
pub struct AppHandle<T: ProviderSession> {
    pub key: String,
    pub app: String,
    pub process_type: String,
    pub quantity: u32,
    session: T,
}

impl<T: ProviderSession> AppHandle<T> {
    pub fn is_online(&self) -> bool {
        self.quantity > 0
    }
}

pub fn choose_process(formation: &[ProcessFormation]) -> Option<&ProcessFormation> {
    PROCESS_PRIORITY
        .iter()
        .find_map(|preferred| formation.iter().find(|p| p.process_type == *preferred))
        .or_else(|| formation.first())
}

pub fn resolve<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
) -> Result<AppHandle<P::Session>> {
    if !registry.contains_app(app) {
        log::info!("{} not in database, syncing all keys", app);
        sync::all(registry, store, provider)?;
    }

    let key = registry
        .app_owner(app)
        .ok_or_else(|| HerokronError::AppNotFound(app.to_string()))?
        .to_string();

    let session = provider.connect(&key);
    let formation = match session.formation(app) {
        Ok(formation) => formation,
        Err(HerokronError::Authorization(_)) => {
            return Err(lost_access(registry, store, provider, app))
        }
        Err(e) => return Err(e),
    };
    let chosen = choose_process(&formation)
        .ok_or_else(|| HerokronError::NoProcessType(app.to_string()))?;

    log::debug!(
        "{} resolved: process type {} with {} dynos",
        app,
        chosen.process_type,
        chosen.quantity
    );

    Ok(AppHandle {
        key,
        app: app.to_string(),
        process_type: chosen.process_type.clone(),
        quantity: chosen.quantity,
        session,
    })
}

pub fn status<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
) -> Result<CmdResult> {
    let handle = resolve(registry, store, provider, app)?;
    Ok(CmdResult::default().with_status(AppStatus::status(app, handle.is_online())))
}

pub fn on<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
) -> Result<CmdResult> {
    switch(registry, store, provider, app, true)
}

pub fn off<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
) -> Result<CmdResult> {
    switch(registry, store, provider, app, false)
}

fn switch<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
    online: bool,
) -> Result<CmdResult> {
    let handle = resolve(registry, store, provider, app)?;
    let state = if online { "online" } else { "offline" };
    let mut result = CmdResult::default();

    if handle.is_online() == online {
        result.add_message(CmdMessage::info(format!("{} is already {}.", app, state)));
        return Ok(result.with_status(AppStatus::transition(app, online, false)));
    }

    let quantity = u32::from(online);
    log::info!(
        "scaling {} {} from {} to {} with {}",
        app,
        handle.process_type,
        handle.quantity,
        quantity,
        mask_key(&handle.key)
    );

    match handle.session.scale(app, &handle.process_type, quantity) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!("{} is now {}.", app, state)));
            Ok(result.with_status(AppStatus::transition(app, online, true)))
        }
        Err(HerokronError::Authorization(_)) => Err(lost_access(registry, store, provider, app)),
        Err(e) => Err(e),
    }
}

/// Resync every key once after Heroku refused access to `app`. Resync problems are only
/// logged; the caller always gets [`HerokronError::AppAccess`].
fn lost_access<S: RegistryStore, P: Provider>(
    registry: &mut Registry,
    store: &mut S,
    provider: &P,
    app: &str,
) -> HerokronError {
    log::warn!("access to {} denied, resyncing database", app);
    match sync::all(registry, store, provider) {
        Ok(report) if !report.is_clean() => {
            log::warn!("{} key(s) failed to resync", report.failed.len());
        }
        Ok(_) => {}
        Err(e) => log::warn!("resync after denied access failed: {}", e),
    }
    HerokronError::AppAccess(app.to_string())
}
