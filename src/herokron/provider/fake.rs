//! Scripted provider for tests. Remote state lives behind a shared cell so a test can
//! change it (revoke a key, move an app) between calls and inspect what was requested.

use super::{ProcessFormation, Provider, ProviderSession};
use crate::error::{mask_key, HerokronError, Result};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleCall {
    pub app: String,
    pub process_type: String,
    pub quantity: u32,
}

#[derive(Default)]
struct FakeState {
    accounts: BTreeMap<String, Vec<String>>,
    formations: HashMap<String, Vec<ProcessFormation>>,
    revoked: HashSet<String>,
    denied: HashSet<String>,
    list_calls: usize,
    scale_calls: Vec<ScaleCall>,
}

#[derive(Clone, Default)]
pub struct FakeProvider {
    state: Rc<RefCell<FakeState>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, key: &str, apps: &[&str]) -> Self {
        self.set_account(key, apps);
        self
    }

    pub fn with_formation(self, app: &str, formation: &[(&str, u32)]) -> Self {
        self.state.borrow_mut().formations.insert(
            app.to_string(),
            formation
                .iter()
                .map(|(t, q)| ProcessFormation::new(*t, *q))
                .collect(),
        );
        self
    }

    /// Replace the apps reported for `key`.
    pub fn set_account(&self, key: &str, apps: &[&str]) {
        self.state.borrow_mut().accounts.insert(
            key.to_string(),
            apps.iter().map(|a| a.to_string()).collect(),
        );
    }

    /// Make every request with `key` fail authentication.
    pub fn revoke(&self, key: &str) {
        self.state.borrow_mut().revoked.insert(key.to_string());
    }

    /// Make scaling `app` fail authorization while reads still succeed, as if access was
    /// lost between resolving the app and switching it.
    pub fn deny(&self, app: &str) {
        self.state.borrow_mut().denied.insert(app.to_string());
    }

    pub fn quantity(&self, app: &str, process_type: &str) -> Option<u32> {
        self.state
            .borrow()
            .formations
            .get(app)
            .and_then(|f| f.iter().find(|p| p.process_type == process_type))
            .map(|p| p.quantity)
    }

    pub fn scale_calls(&self) -> Vec<ScaleCall> {
        self.state.borrow().scale_calls.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.borrow().list_calls
    }
}

impl Provider for FakeProvider {
    type Session = FakeSession;

    fn connect(&self, key: &str) -> FakeSession {
        FakeSession {
            state: Rc::clone(&self.state),
            key: key.to_string(),
        }
    }
}

pub struct FakeSession {
    state: Rc<RefCell<FakeState>>,
    key: String,
}

impl FakeSession {
    fn owned_apps(&self) -> Result<Vec<String>> {
        let state = self.state.borrow();
        if state.revoked.contains(&self.key) {
            return Err(HerokronError::Authentication(mask_key(&self.key)));
        }
        state
            .accounts
            .get(&self.key)
            .cloned()
            .ok_or_else(|| HerokronError::Authentication(mask_key(&self.key)))
    }

    /// Any app request needs a live key that still owns the app.
    fn ensure_owned(&self, app: &str) -> Result<()> {
        if self.owned_apps()?.iter().any(|a| a == app) {
            Ok(())
        } else {
            Err(HerokronError::Authorization(app.to_string()))
        }
    }
}

impl ProviderSession for FakeSession {
    fn list_apps(&self) -> Result<Vec<String>> {
        self.state.borrow_mut().list_calls += 1;
        self.owned_apps()
    }

    fn formation(&self, app: &str) -> Result<Vec<ProcessFormation>> {
        self.ensure_owned(app)?;
        Ok(self
            .state
            .borrow()
            .formations
            .get(app)
            .cloned()
            .unwrap_or_default())
    }

    fn scale(&self, app: &str, process_type: &str, quantity: u32) -> Result<()> {
        self.ensure_owned(app)?;
        if self.state.borrow().denied.contains(app) {
            return Err(HerokronError::Authorization(app.to_string()));
        }
        let mut state = self.state.borrow_mut();
        state.scale_calls.push(ScaleCall {
            app: app.to_string(),
            process_type: process_type.to_string(),
            quantity,
        });
        if let Some(process) = state
            .formations
            .get_mut(app)
            .and_then(|f| f.iter_mut().find(|p| p.process_type == process_type))
        {
            process.quantity = quantity;
        }
        Ok(())
    }
}
