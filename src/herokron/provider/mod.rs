//! # Provider Gateway
//!
//! Narrow interface to the remote platform. The app controller and the synchronizer only
//! see these traits, never a concrete HTTP client, so they can be tested against
//! [`fake::FakeProvider`].
//!
//! A [`Provider`] hands out a [`ProviderSession`] bound to one API key. Sessions expose
//! the three capabilities the rest of the crate needs:
//!
//! - list the apps owned by the key
//! - read an app's process formation (process type → quantity)
//! - set the quantity of one process type
//!
//! Error contract:
//! - a rejected key surfaces as [`HerokronError::Authentication`](crate::error::HerokronError::Authentication)
//! - losing access to an app (deleted, transferred) surfaces as
//!   [`HerokronError::Authorization`](crate::error::HerokronError::Authorization), which the
//!   controller reacts to with a registry resync

use crate::error::Result;

#[cfg(any(test, feature = "test_utils"))]
pub mod fake;
pub mod heroku;

/// One process type of an app and its current dyno count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFormation {
    pub process_type: String,
    pub quantity: u32,
}

impl ProcessFormation {
    pub fn new(process_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            process_type: process_type.into(),
            quantity,
        }
    }
}

pub trait Provider {
    type Session: ProviderSession;

    /// Open a session authenticated with `key`. No request is made until a session method is called.
    fn connect(&self, key: &str) -> Self::Session;
}

pub trait ProviderSession {
    /// Names of all apps the session's key can access
    fn list_apps(&self) -> Result<Vec<String>>;

    /// Process formation of `app`, in the order the provider reports it
    fn formation(&self, app: &str) -> Result<Vec<ProcessFormation>>;

    /// Set the dyno count of `process_type` to exactly `quantity`
    fn scale(&self, app: &str, process_type: &str, quantity: u32) -> Result<()>;
}
