//! # Command Layer
//!
//! Business logic for every herokron operation. Commands take the in-memory [`Registry`]
//! by mutable reference together with the store and provider, and return a [`CmdResult`].
//! They never print; the CLI decides how to render results and messages.
//!
//! - [`keys`]: add and remove API keys
//! - [`sync`]: refresh the apps recorded for one key or all keys
//! - [`app`]: resolve an app to its key and process type; status, on, off
//! - [`settings`]: Discord webhook and embed color

use crate::model::{AppStatus, Registry};

pub mod app;
pub mod keys;
pub mod settings;
pub mod sync;

pub use sync::{SyncFailure, SyncReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub status: Option<AppStatus>,
    pub registry: Option<Registry>,
    pub sync: Option<SyncReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_status(mut self, status: AppStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_sync(mut self, report: SyncReport) -> Self {
        self.sync = Some(report);
        self
    }
}
