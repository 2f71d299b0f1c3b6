use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HerokronError {
    #[error("Invalid Heroku API key ({0}). View your API key(s) at: https://dashboard.heroku.com/account")]
    InvalidCredential(String),

    #[error("App couldn't be found in the local database: {0}")]
    AppNotFound(String),

    #[error("App has no process types and can't be turned on/off: {0}")]
    NoProcessType(String),

    #[error("Heroku rejected the API key ({0})")]
    Authentication(String),

    #[error("Heroku denied access to app: {0}")]
    Authorization(String),

    #[error("Lost access to app {0}: it was deleted or moved to an account herokron has no key for")]
    AppAccess(String),

    #[error("API key not found in the local database: {0}")]
    KeyNotFound(String),

    #[error("{0} API key(s) failed to sync")]
    SyncIncomplete(usize),

    #[error("Database file {} is corrupt: {source}", .path.display())]
    CorruptRegistry {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Webhook passed doesn't match the Discord webhook format: {0}")]
    InvalidWebhookFormat(String),

    #[error("Color must be hexadecimal (#RRGGBB) or a base 10 integer up to 16777215: {0}")]
    InvalidColor(String),

    #[error("Heroku API error: {0}")]
    Provider(String),

    #[error("Discord notification failed: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, HerokronError>;

impl HerokronError {
    /// True for failures reported by (or on the way to) the remote provider, as opposed
    /// to local storage problems.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            HerokronError::Authentication(_)
                | HerokronError::Authorization(_)
                | HerokronError::Provider(_)
                | HerokronError::Http(_)
        )
    }
}

/// Shortens an API key for messages and logs, keeping only the last four characters.
pub fn mask_key(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}
