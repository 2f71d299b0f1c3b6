use crate::error::{HerokronError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// "Heroku Lavender", from https://brand.heroku.com
pub const DEFAULT_COLOR: u32 = 0x7673C0;
pub const MAX_COLOR: u32 = 0xFFFFFF;

const WEBHOOK_PATTERN: &str = r"^(?:https?://)?((canary|ptb)\.)?discord(?:app)?\.com/api/webhooks/(?P<id>[0-9]+)/(?P<token>[A-Za-z0-9\.\-_]+)/?$";

/// One API key and the apps Heroku reported for it on the last sync.
///
/// Stored on disk as a single-entry object, `{"<key>": ["app-a", "app-b"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct KeyEntry {
    pub key: String,
    pub apps: Vec<String>,
}

impl KeyEntry {
    pub fn new(key: impl Into<String>, apps: Vec<String>) -> Self {
        Self {
            key: key.into(),
            apps,
        }
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for KeyEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, Vec<String>>) -> std::result::Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "expected exactly one key per entry, found {}",
                map.len()
            ));
        }
        match map.into_iter().next() {
            Some((key, apps)) => Ok(KeyEntry { key, apps }),
            None => Err("empty key entry".to_string()),
        }
    }
}

impl From<KeyEntry> for BTreeMap<String, Vec<String>> {
    fn from(entry: KeyEntry) -> Self {
        BTreeMap::from([(entry.key, entry.apps)])
    }
}

/// Discord webhook coordinates. Notifications are enabled only when both parts are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Webhook {
    /// Validate a Discord webhook URL and extract its id and token.
    pub fn parse(url: &str) -> Result<Self> {
        let webhook_re = Regex::new(WEBHOOK_PATTERN)?;
        let caps = webhook_re
            .captures(url.trim())
            .ok_or_else(|| HerokronError::InvalidWebhookFormat(url.to_string()))?;
        Ok(Self {
            id: caps.name("id").map(|m| m.as_str().to_string()),
            token: caps.name("token").map(|m| m.as_str().to_string()),
        })
    }

    pub fn url(&self) -> Option<String> {
        match (&self.id, &self.token) {
            (Some(id), Some(token)) => {
                Some(format!("https://discord.com/api/webhooks/{}/{}", id, token))
            }
            _ => None,
        }
    }
}

/// Parse `#RRGGBB`, `RRGGBB` or a base 10 integer into an embed color.
pub fn parse_color(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let parsed = if digits.len() == 6 {
        u32::from_str_radix(digits, 16).ok()
    } else {
        digits.parse::<u32>().ok()
    };
    match parsed {
        Some(color) if color <= MAX_COLOR => Ok(color),
        _ => Err(HerokronError::InvalidColor(input.to_string())),
    }
}

fn default_color() -> u32 {
    DEFAULT_COLOR
}

/// The local database: API keys, the apps each key owns, and notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub keys: Vec<KeyEntry>,

    #[serde(default = "default_color")]
    pub color: u32,

    #[serde(default)]
    pub webhook: Webhook,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            color: DEFAULT_COLOR,
            webhook: Webhook::default(),
        }
    }
}

impl Registry {
    pub fn keys(&self) -> Vec<&str> {
        self.keys.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn apps(&self) -> Vec<&str> {
        self.keys
            .iter()
            .flat_map(|e| e.apps.iter().map(String::as_str))
            .collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.iter().any(|e| e.key == key)
    }

    pub fn contains_app(&self, app: &str) -> bool {
        self.keys.iter().any(|e| e.apps.iter().any(|a| a == app))
    }

    /// The key owning `app`; the first entry wins if several list it.
    pub fn app_owner(&self, app: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|e| e.apps.iter().any(|a| a == app))
            .map(|e| e.key.as_str())
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut KeyEntry> {
        self.keys.iter_mut().find(|e| e.key == key)
    }

    /// Returns false if the key was already present.
    pub fn insert_key(&mut self, key: &str, apps: Vec<String>) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.keys.push(KeyEntry::new(key, apps));
        true
    }

    /// Returns false if the key was not present.
    pub fn remove_key(&mut self, key: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|e| e.key != key);
        self.keys.len() != before
    }

    pub fn webhook_url(&self) -> Option<String> {
        self.webhook.url()
    }
}

/// Outcome of a status/on/off call. `changed` is only set by on/off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppStatus {
    pub app: String,
    pub online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
}

impl AppStatus {
    pub fn status(app: impl Into<String>, online: bool) -> Self {
        Self {
            app: app.into(),
            online,
            changed: None,
        }
    }

    pub fn transition(app: impl Into<String>, online: bool, changed: bool) -> Self {
        Self {
            app: app.into(),
            online,
            changed: Some(changed),
        }
    }
}
