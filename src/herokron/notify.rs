//! # Notifications
//!
//! Posts a Discord embed when an app is switched on or off. Notifications run after the
//! operation's result has been delivered, and a failed send never changes that result.

use crate::error::{HerokronError, Result};
use crate::model::AppStatus;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Serialize;

const ONLINE: &str = "🟢";
const OFFLINE: &str = "🔴";

/// Online state before and after an on/off call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    pub app: String,
    pub previous: bool,
    pub current: bool,
}

impl StateChange {
    /// Only on/off results describe a change; plain status results yield `None`.
    pub fn from_status(status: &AppStatus) -> Option<Self> {
        let changed = status.changed?;
        let previous = if changed { !status.online } else { status.online };
        Some(Self {
            app: status.app.clone(),
            previous,
            current: status.online,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: String,
}

impl DiscordEmbed {
    pub fn for_change(change: &StateChange, color: u32, at: DateTime<Utc>) -> Self {
        let indicator = |online: bool| if online { ONLINE } else { OFFLINE };
        Self {
            title: change.app.clone(),
            description: format!(
                "**STATE:\u{2800}{}      →      {}**\n\nView affected app:\n[heroku.com](https://dashboard.heroku.com/apps/{})",
                indicator(change.previous),
                indicator(change.current),
                change.app
            ),
            color,
            timestamp: at.to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    embeds: [&'a DiscordEmbed; 1],
}

pub trait Notifier {
    fn send(&self, embed: &DiscordEmbed) -> Result<()>;
}

pub struct DiscordNotifier {
    client: Client,
    url: String,
}

impl DiscordNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl Notifier for DiscordNotifier {
    fn send(&self, embed: &DiscordEmbed) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { embeds: [embed] })
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(HerokronError::Notification(format!(
                "HTTP {} {}",
                status, body
            )));
        }
        Ok(())
    }
}

/// Send an embed for `status` if it describes an on/off call. Returns whether anything was sent.
pub fn notify_change<N: Notifier>(notifier: &N, status: &AppStatus, color: u32) -> Result<bool> {
    let Some(change) = StateChange::from_status(status) else {
        return Ok(false);
    };
    let embed = DiscordEmbed::for_change(&change, color, Utc::now());
    log::info!("sending Discord notification for {}", change.app);
    notifier.send(&embed)?;
    Ok(true)
}
