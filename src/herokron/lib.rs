//! # Herokron Architecture
//!
//! Herokron switches Heroku apps on and off (one dyno or none) across any number of API
//! keys, and can announce every switch on a Discord webhook. The intended use is a cron
//! job: `herokron --on my-app` in the morning, `herokron --off my-app` at night.
//!
//! The library is UI-agnostic; the `herokron` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sends notifications    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the in-memory Registry, the store and the provider  │
//! │  - Thin dispatch to commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Key registry, synchronization, app controller, settings  │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Storage (store/)             │ │  Provider (provider/)     │
//! │  - RegistryStore trait        │ │  - Provider/Session traits│
//! │  - FileStore, InMemoryStore   │ │  - Heroku API v3 client   │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## The Registry
//!
//! The local database maps each API key to the apps it owned at the last sync. When an app
//! is not in the database, every key is resynced once before giving up, so adding a new
//! app on Heroku needs no local bookkeeping.
//!
//! ## Concurrency
//!
//! Everything is synchronous and single threaded. The database file is not locked:
//! concurrent `herokron` invocations race and the last one to save wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic
//! - [`store`]: Registry persistence
//! - [`provider`]: Heroku gateway
//! - [`model`]: `Registry`, `KeyEntry`, `Webhook`, `AppStatus`
//! - [`notify`]: Discord notifications
//! - [`config`]: Environment-derived settings
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod provider;
pub mod store;
