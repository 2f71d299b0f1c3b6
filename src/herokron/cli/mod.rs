//! # CLI Layer
//!
//! One client of the herokron library, and the only place that knows about stdout,
//! stderr and exit codes.
//!
//! A run has three phases, each optional:
//!
//! 1. Registry changes (`--add-key`, `--remove-key`, `--set-webhook`, `--clear-webhook`,
//!    `--set-color`), applied in that order.
//! 2. `--sync`.
//! 3. At most one query or switch: `--on`, `--off`, `--status`, `--database`, `--apps`,
//!    `--keys`, in that priority.
//!
//! Keys that fail to sync don't stop phase 3; the run still exits non-zero afterwards.
//!
//! After an on/off call the Discord notification goes out last, so a failed send can
//! only add a warning to a result that has already been printed.

mod format;
mod print;
mod setup;

use clap::{CommandFactory, Parser};
use herokron::api::HerokronApi;
use herokron::commands::{CmdMessage, CmdResult};
use herokron::model::Registry;
use herokron::config::HerokronConfig;
use herokron::error::{HerokronError, Result};
use herokron::notify::{notify_change, DiscordNotifier};
use herokron::provider::heroku::HerokuProvider;
use herokron::store::fs::FileStore;
use herokron::store::RegistryStore;
use print::{warn, Printer};
use setup::{normalize_args, Cli};

type Api = HerokronApi<FileStore, HerokuProvider>;

pub fn run() -> Result<()> {
    let args = normalize_args(std::env::args());
    if args.len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }
    let cli = Cli::parse_from(args);

    let config = HerokronConfig::from_env()?;
    let store = FileStore::open(&config.data_dir)?;
    let provider = HerokuProvider::with_base_url(&config.api_url);
    let mut api = HerokronApi::new(store, provider)?;
    let printer = Printer::new(cli.no_print);

    if cli.mutates_registry() {
        if let Some(registry) = update_registry(&mut api, &cli, &printer)? {
            printer.value(&registry);
        }
    }

    let mut sync_failures = 0;
    if cli.sync {
        let result = api.sync()?;
        printer.messages(&result.messages);
        sync_failures = result.sync.map_or(0, |report| report.failed.len());
    }

    if let Some(app) = &cli.on {
        let result = api.on(app)?;
        finish_switch(&api, &cli, &printer, result);
    } else if let Some(app) = &cli.off {
        let result = api.off(app)?;
        finish_switch(&api, &cli, &printer, result);
    } else if let Some(app) = &cli.status {
        if let Some(status) = api.status(app)?.status {
            printer.value(&status);
        }
    } else if cli.database {
        if let Some(path) = api.store().location() {
            printer.messages(&[CmdMessage::info(format!("Database: {}", path.display()))]);
        }
        printer.value(api.registry());
    } else if cli.apps {
        printer.value(&api.apps());
    } else if cli.keys {
        printer.value(&api.keys());
    }

    if sync_failures > 0 {
        return Err(HerokronError::SyncIncomplete(sync_failures));
    }
    Ok(())
}

/// Apply the requested registry changes. Returns the registry as the last change left it.
fn update_registry(api: &mut Api, cli: &Cli, printer: &Printer) -> Result<Option<Registry>> {
    let mut registry = None;
    let mut report = |result: CmdResult| {
        printer.messages(&result.messages);
        registry = result.registry.or(registry.take());
    };

    if let Some(key) = &cli.add_key {
        report(api.add_key(key)?);
    }
    if let Some(key) = &cli.remove_key {
        report(api.remove_key(key)?);
    }
    if let Some(url) = &cli.set_webhook {
        report(api.set_webhook(url)?);
    }
    if cli.clear_webhook {
        report(api.clear_webhook()?);
    }
    if let Some(color) = &cli.set_color {
        report(api.set_color(color)?);
    }
    Ok(registry)
}

fn finish_switch(api: &Api, cli: &Cli, printer: &Printer, result: CmdResult) {
    printer.messages(&result.messages);
    let Some(status) = result.status else {
        return;
    };
    printer.value(&status);

    if cli.no_log {
        return;
    }
    let Some(url) = api.registry().webhook_url() else {
        return;
    };
    let notifier = DiscordNotifier::new(url);
    if let Err(e) = notify_change(&notifier, &status, api.registry().color) {
        warn(&e.to_string());
    }
}
