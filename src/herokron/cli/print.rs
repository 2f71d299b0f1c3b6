use super::format::format_value;
use colored::Colorize;
use herokron::api::{CmdMessage, MessageLevel};
use serde::Serialize;

/// Stdout writer that honors `--no-print`. Warnings on stderr are never silenced.
pub(super) struct Printer {
    quiet: bool,
}

impl Printer {
    pub(super) fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub(super) fn messages(&self, messages: &[CmdMessage]) {
        if self.quiet {
            return;
        }
        for message in messages {
            match message.level {
                MessageLevel::Info => println!("{}", message.content.dimmed()),
                MessageLevel::Success => println!("{}", message.content.green()),
                MessageLevel::Warning => println!("{}", message.content.yellow()),
                MessageLevel::Error => println!("{}", message.content.red()),
            }
        }
    }

    pub(super) fn value<T: Serialize>(&self, value: &T) {
        if self.quiet {
            return;
        }
        match serde_json::to_value(value) {
            Ok(json) => println!("{}", format_value(&json)),
            Err(e) => warn(&format!("could not render output: {}", e)),
        }
    }
}

pub(super) fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}
