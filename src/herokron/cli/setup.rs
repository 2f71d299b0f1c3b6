use clap::Parser;

const AFTER_HELP: &str = "\
Examples:
  herokron --add-key <HEROKU_API_KEY>
  herokron --on my-app
  herokron --off my-app --no-print
  herokron --sync --on my-app

With --sync, keys that fail to sync are reported but the other options still run;
herokron then exits with status 1.

The database is not locked: running several herokron commands at the same time
can lose updates (the last one to save wins).";

/// Options the original tool spelled with a single dash (`-on app`). They are rewritten
/// to their `--` form before parsing.
const LEGACY_FLAGS: &[&str] = &[
    "on", "off", "status", "state", "apps", "keys", "database", "add", "remove", "webhook",
    "color", "sync",
];

#[derive(Parser, Debug)]
#[command(name = "herokron", bin_name = "herokron", version)]
#[command(
    about = "Switch Heroku apps on and off, across every API key you own",
    long_about = None,
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Turn an app on (scale to one dyno)
    #[arg(long, value_name = "APP", conflicts_with_all = ["off", "status"])]
    pub on: Option<String>,

    /// Turn an app off (scale to zero dynos)
    #[arg(long, value_name = "APP", conflicts_with = "status")]
    pub off: Option<String>,

    /// Show whether an app is online
    #[arg(long, visible_alias = "state", value_name = "APP")]
    pub status: Option<String>,

    /// Add a Heroku API key and record its apps
    #[arg(long, visible_alias = "add", value_name = "KEY")]
    pub add_key: Option<String>,

    /// Remove a Heroku API key
    #[arg(long, visible_alias = "remove", value_name = "KEY")]
    pub remove_key: Option<String>,

    /// Set the Discord webhook used for notifications
    #[arg(long, visible_alias = "webhook", value_name = "URL", conflicts_with = "clear_webhook")]
    pub set_webhook: Option<String>,

    /// Stop sending Discord notifications
    #[arg(long)]
    pub clear_webhook: bool,

    /// Set the Discord embed color (#RRGGBB or base 10)
    #[arg(long, visible_alias = "color", value_name = "COLOR")]
    pub set_color: Option<String>,

    /// Refresh the apps recorded for every API key
    #[arg(long)]
    pub sync: bool,

    /// Print the local database
    #[arg(long)]
    pub database: bool,

    /// Print every recorded app
    #[arg(long)]
    pub apps: bool,

    /// Print every recorded API key
    #[arg(long)]
    pub keys: bool,

    /// Don't print anything to stdout
    #[arg(long)]
    pub no_print: bool,

    /// Don't send a Discord notification for this run
    #[arg(long)]
    pub no_log: bool,
}

impl Cli {
    pub fn mutates_registry(&self) -> bool {
        self.add_key.is_some()
            || self.remove_key.is_some()
            || self.set_webhook.is_some()
            || self.clear_webhook
            || self.set_color.is_some()
    }
}

/// Rewrite `-on`, `-off`, `-add` and friends to `--on`, `--off`, `--add`.
pub fn normalize_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| match arg.strip_prefix('-') {
            Some(name) if i > 0 && LEGACY_FLAGS.contains(&name) => format!("--{}", name),
            _ => arg,
        })
        .collect()
}
