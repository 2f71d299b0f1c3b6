use herokron::config::{DEFAULT_LOG_FILTER, LOG_ENV};

mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, DEFAULT_LOG_FILTER))
        .init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
