mod cli;
mod commands;
mod fetch_ui;
mod format;
mod interactive;
mod output;

use clap::{CommandFactory, Parser};
use commands::AppContext;
use format::OutputFormat;
use linknova::{config::Config, error::Result, utils, ApiClient};
use output::notify::Notifier;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logger; RUST_LOG still wins over --debug
    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let notifier = Notifier::new(!args.nc);
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            notifier.error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Cli) -> Result<()> {
    if args.version {
        println!("{} {}", cli::get_exe_name(), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(command) = args.command else {
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| utils::get_config_dir().join("config.yml"));

    // Load configuration
    let mut cfg = match &args.config {
        Some(path) => {
            let mut cfg = Config::load_from_path(path)?;
            cfg.apply_overrides(|key| std::env::var(key).ok());
            cfg
        }
        None => Config::load(),
    };
    if let Some(base_url) = args.base_url {
        cfg.base_url = base_url;
    }
    log::debug!("Using server {}{}", cfg.base_url, cfg.api_prefix);

    let client = ApiClient::new(&cfg)?;
    let ctx = AppContext {
        client: &client,
        config: &cfg,
        config_path: &config_path,
        format: args
            .format
            .as_deref()
            .map(OutputFormat::from_string)
            .unwrap_or(OutputFormat::Colored),
        no_color: args.nc,
    };

    command.into_command().execute(&ctx)
}
