//! `robodata`: operator harness over the dataset pipeline.

mod cli;
mod commands;
mod error_fmt;

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;
use eyre::{Result, WrapErr};
use robodata_config::{Config, Logging};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::commands::{SplitOverrides, run_inspect, run_split};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = match &cli.config {
        Some(path) => robodata_config::load_config_file(path)?,
        None => Config::default(),
    };
    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    init_tracing(cli.json, &level, &cfg.logging)?;

    match cli.cmd {
        Commands::Split {
            paths,
            window,
            seed,
            train,
            validation,
            test,
            parallel,
        } => {
            let overrides = SplitOverrides {
                window,
                seed,
                train,
                validation,
                test,
                parallel,
            };
            run_split(&cfg, paths, &overrides, cli.json)?;
        }
        Commands::Inspect { path, window } => run_inspect(&cfg, &path, window, cli.json)?,
        Commands::CheckConfig => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "status": "ok", "traces": cfg.traces.len() })
                );
            } else {
                println!("Config OK ({} trace paths)", cfg.traces.len());
            }
        }
    }
    Ok(())
}

/// Console layer on stderr (stdout carries reports), plus an optional
/// rolling JSON file sink from `[logging]`. `RUST_LOG` wins over `level`.
fn init_tracing(json: bool, level: &str, logging: &Logging) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level).wrap_err_with(|| format!("invalid log level '{level}'"))?,
    };

    let console = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file = match logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file has no file name: {}", path.display()))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(())
}
