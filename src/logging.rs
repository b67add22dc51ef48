// File logging. The terminal belongs to the interactive menus, so every
// tracing event goes to files under the log directory instead.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const LOG_FILE: &str = "gradient-cli.log";
pub const ERROR_FILE: &str = "errors.log";

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber: everything goes to `gradient-cli.log`,
/// errors are also copied to `errors.log`. `RUST_LOG` overrides the level.
pub fn init(dir: &Path, debug: bool) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let all = open_append(&dir.join(LOG_FILE))?;
    let errors = open_append(&dir.join(ERROR_FILE))?;

    let default_filter = if debug {
        "gradient_cli=debug,warn"
    } else {
        "gradient_cli=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(all)))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(errors))
                .with_filter(LevelFilter::ERROR),
        )
        .try_init()
        .context("Failed to install the log subscriber")?;
    Ok(())
}
