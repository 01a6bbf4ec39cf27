use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use color_eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::DATA_FOLDER;

lazy_static::lazy_static! {
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Log file inside `data_folder`, or the working directory when there is none
fn default_log_path(data_folder: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match data_folder {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(dir.join(LOG_FILE.as_str()))
}

/// Initialize logging with custom path and/or level
///
/// Logs go to a file; the terminal belongs to the TUI. Without a path the file
/// lands in `$ACTIONTUI_DATA` or the working directory. `RUST_LOG` refines the
/// filter on top of the chosen default level.
pub fn init_with(custom_log_path: Option<PathBuf>, level: Option<tracing::Level>) -> Result<()> {
    let log_path = match custom_log_path {
        Some(path) => path,
        None => default_log_path(DATA_FOLDER.clone())?,
    };
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.unwrap_or(tracing::Level::WARN).into())
        .from_env_lossy();

    let log_file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(Mutex::new(log_file))
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
