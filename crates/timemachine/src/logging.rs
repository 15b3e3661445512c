//! Debug logging to a file
//!
//! The terminal belongs to the UI, so nothing is logged unless debugging is
//! requested with `--debug` or a non-empty `DEBUG` environment variable.

use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const WORKSPACE_TARGETS: [&str; 4] = [
    "timemachine",
    "timemachine_core",
    "timemachine_git",
    "timemachine_ui",
];

/// Whether debug logging is on, given the flag and the `DEBUG` variable
pub fn debug_requested(flag: bool, env: Option<&str>) -> bool {
    flag || env.is_some_and(|value| !value.is_empty())
}

/// Filter used when `RUST_LOG` is unset: debug for the workspace crates only
fn default_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::new("warn");
    for target in WORKSPACE_TARGETS {
        filter = filter.add_directive(format!("{}=debug", target).parse()?);
    }
    Ok(filter)
}

/// Installs the global subscriber writing to `log_file`.
///
/// The file is appended to and stays open for the process lifetime.
pub fn init(log_file: &Path) -> Result<()> {
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .wrap_err_with(|| format!("Failed to open log file {:?}", log_file))?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("Failed to install logger: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "debug logging enabled");
    Ok(())
}
