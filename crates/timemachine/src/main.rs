//! timemachine - a menu-driven time machine for your project
//!
//! Save checkpoints, browse them, roll back and sync with a remote without
//! learning version-control commands.

mod config;
mod executor;
mod logging;
mod runtime;
mod terminal;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use timemachine_git::{Gateway, GitGateway};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::runtime::Runtime;
use crate::terminal::TermGuard;

/// Checkpoints, history, rollback and sync for the project in PATH
#[derive(Parser)]
#[command(name = "timemachine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Write a debug log (also enabled by a non-empty DEBUG variable)
    #[arg(long)]
    debug: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let theme = config.theme()?;

    let debug_env = std::env::var("DEBUG").ok();
    if logging::debug_requested(cli.debug, debug_env.as_deref()) {
        logging::init(&config.debug.log_file)?;
    }

    let workdir = resolve_workdir(&cli.path)?;
    tracing::info!(workdir = %workdir.display(), remote = %config.sync.remote, "starting");

    let gateway: Arc<dyn Gateway> = Arc::new(GitGateway::new(workdir, config.gateway_config()));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("timemachine-worker")
        .build()
        .wrap_err("Failed to start async runtime")?;

    let result = {
        let (_guard, mut terminal) = TermGuard::enter().wrap_err("Failed to set up terminal")?;
        let (tx, mut rx) = mpsc::unbounded_channel();
        runtime::spawn_input(tx.clone(), config.tick_rate())
            .wrap_err("Failed to start input thread")?;
        let submitter = Runtime::new(gateway, config.ui.suggestions.clone(), tx);

        rt.block_on(runtime::run_loop(&mut terminal, &theme, &submitter, &mut rx))
    };

    // A hung gateway call must not keep the process alive after quitting
    rt.shutdown_background();
    tracing::info!("exiting");
    result.map(|_| ())
}

/// Resolves the project directory to an absolute path
fn resolve_workdir(path: &Path) -> Result<PathBuf> {
    if path.as_os_str() == "." {
        return std::env::current_dir().wrap_err("Failed to determine working directory");
    }
    path.canonicalize()
        .wrap_err_with(|| format!("Failed to resolve project directory {:?}", path))
}
