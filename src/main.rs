//! Keep Me Awake - keep your GNOME session from suspending or going idle

use anyhow::{Context, Result};
use keepmeawake::{config, utils};
use tracing::info;

/// Main entry point for the application
///
/// Initializes logging and hands the process arguments to the application.
fn main() -> Result<glib::ExitCode> {
    utils::init_logging().context("Failed to initialize logging system")?;
    info!(
        "{} v{} ({}) starting...",
        config::APPLICATION_NAME,
        config::CARGO_PKG_VERSION,
        config::APP_ID
    );

    let args: Vec<String> = std::env::args().collect();
    keepmeawake::run(&args).context("Failed to start application")
}
