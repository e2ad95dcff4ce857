//! Keep Me Awake - keep your GNOME session from suspending or going idle
//!
//! A small libadwaita application. [`app::run`] bootstraps the process:
//! it registers the bundled resources, then runs [`app::KeepMeAwakeApplication`],
//! which creates its main window on first activation and offers `app.quit`
//! and `app.about` menu actions. The user picks what to inhibit in the main
//! window; the [`app::Inhibitor`] holds the corresponding session inhibitor.

// Module declarations
pub mod app;
pub mod config;
pub mod error;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use app::run;
pub use error::{KeepMeAwakeError, Result};
