//! Static configuration and environment detection
//!
//! Holds the identifiers baked into the binary at build time, the predicates
//! derived from them, and the loader for the application's resource bundle.

pub mod resources;

use std::path::Path;

pub use resources::load_and_register_resources;

/// The app id this application was built with.
///
/// Defaults to [`BASE_APP_ID`]; set `KEEPMEAWAKE_APP_ID` at build time to
/// override it, e.g. with `de.swsnr.keepmeawake.Devel` for development builds.
pub const APP_ID: &str = match option_env!("KEEPMEAWAKE_APP_ID") {
    Some(app_id) => app_id,
    None => BASE_APP_ID,
};

/// The app id of release builds.
///
/// Resource paths and the metainfo file are always named after this id, even
/// in development builds.
pub const BASE_APP_ID: &str = "de.swsnr.keepmeawake";

/// Human-readable application name.
pub const APPLICATION_NAME: &str = "Keep Me Awake";

/// Logging domain of this application.
///
/// Used as the tracing target prefix in the default log filter and as the
/// name of the log directory.
pub const LOG_DOMAIN: &str = "keepmeawake";

/// The Cargo package version.
pub const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base path of all resources in the resource bundle.
pub const RESOURCE_BASE_PATH: &str = "/de/swsnr/keepmeawake";

/// Flatpak creates this file at the root of every sandbox.
pub const SANDBOX_MARKER: &str = "/.flatpak-info";

/// Suffix which marks an app id as development build.
const DEVEL_SUFFIX: &str = ".Devel";

/// Whether `app_id` denotes a development build.
pub fn is_development(app_id: &str) -> bool {
    app_id.ends_with(DEVEL_SUFFIX)
}

/// Whether this binary is a development build.
pub fn is_development_build() -> bool {
    is_development(APP_ID)
}

/// Whether the app is running in flatpak.
pub fn running_in_flatpak() -> bool {
    sandbox_marker_present(Path::new(SANDBOX_MARKER))
}

/// Whether the sandbox `marker` exists right now.
///
/// Errors while checking (e.g. permission denied on a parent) count as absent.
pub fn sandbox_marker_present(marker: &Path) -> bool {
    marker.try_exists().unwrap_or_default()
}
