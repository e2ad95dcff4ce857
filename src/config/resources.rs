//! Resource bundle lookup and registration
//!
//! Installed builds find the bundle at `<prefix>/share/<app id>/resources.gresource`,
//! where `<prefix>` is the parent of the directory holding the executable.
//! Debug builds additionally fall back to the bundle compiled by `build.rs`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use gtk::gio;
use tracing::{debug, info};

use crate::config::APP_ID;
use crate::error::{KeepMeAwakeError, Result};

/// File name of the compiled resource bundle.
pub const RESOURCE_FILE_NAME: &str = "resources.gresource";

/// The bundle compiled into the build directory.
#[cfg(debug_assertions)]
const BUILD_DIR_RESOURCES: &str = concat!(env!("OUT_DIR"), "/resources.gresource");

static REGISTERED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// All paths to look for the resource bundle at, in lookup order.
pub fn resource_candidates(executable: Option<&Path>, app_id: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(prefix) = executable.and_then(Path::parent).and_then(Path::parent) {
        candidates.push(prefix.join("share").join(app_id).join(RESOURCE_FILE_NAME));
    }
    #[cfg(debug_assertions)]
    candidates.push(PathBuf::from(BUILD_DIR_RESOURCES));
    candidates
}

/// Return the first candidate which exists.
pub fn locate_resources(candidates: &[PathBuf]) -> Result<&Path> {
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .map(PathBuf::as_path)
        .ok_or_else(|| KeepMeAwakeError::ResourceNotFound {
            searched: candidates.to_vec(),
        })
}

/// Load the resource bundle at `path` and register it process-wide.
fn register_resource_file(path: &Path) -> Result<()> {
    debug!("Loading and registering resource {}", path.display());
    let resource = gio::Resource::load(path).map_err(|source| KeepMeAwakeError::ResourceLoad {
        path: path.to_path_buf(),
        source,
    })?;
    gio::resources_register(&resource);
    Ok(())
}

/// Locate, load and register the resource bundle of this application.
///
/// Registration happens at most once per process; later calls return
/// immediately.
pub fn load_and_register_resources() -> Result<()> {
    // Held across registration, so concurrent callers register only once
    let mut registered = REGISTERED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(path) = registered.as_deref() {
        debug!("Resources already registered from {}", path.display());
        return Ok(());
    }

    let executable = std::env::current_exe().ok();
    let candidates = resource_candidates(executable.as_deref(), APP_ID);
    let path = locate_resources(&candidates)?;
    register_resource_file(path)?;
    info!("Registered resources from {}", path.display());
    *registered = Some(path.to_path_buf());
    Ok(())
}

/// The bundle registered by [`load_and_register_resources`], if any.
pub fn registered_resources() -> Option<PathBuf> {
    REGISTERED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
