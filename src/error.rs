//! Error types for Keep Me Awake
//!
//! The library reports failures through [`KeepMeAwakeError`]; the binary wraps
//! them with `anyhow` context at the entry point.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Keep Me Awake
#[derive(Debug, Error)]
pub enum KeepMeAwakeError {
    /// None of the candidate locations holds a resource bundle
    #[error("Resource bundle not found, searched: {}", display_paths(.searched))]
    ResourceNotFound {
        /// Every path that was checked, in lookup order
        searched: Vec<PathBuf>,
    },

    /// The resource bundle exists but GIO refused to load it
    #[error("Failed to load resource bundle {}: {source}", .path.display())]
    ResourceLoad {
        /// Path of the bundle
        path: PathBuf,
        /// Underlying GIO error
        #[source]
        source: glib::Error,
    },

    /// A UI template is not registered in the resource bundle
    #[error("UI template {path} is not registered: {source}")]
    TemplateMissing {
        /// Resource path of the template
        path: String,
        /// Underlying GIO error
        #[source]
        source: glib::Error,
    },

    /// The logging system could not be set up
    /// Preserves the underlying error source for full error chain transparency
    #[error("Failed to initialize logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Keep Me Awake operations
pub type Result<T> = std::result::Result<T, KeepMeAwakeError>;

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "<no candidates>".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
