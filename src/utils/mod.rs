//! Utility modules
//!
//! Provides logging setup.

pub mod logging;

pub use logging::{init_logging, start_log_file};
