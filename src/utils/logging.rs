//! Logging system initialization
//!
//! Sets up tracing-based logging to stderr at process start. The per-session
//! log file in `$XDG_STATE_HOME/keepmeawake/app.log` is attached later, by the
//! primary instance only: a second launch merely forwards its activation and
//! must leave the running instance's log alone. The file rotates whenever it
//! is attached, keeping the previous [`MAX_LOG_FILES`] sessions.
//!
//! GLib, GTK and libadwaita messages are forwarded into the same subscriber,
//! both structured ones and those logged through plain `g_log`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use glib::{LogField, LogLevel, LogWriterOutput};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};

use crate::config::{self, LOG_DOMAIN};
use crate::error::{KeepMeAwakeError, Result};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
pub const MAX_LOG_FILES: u8 = 9;

const LOG_FILE_PREFIX: &str = "app";
const LOG_FILE_SUFFIX: &str = "log";

/// Target of events forwarded from GLib's logging.
pub const GLIB_TARGET: &str = "glib";

type FileLayer = Option<Box<dyn Layer<Registry> + Send + Sync>>;

static LOG_FILE: OnceLock<LogFile> = OnceLock::new();

/// Default filter directives if `RUST_LOG` is not set.
///
/// Everything else stays at `warn`; our own domain logs at `info`, or at
/// `debug` in development builds.
pub fn default_filter(development: bool) -> String {
    let level = if development { "debug" } else { "info" };
    format!("warn,{LOG_DOMAIN}={level}")
}

/// Directory for log files.
///
/// Follows the XDG base directory spec: `$XDG_STATE_HOME` if set to an
/// absolute path, `$HOME/.local/state` otherwise.
pub fn log_directory(xdg_state_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    let state_home = xdg_state_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home.map(|h| Path::new(h).join(".local").join("state")))?;
    Some(state_home.join(LOG_DOMAIN))
}

/// Switch for the file layer of a subscriber.
///
/// The subscriber starts without a log file; [`LogFile::open_in`] rotates the
/// log directory and attaches the file, once.
pub struct LogFile {
    handle: reload::Handle<FileLayer, Registry>,
    opened: Arc<AtomicBool>,
}

impl LogFile {
    /// Whether the log file is attached.
    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    /// Rotate the logs in `log_dir` and attach a fresh `app.log`.
    ///
    /// Does nothing if a log file is already attached.
    pub fn open_in(&self, log_dir: PathBuf) -> Result<()> {
        if self.is_open() {
            tracing::debug!("Log file already attached");
            return Ok(());
        }

        let appender = open_log_file(log_dir)?;
        let layer: Box<dyn Layer<Registry> + Send + Sync> = Box::new(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false) // Disable ANSI colors for file output
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        );
        self.handle
            .reload(Some(layer))
            .map_err(|e| KeepMeAwakeError::Logging(Box::new(e)))?;
        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Build the subscriber: `filter`, a stderr layer, and a detached file layer.
fn subscriber(filter: EnvFilter) -> (impl tracing::Subscriber + Send + Sync + 'static, LogFile) {
    let (file_layer, handle) = reload::Layer::<FileLayer, Registry>::new(None);
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(filter)
        .with(console_layer);
    let log_file = LogFile {
        handle,
        opened: Arc::new(AtomicBool::new(false)),
    };
    (subscriber, log_file)
}

/// Initialize the logging system
///
/// Log level defaults to [`default_filter`] but can be configured via the
/// `RUST_LOG` environment variable. Logs go to stderr until
/// [`start_log_file`] attaches the log file.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config::is_development_build())));

    let (subscriber, log_file) = subscriber(filter);
    subscriber
        .try_init()
        .map_err(|e| KeepMeAwakeError::Logging(Box::new(e)))?;
    LOG_FILE
        .set(log_file)
        .map_err(|_| KeepMeAwakeError::Logging("Logging initialized twice".into()))?;

    // GTK and libadwaita log structured; plain g_log callers go through the
    // default handler
    glib::log_set_writer_func(glib_log_writer);
    glib::log_set_default_handler(glib::rust_log_handler);

    Ok(())
}

/// Attach the log file of this session.
///
/// Call this from the primary instance only. Without [`init_logging`] this
/// does nothing.
pub fn start_log_file() -> Result<()> {
    let Some(log_file) = LOG_FILE.get() else {
        return Ok(());
    };
    let xdg_state_home = std::env::var("XDG_STATE_HOME").ok();
    let home = std::env::var("HOME").ok();
    let log_dir = log_directory(xdg_state_home.as_deref(), home.as_deref())
        .ok_or_else(|| KeepMeAwakeError::Logging("Neither XDG_STATE_HOME nor HOME is set".into()))?;
    log_file.open_in(log_dir)
}

fn glib_log_writer(level: LogLevel, fields: &[LogField<'_>]) -> LogWriterOutput {
    let field = |key: &str| {
        fields
            .iter()
            .find(|field| field.key() == key)
            .and_then(LogField::value_str)
    };
    forward_glib_message(
        level,
        field("GLIB_DOMAIN").unwrap_or("default"),
        field("MESSAGE").unwrap_or_default(),
    );
    LogWriterOutput::Handled
}

/// Emit a GLib log message as tracing event below [`GLIB_TARGET`].
fn forward_glib_message(level: LogLevel, domain: &str, message: &str) {
    match level {
        LogLevel::Error | LogLevel::Critical => {
            tracing::error!(target: GLIB_TARGET, domain, "{message}");
        }
        LogLevel::Warning => tracing::warn!(target: GLIB_TARGET, domain, "{message}"),
        LogLevel::Message | LogLevel::Info => {
            tracing::info!(target: GLIB_TARGET, domain, "{message}");
        }
        LogLevel::Debug => tracing::debug!(target: GLIB_TARGET, domain, "{message}"),
    }
}

/// Create the log directory, rotate old logs, and open a fresh log file.
fn open_log_file(log_dir: PathBuf) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join(format!("{LOG_FILE_PREFIX}.{LOG_FILE_SUFFIX}"));
    rotate_logs_on_startup(&log_path)?;

    // Rotation is handled above, never by the appender itself
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .map_err(|e| KeepMeAwakeError::Logging(Box::new(e)))
}

/// Rotate log files on application startup
///
/// Shifts `app.log.N` to `app.log.N+1` for all existing history files,
/// dropping `app.log.9`, and moves `app.log` to `app.log.1`. The logger then
/// starts a fresh `app.log`.
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let (Some(log_dir), Some(log_name)) = (log_path.parent(), log_path.file_name()) else {
        return Err(KeepMeAwakeError::Logging(
            format!("Invalid log path {}", log_path.display()).into(),
        ));
    };
    let log_name = log_name.to_string_lossy();
    let numbered = |n: u8| log_dir.join(format!("{log_name}.{n}"));

    let oldest_log = numbered(MAX_LOG_FILES);
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = numbered(i);
        if current_log.exists() {
            std::fs::rename(&current_log, numbered(i + 1))?;
        }
    }

    std::fs::rename(log_path, numbered(1))?;
    Ok(())
}
