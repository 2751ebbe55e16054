//! Subscriber setup for panel hosts
//!
//! The panel only emits `tracing` events; where they end up is the host's
//! call. A full-screen UI wants [`LoggingMode::Silent`], a monitor running in
//! a terminal wants `Development`, and one feeding a log collector wants
//! `Json`.
//!
//! # Environment Variables
//!
//! - `POVLINE_LOG_MODE`: `silent`, `development`, `debug` or `json`
//! - `POVLINE_LOG_LEVEL`: filter directives, e.g. `povline_panel=debug`
//! - `RUST_LOG`: used when `POVLINE_LOG_LEVEL` is unset

use std::str::FromStr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoggingMode {
    #[default]
    Silent,
    /// One compact line per event on stderr, `info` and up
    Development,
    /// Multi-line events with thread ids and source locations, `debug` and up
    Debug,
    /// Newline-delimited JSON on stderr, `info` and up
    Json,
}

impl LoggingMode {
    fn default_filter(self) -> &'static str {
        match self {
            LoggingMode::Debug => "debug",
            _ => "info",
        }
    }
}

impl FromStr for LoggingMode {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" => Ok(LoggingMode::Silent),
            "development" | "dev" => Ok(LoggingMode::Development),
            "debug" => Ok(LoggingMode::Debug),
            "json" => Ok(LoggingMode::Json),
            other => Err(LoggingError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Unknown logging mode '{0}'")]
    UnknownMode(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Install a global subscriber for `mode`
///
/// Fails if another subscriber is already installed. `Silent` installs
/// nothing and always succeeds.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    if mode == LoggingMode::Silent {
        return Ok(());
    }
    if is_initialized() {
        return Err(LoggingError::Install(
            "a global subscriber is already installed".to_string(),
        ));
    }

    let filter = filter_for(mode);
    let installed = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => Registry::default()
            .with(filter)
            .with(fmt::layer().compact().with_target(false))
            .try_init(),
        LoggingMode::Debug => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LoggingMode::Json => Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

/// Install a subscriber chosen by `POVLINE_LOG_MODE`
///
/// An unset or unrecognised mode falls back to `Silent`.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = std::env::var("POVLINE_LOG_MODE")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    init_logging(mode)
}

fn filter_for(mode: LoggingMode) -> EnvFilter {
    let directives = std::env::var("POVLINE_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| mode.default_filter().to_string());
    EnvFilter::new(directives)
}

/// Whether some global subscriber is already installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}
