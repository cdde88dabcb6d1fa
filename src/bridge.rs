//! A bridge to forward records from the `log` crate to a [`Logger`].
//!
//! ```no_run
//! use devnull_logger::{bridge, Logger};
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new());
//! bridge::init(Arc::clone(&logger))?;
//!
//! log::warn!("disk almost full");
//! # Ok::<(), devnull_logger::LoggerError>(())
//! ```

use crate::core::{Arg, Callsite, LogLevel, Logger, Result};
use std::sync::Arc;

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// `log::Log` implementation backed by a shared [`Logger`].
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Callsite of a `log` record: its file and line, with the last segment
    /// of the target standing in for the function name.
    fn callsite(record: &log::Record<'_>) -> Option<Callsite> {
        let file = record.file()?;
        let callsite = Callsite::new(file, record.line().unwrap_or(0));

        match record.target().rsplit("::").next() {
            Some(name) if !name.is_empty() => Some(callsite.with_function(name)),
            _ => Some(callsite),
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.allows(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        let message = Arg::from(record.args().to_string());

        if let Err(e) = self
            .logger
            .at_callsite(level, Self::callsite(record), message)
        {
            eprintln!("[LOGGER ERROR] Failed to forward log record: {}", e);
        }
    }

    fn flush(&self) {}
}

/// Install a [`LogBridge`] as the global `log` logger.
///
/// The global maximum level is set to `Trace`; filtering happens in the
/// logger's own level threshold.
///
/// # Errors
///
/// Returns [`LoggerError::LoggerAlreadySet`](crate::LoggerError::LoggerAlreadySet)
/// when another global logger is installed.
pub fn init(logger: Arc<Logger>) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
