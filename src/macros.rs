//! Logging macros that record the enclosing function.
//!
//! Level methods only know the file and line they were called from. These
//! macros additionally capture the name of the function they expand in, so
//! namespaces read `server.rs/listen` instead of just `server.rs`.
//!
//! # Examples
//!
//! ```
//! use devnull_logger::prelude::*;
//! use devnull_logger::info;
//!
//! let logger = Logger::builder().base(false).build();
//!
//! // Basic logging
//! info!(logger, "Server started")?;
//!
//! // printf-style arguments
//! let port = 8080;
//! info!(logger, "Server listening on port %d", port)?;
//!
//! // Explicit namespace
//! info!(logger, "auth", "user %s logged in", "ada")?;
//! # Ok::<(), devnull_logger::LoggerError>(())
//! ```

/// Capture a [`Callsite`](crate::Callsite) naming the enclosing function.
///
/// # Examples
///
/// ```
/// use devnull_logger::callsite;
///
/// fn connect() -> devnull_logger::Callsite {
///     callsite!()
/// }
///
/// assert_eq!(connect().top().function.as_deref(), Some("connect"));
/// ```
#[macro_export]
macro_rules! callsite {
    () => {{
        fn probe() {}
        $crate::Callsite::from_probe(
            ::std::file!(),
            ::std::line!(),
            $crate::core::callsite::type_name_of(probe),
        )
    }};
}

/// Log at a runtime level.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::log_at;
/// log_at!(logger, LogLevel::Notice, "Simple message")?;
/// log_at!(logger, LogLevel::Error, "Error code: %d", 500)?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.at_callsite(
            $level,
            $crate::callsite!(),
            ::std::vec![$($crate::Arg::from($arg)),*],
        )
    };
}

/// Log an alert-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::alert;
/// alert!(logger, "Database unreachable")?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! alert {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Alert $(, $arg)*)
    };
}

/// Log a critical-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::critical;
/// critical!(logger, "Replica lag above %d seconds", 30)?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Critical $(, $arg)*)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::error;
/// error!(logger, "Failed to connect to %s", "primary")?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Error $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::warning;
/// warning!(logger, "Low disk space")?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Warning $(, $arg)*)
    };
}

/// Log a metric-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::metric;
/// metric!(logger, "request_ms=%d", 12)?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! metric {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Metric $(, $arg)*)
    };
}

/// Log a notice-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::notice;
/// notice!(logger, "Configuration reloaded")?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! notice {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Notice $(, $arg)*)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::info;
/// info!(logger, "Processing %d items", 100)?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Info $(, $arg)*)
    };
}

/// Log a log-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::log;
/// log!(logger, "Cache warmed")?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Log $(, $arg)*)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use devnull_logger::prelude::*;
/// # let logger = Logger::builder().base(false).build();
/// use devnull_logger::debug;
/// debug!(logger, "Counter value: %d", 10)?;
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $crate::log_at!($logger, $crate::LogLevel::Debug $(, $arg)*)
    };
}
