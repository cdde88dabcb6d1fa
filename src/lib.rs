//! # dev/null logger
//!
//! A structured logging front-end. Log calls are tagged with one of nine
//! severity levels, stamped, given a namespace derived from where they were
//! made, and dispatched to any number of transports.
//!
//! ## Features
//!
//! - **Levels**: `alert`, `critical`, `error`, `warning`, `metric`, `notice`,
//!   `info`, `log` and `debug`, each with its own method and macro
//! - **printf-style messages**: `%s`, `%d`, `%j` and `%%`
//! - **Namespaces**: source file plus calling functions, or an explicit name
//! - **Notifications**: subscribe to severe records, setting changes and
//!   transport failures
//! - **Silencing**: glob patterns that mute noisy source files
//! - **Transports**: stdout stream by default, JSON lines, or your own
//!
//! ```
//! use devnull_logger::prelude::*;
//!
//! let logger = Logger::builder()
//!     .environment(Environment::Production)
//!     .notification(LogLevel::Error)
//!     .build();
//!
//! logger.on("error", |event: &Event<'_>| {
//!     if let Event::Log { args, .. } = event {
//!         eprintln!("paging on-call: {:?}", args);
//!     }
//! });
//!
//! logger.info(("http", "listening on %s:%d", "0.0.0.0", 8080))?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod bridge;
pub mod core;
pub mod macros;
pub mod transports;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use crate::core::{
        Arg, Callsite, Environment, Event, Initialize, IntoArgs, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Namespace, Result, Setting, Transport,
    };
    pub use crate::transports::{JsonOptions, JsonTransport, StreamOptions, StreamTransport};
}

pub use crate::core::{
    format, Arg, AsAny, Callsite, Environment, Event, EventEmitter, Frame, Initialize, IntoArgs,
    Listener, LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Namespace, Result, Setting, SuppressionSet, Transport, DEFAULT_PATTERN,
    SETTINGS_PREFIX, TRANSPORT_ERROR,
};
pub use bridge::LogBridge;
pub use transports::{JsonOptions, JsonTransport, StreamOptions, StreamTransport};
