//! Core logger types and traits

pub mod args;
pub mod callsite;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod namespace;
pub mod suppression;
pub mod timestamp;
pub mod transport;

pub use args::{Arg, IntoArgs};
pub use callsite::{Callsite, Frame};
pub use config::{Environment, LoggerConfig, Setting};
pub use error::{LoggerError, Result};
pub use events::{Event, EventEmitter, Listener, SETTINGS_PREFIX, TRANSPORT_ERROR};
pub use format::format;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use namespace::Namespace;
pub use suppression::SuppressionSet;
pub use timestamp::DEFAULT_PATTERN;
pub use transport::{AsAny, Initialize, LogRecord, Transport};
