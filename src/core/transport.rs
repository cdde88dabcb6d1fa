//! Transport trait for log output destinations

use super::args::Arg;
use super::callsite::Callsite;
use super::config::Environment;
use super::error::Result;
use super::format::format;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::namespace::Namespace;
use chrono::{DateTime, Local};
use std::any::Any;

/// Everything a transport needs to render one log call.
///
/// Records are built once per call and handed to every transport in turn, so
/// transports never reach back into the logger.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub namespace: &'a Namespace,
    /// Arguments left after namespace resolution
    pub args: &'a [Arg],
    pub filename: Option<&'a str>,
    pub callsite: Option<&'a Callsite>,
    pub environment: Environment,
    /// Rendered stamp, empty when timestamps are disabled
    pub stamp: &'a str,
    pub time: DateTime<Local>,
}

impl LogRecord<'_> {
    /// Formatted message text.
    pub fn message(&self) -> String {
        format(self.args)
    }

    /// Level prefix for the record's environment.
    pub fn prefix(&self) -> String {
        self.level.prefix(self.environment)
    }

    pub fn line(&self) -> Option<u32> {
        self.callsite.map(Callsite::line)
    }
}

/// Downcasting support for registered transports.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// An output sink.
///
/// `write` errors are returned to whoever made the log call. `close` runs
/// once, when the transport is removed or the logger is dropped.
pub trait Transport: AsAny + Send {
    fn name(&self) -> &str;
    fn write(&mut self, record: &LogRecord<'_>) -> Result<()>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Transports that can be built by [`Logger::use_transport`].
pub trait Initialize: Transport + Sized {
    type Options;

    fn initialize(logger: &Logger, options: Self::Options) -> Result<Self>;
}

/// Whether `transport` is a `T`.
pub(crate) fn is<T: Transport>(transport: &(dyn Transport + 'static)) -> bool {
    AsAny::as_any(transport).is::<T>()
}

pub(crate) fn downcast_mut<'a, T: Transport>(
    transport: &'a mut (dyn Transport + 'static),
) -> Option<&'a mut T> {
    AsAny::as_any_mut(transport).downcast_mut::<T>()
}
