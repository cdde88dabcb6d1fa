//! Stream transport, the default output
//!
//! Writes one line per record:
//!
//! ```text
//! 2011-07-05 13:05:09 info:     (server.rs/listen) listening on 8080
//! ```

use crate::core::{Initialize, LogRecord, Logger, LoggerError, Result, Transport};
use std::io::{self, Write};

/// Writes records to stdout or any other `Write` sink.
pub struct StreamTransport {
    stream: Box<dyn Write + Send>,
    is_stdout: bool,
    closed: bool,
}

impl StreamTransport {
    pub fn stdout() -> Self {
        Self {
            stream: Box::new(io::stdout()),
            is_stdout: true,
            closed: false,
        }
    }

    pub fn new<W: Write + Send + 'static>(stream: W) -> Self {
        Self {
            stream: Box::new(stream),
            is_stdout: false,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Render a record as a single output line.
    pub fn render(record: &LogRecord<'_>) -> String {
        format!(
            "{} {} ({}) {}\n",
            record.stamp,
            record.prefix(),
            record.namespace,
            record.message()
        )
    }
}

impl Default for StreamTransport {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Transport for StreamTransport {
    fn name(&self) -> &str {
        "stream"
    }

    /// Closed streams swallow records silently.
    fn write(&mut self, record: &LogRecord<'_>) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.stream
            .write_all(Self::render(record).as_bytes())
            .map_err(|e| LoggerError::io_operation("writing log line", "stream transport", e))
    }

    /// Flushes the stream. Stdout stays open and writable; any other stream is
    /// released and further records are dropped.
    fn close(&mut self) -> Result<()> {
        self.stream.flush()?;
        if !self.is_stdout {
            self.stream = Box::new(io::sink());
            self.closed = true;
        }
        Ok(())
    }
}

/// Options for [`Logger::use_transport::<StreamTransport>`](Logger::use_transport).
#[derive(Default)]
pub struct StreamOptions {
    /// Output sink; stdout when `None`
    pub stream: Option<Box<dyn Write + Send>>,
}

impl StreamOptions {
    pub fn stdout() -> Self {
        Self::default()
    }

    pub fn writer<W: Write + Send + 'static>(stream: W) -> Self {
        Self {
            stream: Some(Box::new(stream)),
        }
    }
}

impl Initialize for StreamTransport {
    type Options = StreamOptions;

    fn initialize(_logger: &Logger, options: StreamOptions) -> Result<Self> {
        Ok(match options.stream {
            Some(stream) => Self {
                stream,
                is_stdout: false,
                closed: false,
            },
            None => Self::stdout(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Arg, Callsite, Environment, LogLevel, Namespace};
    use chrono::Local;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_record<R>(f: impl FnOnce(&LogRecord<'_>) -> R) -> R {
        let namespace: Namespace = ["server.rs", "listen"].into_iter().collect();
        let args = vec![Arg::from("listening on %d"), Arg::from(8080)];
        let callsite = Callsite::new("src/server.rs", 20);
        let record = LogRecord {
            level: LogLevel::Info,
            namespace: &namespace,
            args: &args,
            filename: Some("server.rs"),
            callsite: Some(&callsite),
            environment: Environment::Production,
            stamp: "2011-07-05 13:05:09",
            time: Local::now(),
        };
        f(&record)
    }

    #[test]
    fn test_line_format() {
        let line = with_record(StreamTransport::render);
        assert_eq!(
            line,
            "2011-07-05 13:05:09 info: (server.rs/listen) listening on 8080\n"
        );
    }

    #[test]
    fn test_writes_to_custom_stream() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut transport = StreamTransport::new(buffer.clone());

        with_record(|record| transport.write(record))?;
        with_record(|record| transport.write(record))?;

        assert_eq!(buffer.contents().lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_closed_stream_drops_records() -> Result<()> {
        let buffer = SharedBuffer::default();
        let mut transport = StreamTransport::new(buffer.clone());

        transport.close()?;
        assert!(transport.is_closed());

        with_record(|record| transport.write(record))?;
        assert!(buffer.contents().is_empty());
        Ok(())
    }

    #[test]
    fn test_stdout_survives_close() -> Result<()> {
        let mut transport = StreamTransport::stdout();
        transport.close()?;
        assert!(!transport.is_closed());
        Ok(())
    }

    #[test]
    fn test_write_failure_is_returned() {
        let mut transport = StreamTransport::new(BrokenPipe);
        let result = with_record(|record| transport.write(record));
        assert!(matches!(result, Err(LoggerError::IoOperation { .. })));
    }

    #[test]
    fn test_initialize_from_options() -> Result<()> {
        let logger = Logger::builder().base(false).build();
        let buffer = SharedBuffer::default();

        logger.use_transport::<StreamTransport>(StreamOptions::writer(buffer.clone()));
        assert!(logger.has::<StreamTransport>());

        logger.set("env", "production").set("timestamp", false);
        logger.warning(("cache", "evicted %s entries", 12))?;

        assert_eq!(buffer.contents(), " warning: (stream.rs/cache) evicted 12 entries\n");
        Ok(())
    }
}
