//! JSON transport for structured output

use crate::core::{
    Arg, Initialize, LogLevel, LogRecord, Logger, LoggerError, Namespace, Result, Transport,
};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One serialized record.
#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    timestamp: String,
    level: LogLevel,
    rank: u8,
    namespace: &'a Namespace,
    message: String,
    args: &'a [Arg],
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl<'a> JsonLine<'a> {
    fn from_record(record: &LogRecord<'a>) -> Self {
        Self {
            timestamp: record.time.to_rfc3339(),
            level: record.level,
            rank: record.level.rank(),
            namespace: record.namespace,
            message: record.message(),
            args: record.args,
            filename: record.filename,
            line: record.line(),
        }
    }
}

/// JSON file transport
///
/// Writes each record as a single-line JSON object (JSONL format), or as an
/// indented document when pretty printing is enabled.
pub struct JsonTransport {
    writer: Box<dyn Write + Send>,
    pretty: bool,
    closed: bool,
}

impl JsonTransport {
    /// Append to the file at `path`, creating it if needed
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_writer(BufWriter::new(Self::open(path.as_ref())?)))
    }

    /// Same as [`JsonTransport::new`] with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(path)?.pretty(true))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            pretty: false,
            closed: false,
        }
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn open(path: &Path) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening JSON log", path.display().to_string(), e)
            })
    }
}

impl Transport for JsonTransport {
    fn name(&self) -> &str {
        "json"
    }

    fn write(&mut self, record: &LogRecord<'_>) -> Result<()> {
        if self.closed {
            return Err(LoggerError::closed(self.name()));
        }

        let line = JsonLine::from_record(record);
        let json = if self.pretty {
            serde_json::to_string_pretty(&line)?
        } else {
            serde_json::to_string(&line)?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.writer.flush()?;
        Ok(())
    }
}

/// Options for [`Logger::use_transport::<JsonTransport>`](Logger::use_transport).
#[derive(Debug, Clone)]
pub struct JsonOptions {
    pub path: PathBuf,
    pub pretty: bool,
}

impl JsonOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Initialize for JsonTransport {
    type Options = JsonOptions;

    fn initialize(_logger: &Logger, options: JsonOptions) -> Result<Self> {
        Ok(Self::new(&options.path)?.pretty(options.pretty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Callsite, Environment};
    use chrono::Local;
    use std::fs;
    use tempfile::tempdir;

    fn write_one(transport: &mut JsonTransport, args: Vec<Arg>) -> Result<()> {
        let namespace: Namespace = ["auth.rs", "login"].into_iter().collect();
        let callsite = Callsite::new("src/auth.rs", 42);
        let record = LogRecord {
            level: LogLevel::Notice,
            namespace: &namespace,
            args: &args,
            filename: Some("auth.rs"),
            callsite: Some(&callsite),
            environment: Environment::Production,
            stamp: "",
            time: Local::now(),
        };
        transport.write(&record)
    }

    #[test]
    fn test_json_transport() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let mut transport = JsonTransport::new(&log_path)?;
        write_one(
            &mut transport,
            vec![
                Arg::from("user %s logged in"),
                Arg::from("ada"),
                Arg::from(serde_json::json!({ "id": 123 })),
            ],
        )?;
        transport.close()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: serde_json::Value = serde_json::from_str(content.trim())?;

        assert_eq!(parsed["level"], "notice");
        assert_eq!(parsed["rank"], 5);
        assert_eq!(parsed["namespace"], serde_json::json!(["auth.rs", "login"]));
        assert_eq!(parsed["message"], "user ada logged in { id: 123 }");
        assert_eq!(parsed["args"][2]["id"], 123);
        assert_eq!(parsed["filename"], "auth.rs");
        assert_eq!(parsed["line"], 42);
        assert!(parsed["timestamp"].is_string());

        Ok(())
    }

    #[test]
    fn test_json_transport_multiple_records() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");

        let mut transport = JsonTransport::new(&log_path)?;
        for i in 0..5 {
            write_one(&mut transport, vec![Arg::from("iteration"), Arg::from(i)])?;
        }
        transport.close()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        // Each line should be valid JSON
        for line in lines {
            let parsed: serde_json::Value = serde_json::from_str(line)?;
            assert!(parsed["message"].is_string());
            assert!(parsed["level"].is_string());
        }

        Ok(())
    }

    #[test]
    fn test_write_after_close_fails() -> Result<()> {
        let mut transport = JsonTransport::from_writer(Vec::new());
        transport.close()?;

        let result = write_one(&mut transport, vec![Arg::from("late")]);
        assert!(matches!(result, Err(LoggerError::TransportClosed { .. })));
        Ok(())
    }

    #[test]
    fn test_initialize_reports_missing_directory() {
        let dir = tempdir().unwrap();
        let logger = Logger::builder().base(false).build();

        let failed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = std::sync::Arc::clone(&failed);
        logger.on("transport:error", move |_event: &crate::core::Event<'_>| {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        });

        logger.use_transport::<JsonTransport>(JsonOptions::new(
            dir.path().join("missing").join("app.jsonl"),
        ));

        assert!(failed.load(std::sync::atomic::Ordering::SeqCst));
        assert!(!logger.has::<JsonTransport>());
    }
}
