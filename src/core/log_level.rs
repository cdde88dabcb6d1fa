//! Log level definitions
//!
//! Nine levels ordered by importance. The rank is the numeric severity used by
//! every threshold in [`LoggerConfig`](super::LoggerConfig): lower ranks are
//! more severe, so a call passes a threshold when `rank <= threshold`.

use super::config::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Alert = 0,
    Critical = 1,
    Error = 2,
    Warning = 3,
    Metric = 4,
    Notice = 5,
    Info = 6,
    Log = 7,
    Debug = 8,
}

impl LogLevel {
    /// Every level, ordered by rank.
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Alert,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Metric,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Log,
        LogLevel::Debug,
    ];

    /// Rank of the least severe level.
    pub const MAX_RANK: u8 = LogLevel::Debug as u8;

    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(rank as usize).copied()
    }

    /// Lowercase level name, also used as the notification event name.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Alert => "alert",
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Metric => "metric",
            LogLevel::Notice => "notice",
            LogLevel::Info => "info",
            LogLevel::Log => "log",
            LogLevel::Debug => "debug",
        }
    }

    /// Output prefix for this level.
    ///
    /// Development prefixes are padded to a common width and colored (when the
    /// `console` feature is enabled); production prefixes stay plain so log
    /// files are free of escape codes.
    pub fn prefix(&self, env: Environment) -> String {
        match env {
            Environment::Production => format!("{}:", self.name()),
            Environment::Development => {
                let padded = format!("{:<9}", format!("{}:", self.name()));
                Self::colorize(padded, *self)
            }
        }
    }

    #[cfg(feature = "console")]
    fn colorize(text: String, level: LogLevel) -> String {
        use colored::Colorize;
        text.color(level.color_code()).to_string()
    }

    #[cfg(not(feature = "console"))]
    fn colorize(text: String, _level: LogLevel) -> String {
        text
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Alert | LogLevel::Critical | LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Metric => Green,
            LogLevel::Notice | LogLevel::Info => Cyan,
            LogLevel::Log | LogLevel::Debug => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alert" => Ok(LogLevel::Alert),
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "metric" => Ok(LogLevel::Metric),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "log" => Ok(LogLevel::Log),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
