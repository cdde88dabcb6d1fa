//! Logger configuration
//!
//! The configuration is a closed set of named fields. It can be populated
//! from a JSON object (unknown keys and values of the wrong type are dropped)
//! and mutated one key at a time through [`LoggerConfig::set`].

use super::log_level::LogLevel;
use super::timestamp::DEFAULT_PATTERN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

/// Output environment; decides between colored and plain prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Development when stdout is a terminal, production otherwise.
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: '{}'", s)),
        }
    }
}

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Setting {
    fn type_name(&self) -> &'static str {
        match self {
            Setting::Bool(_) => "bool",
            Setting::Int(_) => "int",
            Setting::Text(_) => "text",
        }
    }

    /// Convert a JSON value; anything but booleans, integers and strings has
    /// no matching setting type.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Setting::Bool(*b)),
            serde_json::Value::Number(n) => n.as_i64().map(Setting::Int),
            serde_json::Value::String(s) => Some(Setting::Text(s.clone())),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Setting::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Setting::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Setting::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness: `false`, `0` and empty text are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Setting::Bool(b) => *b,
            Setting::Int(i) => *i != 0,
            Setting::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Bool(b) => write!(f, "{}", b),
            Setting::Int(i) => write!(f, "{}", i),
            Setting::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Setting {
    fn from(b: bool) -> Self {
        Setting::Bool(b)
    }
}

impl From<i64> for Setting {
    fn from(i: i64) -> Self {
        Setting::Int(i)
    }
}

impl From<i32> for Setting {
    fn from(i: i32) -> Self {
        Setting::Int(i64::from(i))
    }
}

impl From<u8> for Setting {
    fn from(i: u8) -> Self {
        Setting::Int(i64::from(i))
    }
}

impl From<&str> for Setting {
    fn from(s: &str) -> Self {
        Setting::Text(s.to_string())
    }
}

impl From<String> for Setting {
    fn from(s: String) -> Self {
        Setting::Text(s)
    }
}

impl From<Environment> for Setting {
    fn from(env: Environment) -> Self {
        Setting::Text(env.as_str().to_string())
    }
}

impl From<LogLevel> for Setting {
    fn from(level: LogLevel) -> Self {
        Setting::Int(i64::from(level.rank()))
    }
}

/// Configuration owned by a single logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Output environment
    pub env: Environment,
    /// Calls with a rank above this are dropped
    pub level: u8,
    /// Calls with a rank at or below this emit a notification event
    pub notification: u8,
    /// Calls with a rank at or below this capture their callsite
    pub namespacing: u8,
    /// Whether records are stamped
    pub timestamp: bool,
    /// Stamp template
    pub pattern: String,
    /// Whether the default stream transport is installed
    pub base: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            env: Environment::detect(),
            level: LogLevel::MAX_RANK,
            notification: LogLevel::Warning.rank(),
            namespacing: LogLevel::Debug.rank(),
            timestamp: true,
            pattern: DEFAULT_PATTERN.to_string(),
            base: true,
        }
    }
}

impl LoggerConfig {
    /// Names of every configurable field.
    pub const KEYS: [&'static str; 7] = [
        "env",
        "level",
        "notification",
        "namespacing",
        "timestamp",
        "pattern",
        "base",
    ];

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_known(key: &str) -> bool {
        Self::KEYS.contains(&key)
    }

    /// Current value of `key`, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<Setting> {
        let value = match key {
            "env" => Setting::from(self.env),
            "level" => Setting::from(self.level),
            "notification" => Setting::from(self.notification),
            "namespacing" => Setting::from(self.namespacing),
            "timestamp" => Setting::Bool(self.timestamp),
            "pattern" => Setting::Text(self.pattern.clone()),
            "base" => Setting::Bool(self.base),
            _ => return None,
        };
        Some(value)
    }

    /// Update `key` with `value`.
    ///
    /// Returns `true` only when the stored value actually changed. Unknown
    /// keys, values whose type does not match the field, thresholds outside
    /// `0..=255` and unknown environment names leave the configuration as it
    /// was.
    pub fn set(&mut self, key: &str, value: Setting) -> bool {
        let Some(current) = self.get(key) else {
            return false;
        };
        if current.type_name() != value.type_name() || current == value {
            return false;
        }

        match (key, value) {
            ("env", Setting::Text(s)) => match s.parse() {
                Ok(env) if env != self.env => self.env = env,
                _ => return false,
            },
            ("level", Setting::Int(i)) => match u8::try_from(i) {
                Ok(v) => self.level = v,
                Err(_) => return false,
            },
            ("notification", Setting::Int(i)) => match u8::try_from(i) {
                Ok(v) => self.notification = v,
                Err(_) => return false,
            },
            ("namespacing", Setting::Int(i)) => match u8::try_from(i) {
                Ok(v) => self.namespacing = v,
                Err(_) => return false,
            },
            ("timestamp", Setting::Bool(b)) => self.timestamp = b,
            ("pattern", Setting::Text(s)) => self.pattern = s,
            ("base", Setting::Bool(b)) => self.base = b,
            _ => return false,
        }
        true
    }

    /// Apply every recognised key of a JSON object.
    ///
    /// Returns the keys that changed. Non-object values are ignored.
    pub fn apply_json(&mut self, options: &serde_json::Value) -> Vec<String> {
        let Some(map) = options.as_object() else {
            return Vec::new();
        };

        map.iter()
            .filter_map(|(key, value)| {
                let setting = Setting::from_json(value)?;
                self.set(key, setting).then(|| key.clone())
            })
            .collect()
    }

    /// Whether `level` passes the level threshold.
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level.rank() <= self.level
    }

    #[inline]
    pub fn notifies(&self, level: LogLevel) -> bool {
        level.rank() <= self.notification
    }

    #[inline]
    pub fn namespaces(&self, level: LogLevel) -> bool {
        level.rank() <= self.namespacing
    }
}
