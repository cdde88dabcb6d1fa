//! Main logger implementation

use super::{
    args::{Arg, IntoArgs},
    callsite::Callsite,
    config::{Environment, LoggerConfig, Setting},
    error::{LoggerError, Result},
    events::{Event, EventEmitter, Listener, SETTINGS_PREFIX, TRANSPORT_ERROR},
    format,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    namespace,
    suppression::SuppressionSet,
    timestamp,
    transport::{self, Initialize, LogRecord, Transport},
};
use crate::transports::StreamTransport;
use chrono::{DateTime, Local, TimeZone};
use parking_lot::{Mutex, RwLock};
use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Short, path-free name of a type, without generic arguments.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

thread_local! {
    /// Loggers whose transport registry is locked by this thread.
    static DISPATCHING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks the current thread as dispatching for one logger until dropped.
struct DispatchGuard(usize);

impl DispatchGuard {
    fn enter(logger: &Logger) -> Self {
        let id = logger.id();
        DISPATCHING.with(|active| active.borrow_mut().push(id));
        DispatchGuard(id)
    }

    fn active(logger: &Logger) -> bool {
        let id = logger.id();
        DISPATCHING.with(|active| active.borrow().contains(&id))
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(index) = active.iter().rposition(|&id| id == self.0) {
                active.remove(index);
            }
        });
    }
}

/// A call made from inside a transport, replayed once the registry is free.
struct Deferred {
    level: LogLevel,
    callsite: Option<Callsite>,
    args: Vec<Arg>,
}

/// Generates one method per level. Every method captures its caller's
/// location when the level is within the namespacing threshold.
macro_rules! level_methods {
    ($($name:ident => $level:ident),* $(,)?) => {
        $(
            #[doc = concat!("Log at the `", stringify!($name), "` level.")]
            #[track_caller]
            #[inline]
            pub fn $name<A: IntoArgs>(&self, args: A) -> Result<&Self> {
                self.at(LogLevel::$level, args)
            }
        )*
    };
}

/// A logger dispatching records to its transports.
///
/// # Example
///
/// ```
/// use devnull_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .base(false)
///     .level(LogLevel::Info)
///     .build();
///
/// logger.info(("db", "connected to %s", "primary"))?;
/// logger.debug("dropped, debug is above the level threshold")?;
/// assert_eq!(logger.calls(), 1);
/// # Ok::<(), devnull_logger::LoggerError>(())
/// ```
pub struct Logger {
    config: RwLock<LoggerConfig>,
    transports: Mutex<Vec<Box<dyn Transport>>>,
    deferred: Mutex<Vec<Deferred>>,
    silencing: RwLock<SuppressionSet>,
    events: EventEmitter,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger with the default configuration and a stdout stream transport.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Logger configured from a JSON object such as
    /// `{"level": 3, "env": "production"}`.
    ///
    /// Unknown keys and values of the wrong type are ignored.
    #[must_use]
    pub fn with_options(options: &serde_json::Value) -> Self {
        Self::builder().options(options).build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    level_methods! {
        alert => Alert,
        critical => Critical,
        error => Error,
        warning => Warning,
        metric => Metric,
        notice => Notice,
        info => Info,
        log => Log,
        debug => Debug,
    }

    /// Log at `level`, capturing the caller's location.
    #[track_caller]
    pub fn at<A: IntoArgs>(&self, level: LogLevel, args: A) -> Result<&Self> {
        let Some(namespaced) = self.admit(level) else {
            return Ok(self);
        };

        let callsite = if namespaced {
            Some(Callsite::from(Location::caller()))
        } else {
            None
        };
        self.write(level, callsite, args.into_args())
    }

    /// Log at `level` with an already captured callsite.
    ///
    /// This is what the logging macros call; the callsite is discarded when
    /// `level` is outside the namespacing threshold.
    pub fn at_callsite<A: IntoArgs>(
        &self,
        level: LogLevel,
        callsite: impl Into<Option<Callsite>>,
        args: A,
    ) -> Result<&Self> {
        let Some(namespaced) = self.admit(level) else {
            return Ok(self);
        };

        let callsite = callsite.into().filter(|_| namespaced);
        self.write(level, callsite, args.into_args())
    }

    /// Whether calls at `level` pass the level threshold.
    pub fn allows(&self, level: LogLevel) -> bool {
        self.config.read().allows(level)
    }

    /// Level check. `None` when the call is filtered out, otherwise whether
    /// the callsite should be kept.
    fn admit(&self, level: LogLevel) -> Option<bool> {
        let config = self.config.read();
        if !config.allows(level) {
            drop(config);
            self.metrics.record_filtered();
            return None;
        }
        Some(config.namespaces(level))
    }

    /// Dispatch one call to every transport.
    ///
    /// Calls from an ignored file return without writing, notifying or
    /// counting. The first transport error stops the fan-out and is returned.
    ///
    /// A call made by a transport while it is being written to is queued and
    /// dispatched as soon as the current fan-out finishes.
    pub fn write(
        &self,
        level: LogLevel,
        callsite: Option<Callsite>,
        args: Vec<Arg>,
    ) -> Result<&Self> {
        if DispatchGuard::active(self) {
            self.deferred.lock().push(Deferred {
                level,
                callsite,
                args,
            });
            return Ok(self);
        }

        let filename = callsite.as_ref().map(Callsite::filename);

        if let Some(callsite) = &callsite {
            if self
                .silencing
                .read()
                .is_ignored(&[callsite.filename(), callsite.path()])
            {
                self.metrics.record_suppressed();
                return Ok(self);
            }
        }

        let (namespace, args) = namespace::resolve(callsite.as_ref(), args, filename);

        let time = Local::now();
        let (environment, stamp, notify) = {
            let config = self.config.read();
            (
                config.env,
                Self::render_stamp(&config, &time),
                config.notifies(level),
            )
        };

        let record = LogRecord {
            level,
            namespace: &namespace,
            args: &args,
            filename,
            callsite: callsite.as_ref(),
            environment,
            stamp: &stamp,
            time,
        };

        let written = {
            let mut transports = self.transports.lock();
            let _guard = DispatchGuard::enter(self);
            transports
                .iter_mut()
                .try_for_each(|transport| transport.write(&record))
        };
        self.replay_deferred();

        if let Err(e) = written {
            self.metrics.record_transport_failure();
            return Err(e);
        }

        if notify && self.events.has_listeners(level.name()) {
            self.metrics.record_notification();
            let payload = Event::Log {
                level,
                args: &args,
                callsite: callsite.as_ref(),
            };
            self.events.emit(level.name(), &payload);
        }

        self.metrics.record_call();
        Ok(self)
    }

    /// Dispatch calls queued by transports during a fan-out.
    fn replay_deferred(&self) {
        loop {
            let pending = std::mem::take(&mut *self.deferred.lock());
            if pending.is_empty() {
                return;
            }
            for Deferred {
                level,
                callsite,
                args,
            } in pending
            {
                if let Err(e) = self.write(level, callsite, args) {
                    eprintln!("[LOGGER ERROR] Queued {} call failed: {}", level, e);
                }
            }
        }
    }

    fn id(&self) -> usize {
        self as *const Self as usize
    }

    /// Stamp for the current time, empty when timestamps are disabled.
    pub fn stamp(&self) -> String {
        self.stamp_at(&Local::now())
    }

    pub fn stamp_at<Tz>(&self, instant: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self::render_stamp(&self.config.read(), instant)
    }

    fn render_stamp<Tz>(config: &LoggerConfig, instant: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if config.timestamp {
            timestamp::render(&config.pattern, instant)
        } else {
            String::new()
        }
    }

    /// Render `args` the way transports render messages.
    pub fn format(&self, args: &[Arg]) -> String {
        format::format(args)
    }

    // Transports

    /// Build a `T` from `options` and register it.
    ///
    /// Initialization failures are reported through the `transport:error`
    /// event and leave the registry untouched.
    pub fn use_transport<T: Initialize>(&self, options: T::Options) -> &Self {
        match T::initialize(self, options) {
            Ok(transport) => self.transports.lock().push(Box::new(transport)),
            Err(error) => self.report_transport_error(short_type_name::<T>(), &error),
        }
        self
    }

    /// Register an already built transport.
    pub fn add_transport<T: Transport>(&self, transport: T) -> &Self {
        self.transports.lock().push(Box::new(transport));
        self
    }

    /// Whether a transport of type `T` is registered.
    pub fn has<T: Transport>(&self) -> bool {
        self.transports
            .lock()
            .iter()
            .any(|t| transport::is::<T>(&**t))
    }

    /// Run `f` on the first registered `T`.
    ///
    /// Calls logged through this logger while `f` runs are dispatched after it
    /// returns.
    pub fn with_transport<T: Transport, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let result = {
            let mut transports = self.transports.lock();
            let _guard = DispatchGuard::enter(self);
            transports
                .iter_mut()
                .find_map(|t| transport::downcast_mut::<T>(&mut **t))
                .map(f)
        };
        self.replay_deferred();
        result
    }

    /// Close and unregister the first transport of type `T`.
    pub fn remove<T: Transport>(&self) -> &Self {
        let removed = {
            let mut transports = self.transports.lock();
            transports
                .iter()
                .position(|t| transport::is::<T>(&**t))
                .map(|index| transports.remove(index))
        };

        if let Some(mut transport) = removed {
            if let Err(error) = transport.close() {
                self.report_transport_error(transport.name(), &error);
            }
        }
        self
    }

    /// Names of the registered transports, in dispatch order.
    pub fn transport_names(&self) -> Vec<String> {
        self.transports
            .lock()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    pub fn transport_count(&self) -> usize {
        self.transports.lock().len()
    }

    fn report_transport_error(&self, transport: &str, error: &LoggerError) {
        let payload = Event::TransportError { transport, error };
        if !self.events.emit(TRANSPORT_ERROR, &payload) {
            eprintln!("[LOGGER ERROR] Transport '{}': {}", transport, error);
        }
    }

    // Silencing

    /// Drop every call made from files matching `glob`.
    pub fn ignore(&self, glob: &str) -> Result<&Self> {
        self.silencing.write().ignore(glob)?;
        Ok(self)
    }

    /// Lift every ignore pattern matching `candidate`.
    pub fn unignore(&self, candidate: &str) -> &Self {
        self.silencing.write().unignore(candidate);
        self
    }

    /// Compiled ignore patterns, in insertion order.
    pub fn ignoring(&self) -> Vec<String> {
        self.silencing
            .read()
            .patterns()
            .map(str::to_string)
            .collect()
    }

    // Events

    /// Subscribe to `event`: a level name, `settings:<key>` or
    /// `transport:error`.
    pub fn on<F>(&self, event: impl Into<String>, listener: F) -> &Self
    where
        F: Fn(&Event<'_>) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.events.on(event, listener);
        self
    }

    /// Remove every listener of `event`. Returns how many were removed.
    pub fn off(&self, event: &str) -> usize {
        self.events.off(event)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.events.listener_count(event)
    }

    // Settings

    /// Update a configuration key.
    ///
    /// Emits `settings:<key>` when the stored value changed. Unknown keys and
    /// mismatched value types are ignored.
    pub fn set(&self, key: &str, value: impl Into<Setting>) -> &Self {
        let value = value.into();
        let changed = self.config.write().set(key, value.clone());

        if changed {
            let event = format!("{}{}", SETTINGS_PREFIX, key);
            self.events.emit(&event, &Event::Setting { key, value: &value });
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<Setting> {
        self.config.read().get(key)
    }

    /// Whether `key` holds a truthy value.
    pub fn enabled(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| value.is_truthy())
    }

    pub fn disabled(&self, key: &str) -> bool {
        !self.enabled(key)
    }

    pub fn enable(&self, key: &str) -> &Self {
        self.set(key, true)
    }

    pub fn disable(&self, key: &str) -> &Self {
        self.set(key, false)
    }

    /// Run `f` when the logger's environment is one of `envs`.
    ///
    /// An empty `envs` matches every environment.
    ///
    /// # Example
    ///
    /// ```
    /// use devnull_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .base(false)
    ///     .environment(Environment::Production)
    ///     .build();
    ///
    /// logger
    ///     .configure(&[Environment::Production], |logger| {
    ///         logger.set("level", LogLevel::Warning);
    ///     })
    ///     .configure(&[Environment::Development], |logger| {
    ///         logger.set("level", LogLevel::Debug);
    ///     });
    ///
    /// assert_eq!(logger.get("level").and_then(|v| v.as_int()), Some(3));
    /// ```
    pub fn configure(&self, envs: &[Environment], f: impl FnOnce(&Self)) -> &Self {
        let env = self.config.read().env;
        if envs.is_empty() || envs.contains(&env) {
            f(self);
        }
        self
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    pub fn environment(&self) -> Environment {
        self.config.read().env
    }

    /// Number of calls that reached every transport.
    pub fn calls(&self) -> u64 {
        self.metrics.calls()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use devnull_logger::Logger;
    ///
    /// let logger = Logger::builder().base(false).build();
    ///
    /// // After logging operations...
    /// let metrics = logger.metrics();
    /// println!("Calls: {}", metrics.calls());
    /// println!("Suppressed: {}", metrics.suppressed());
    /// println!("Suppression rate: {:.2}%", metrics.suppression_rate());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.config.read())
            .field("transports", &self.transport_names())
            .field("silencing", &self.ignoring())
            .field("events", &self.events)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let transports = std::mem::take(self.transports.get_mut());
        for mut transport in transports {
            if let Err(error) = transport.close() {
                self.report_transport_error(transport.name(), &error);
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use devnull_logger::prelude::*;
/// use serde_json::json;
///
/// let logger = Logger::builder()
///     .environment(Environment::Production)
///     .level(LogLevel::Info)
///     .notification(LogLevel::Error)
///     .pattern("{toISOString}")
///     .ignore("generated_*.rs")
///     .options(&json!({ "timestamp": false }))
///     .build();
///
/// assert!(logger.disabled("timestamp"));
/// assert!(logger.has::<StreamTransport>());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    patterns: Vec<String>,
    lists: Vec<String>,
    transports: Vec<Box<dyn Transport>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            patterns: Vec::new(),
            lists: Vec::new(),
            transports: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.env = env;
        self
    }

    /// Drop calls less severe than `level`
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level.rank();
        self
    }

    /// Emit level events for calls at least as severe as `level`
    #[must_use = "builder methods return a new value"]
    pub fn notification(mut self, level: LogLevel) -> Self {
        self.config.notification = level.rank();
        self
    }

    /// Capture callsites for calls at least as severe as `level`
    #[must_use = "builder methods return a new value"]
    pub fn namespacing(mut self, level: LogLevel) -> Self {
        self.config.namespacing = level.rank();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.config.timestamp = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    /// Whether the stdout stream transport is installed
    #[must_use = "builder methods return a new value"]
    pub fn base(mut self, enabled: bool) -> Self {
        self.config.base = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn ignore(mut self, glob: impl Into<String>) -> Self {
        self.patterns.push(glob.into());
        self
    }

    /// Ignore every whitespace or comma separated pattern in `raw`
    #[must_use = "builder methods return a new value"]
    pub fn ignore_list(mut self, raw: impl Into<String>) -> Self {
        self.lists.push(raw.into());
        self
    }

    /// Read an ignore list from the environment variable `var`, if set
    #[must_use = "builder methods return a new value"]
    pub fn ignore_from_env(mut self, var: &str) -> Self {
        if let Ok(raw) = std::env::var(var) {
            self.lists.push(raw);
        }
        self
    }

    /// Apply a JSON object of settings
    ///
    /// Unknown keys and values of the wrong type are ignored.
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: &serde_json::Value) -> Self {
        self.config.apply_json(options);
        self
    }

    /// Register a transport after the default one
    #[must_use = "builder methods return a new value"]
    pub fn transport<T: Transport>(mut self, transport: T) -> Self {
        self.transports.push(Box::new(transport));
        self
    }

    /// Build the Logger
    ///
    /// Ignore patterns that fail to compile are reported on stderr and
    /// skipped.
    pub fn build(self) -> Logger {
        let mut silencing = SuppressionSet::new();
        for glob in &self.patterns {
            if let Err(e) = silencing.ignore(glob) {
                eprintln!("[LOGGER WARNING] Skipping ignore pattern: {}", e);
            }
        }
        for raw in &self.lists {
            if let Err(e) = silencing.seed(raw) {
                eprintln!("[LOGGER WARNING] Skipping ignore list: {}", e);
            }
        }

        let mut transports: Vec<Box<dyn Transport>> = Vec::new();
        if self.config.base {
            transports.push(Box::new(StreamTransport::stdout()));
        }
        transports.extend(self.transports);

        Logger {
            config: RwLock::new(self.config),
            transports: Mutex::new(transports),
            deferred: Mutex::new(Vec::new()),
            silencing: RwLock::new(silencing),
            events: EventEmitter::new(),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
