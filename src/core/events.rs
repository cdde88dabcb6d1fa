//! Notification events
//!
//! Observers subscribe to named events on a logger: one per level name
//! (`"warning"`, `"error"`, ...), `settings:<key>` for configuration changes
//! and `transport:error` for transports that could not be opened or closed.

use super::args::Arg;
use super::callsite::Callsite;
use super::config::Setting;
use super::error::LoggerError;
use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Event emitted for failing transports.
pub const TRANSPORT_ERROR: &str = "transport:error";

/// Prefix of configuration change events.
pub const SETTINGS_PREFIX: &str = "settings:";

/// Payload handed to listeners.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A record at or above the notification threshold
    Log {
        level: LogLevel,
        args: &'a [Arg],
        callsite: Option<&'a Callsite>,
    },
    /// A configuration key changed
    Setting { key: &'a str, value: &'a Setting },
    /// A transport failed outside of the write path
    TransportError {
        transport: &'a str,
        error: &'a LoggerError,
    },
}

/// Listener callback
///
/// # Example
///
/// ```
/// use devnull_logger::{Event, Listener};
/// use std::sync::Arc;
///
/// let listener: Listener = Arc::new(|event: &Event<'_>| {
///     if let Event::Log { args, .. } = event {
///         eprintln!("notified with {} args", args.len());
///     }
/// });
/// ```
pub type Listener = Arc<dyn Fn(&Event<'_>) + Send + Sync>;

/// Named listener lists.
#[derive(Default)]
pub struct EventEmitter {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, event: impl Into<String>, listener: Listener) {
        self.listeners
            .write()
            .entry(event.into())
            .or_default()
            .push(listener);
    }

    /// Remove every listener of `event`. Returns how many were removed.
    pub fn off(&self, event: &str) -> usize {
        self.listeners
            .write()
            .remove(event)
            .map_or(0, |removed| removed.len())
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, event: &str) -> bool {
        self.listener_count(event) > 0
    }

    /// Call every listener of `event` in subscription order.
    ///
    /// Listeners are cloned out before any of them runs, so a listener may
    /// subscribe or emit without deadlocking. Returns `false` when nobody was
    /// listening.
    pub fn emit(&self, event: &str, payload: &Event<'_>) -> bool {
        let listeners: Vec<Listener> = match self.listeners.read().get(event) {
            Some(listeners) if !listeners.is_empty() => listeners.clone(),
            _ => return false,
        };

        for listener in &listeners {
            listener(payload);
        }
        true
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self.listeners.read();
        let mut map = f.debug_map();
        for (event, list) in listeners.iter() {
            map.entry(event, &list.len());
        }
        map.finish()
    }
}
