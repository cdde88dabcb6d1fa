//! Transport implementations

pub mod json;
pub mod stream;

pub use json::{JsonOptions, JsonTransport};
pub use stream::{StreamOptions, StreamTransport};

pub use crate::core::{Initialize, LogRecord, Transport};
