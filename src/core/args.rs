//! Opaque log arguments
//!
//! A log call carries an ordered list of [`Arg`]s. The formatter decides how
//! each one is rendered: the natural string form, a numeric coercion, JSON, or
//! the inspector used for objects and arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One argument of a log call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Structured data (objects, arrays or any other JSON value)
    Json(serde_json::Value),
}

impl Arg {
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Arg::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Objects and arrays are rendered through the inspector when they show
    /// up as trailing arguments.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Arg::Json(serde_json::Value::Array(_)) | Arg::Json(serde_json::Value::Object(_))
        )
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Arg::Text(s) => serde_json::Value::String(s.clone()),
            Arg::Int(i) => serde_json::Value::Number((*i).into()),
            Arg::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Arg::Bool(b) => serde_json::Value::Bool(*b),
            Arg::Null => serde_json::Value::Null,
            Arg::Json(value) => value.clone(),
        }
    }

    /// Numeric coercion used by `%d`.
    ///
    /// Text is trimmed and parsed as a float (empty text is zero), booleans
    /// become 1/0, null becomes 0 and anything unparsable is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Arg::Int(i) => *i as f64,
            Arg::Float(f) => *f,
            Arg::Bool(b) => f64::from(u8::from(*b)),
            Arg::Null => 0.0,
            Arg::Text(s) => parse_number(s),
            Arg::Json(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
            Arg::Json(serde_json::Value::Bool(b)) => f64::from(u8::from(*b)),
            Arg::Json(serde_json::Value::Null) => 0.0,
            Arg::Json(serde_json::Value::String(s)) => parse_number(s),
            Arg::Json(_) => f64::NAN,
        }
    }

    /// Developer-facing representation: strings are quoted, objects and
    /// arrays are spelled out as `{ key: value }` / `[ a, b ]`.
    pub fn inspect(&self) -> String {
        match self {
            Arg::Text(s) => quote(s),
            Arg::Int(i) => i.to_string(),
            Arg::Float(f) => number_to_string(*f),
            Arg::Bool(b) => b.to_string(),
            Arg::Null => "null".to_string(),
            Arg::Json(value) => inspect_json(value),
        }
    }
}

/// Natural string form, used by `%s` and for trailing primitives.
impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(s) => f.write_str(s),
            Arg::Int(i) => write!(f, "{}", i),
            Arg::Float(fl) => f.write_str(&number_to_string(*fl)),
            Arg::Bool(b) => write!(f, "{}", b),
            Arg::Null => f.write_str("null"),
            Arg::Json(serde_json::Value::String(s)) => f.write_str(s),
            Arg::Json(value) => write!(f, "{}", value),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Render a float the way script runtimes print numbers: integral values
/// without a fraction, `NaN` and `Infinity` spelled out.
pub(crate) fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn inspect_json(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(inspect_json).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    let key = if is_identifier(key) {
                        key.clone()
                    } else {
                        quote(key)
                    };
                    format!("{}: {}", key, inspect_json(value))
                })
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Text(s.clone())
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Int(i)
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg::Int(i as i64)
    }
}

impl From<u32> for Arg {
    fn from(i: u32) -> Self {
        Arg::Int(i as i64)
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        i64::try_from(i).map(Arg::Int).unwrap_or(Arg::Float(i as f64))
    }
}

impl From<u64> for Arg {
    fn from(i: u64) -> Self {
        i64::try_from(i).map(Arg::Int).unwrap_or(Arg::Float(i as f64))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Float(f)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Bool(b)
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        Arg::Json(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Arg::Null)
    }
}

/// Conversion of the value handed to a level method into its argument list.
///
/// Implemented for single values, tuples of up to six values and vectors, so
/// both `logger.info("hello")` and `logger.info(("db", "connected"))` work.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl IntoArgs for &[Arg] {
    fn into_args(self) -> Vec<Arg> {
        self.to_vec()
    }
}

impl IntoArgs for Arg {
    fn into_args(self) -> Vec<Arg> {
        vec![self]
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

macro_rules! into_args_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoArgs for $ty {
                fn into_args(self) -> Vec<Arg> {
                    vec![Arg::from(self)]
                }
            }
        )*
    };
}

into_args_single!(&str, String, &String, i32, i64, u32, u64, usize, f64, bool, serde_json::Value);

macro_rules! into_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Arg>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

into_args_tuple!(A);
into_args_tuple!(A, B);
into_args_tuple!(A, B, C);
into_args_tuple!(A, B, C, D);
into_args_tuple!(A, B, C, D, E);
into_args_tuple!(A, B, C, D, E, F);
