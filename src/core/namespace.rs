//! Namespaces
//!
//! A namespace is the short, path-like label printed next to every record:
//! the source file followed by the functions the call came from, or by an
//! explicit name given as the first argument.
//!
//! Inferred function names run from the innermost frame outwards, so a call
//! in `inner` invoked from `outer` in `db.rs` is labelled `db.rs/inner/outer`.

use super::args::Arg;
use super::callsite::Callsite;
use serde::Serialize;
use std::fmt;

/// Number of frames that contribute function names.
const NAMESPACE_DEPTH: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn push(&mut self, segment: impl Into<String>) {
        self.0.push(segment.into());
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl<S: Into<String>> FromIterator<S> for Namespace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A first argument is an explicit namespace when more arguments follow and it
/// is a single word that is not a format string.
fn is_override(args: &[Arg]) -> bool {
    args.len() > 1
        && args[0]
            .as_text()
            .is_some_and(|first| !first.contains(' ') && !first.contains('%'))
}

/// Derive the namespace of a call and the arguments left to format.
///
/// Without a callsite the namespace is empty and `args` is returned as is.
/// An explicit namespace argument is taken out of `args` so it never reaches
/// the formatted message.
pub fn resolve(
    callsite: Option<&Callsite>,
    mut args: Vec<Arg>,
    filename: Option<&str>,
) -> (Namespace, Vec<Arg>) {
    let Some(callsite) = callsite else {
        return (Namespace::new(), args);
    };

    let mut namespace = Namespace::new();
    if let Some(filename) = filename {
        namespace.push(filename);
    }

    if is_override(&args) {
        if let Arg::Text(name) = args.remove(0) {
            namespace.push(name);
        }
        return (namespace, args);
    }

    callsite
        .frames()
        .iter()
        .take(NAMESPACE_DEPTH)
        .filter_map(|frame| frame.function.as_deref())
        .for_each(|name| namespace.push(name));

    (namespace, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::callsite::Frame;

    fn callsite() -> Callsite {
        Callsite::new("src/app/worker.rs", 10)
            .with_function("process")
            .with_frame(Frame::new("src/app/worker.rs", 40).with_function("run"))
            .with_frame(Frame::new("src/main.rs", 3).with_function("main"))
    }

    #[test]
    fn test_no_callsite_is_empty() {
        let args = vec![Arg::from("mymodule"), Arg::from("hello")];
        let (namespace, rest) = resolve(None, args.clone(), Some("worker.rs"));

        assert!(namespace.is_empty());
        assert_eq!(rest, args);
    }

    #[test]
    fn test_override_is_removed_from_args() {
        let callsite = callsite();
        let (namespace, rest) = resolve(
            Some(&callsite),
            vec![Arg::from("mymodule"), Arg::from("hello")],
            Some("worker.rs"),
        );

        assert_eq!(namespace.segments(), ["worker.rs", "mymodule"]);
        assert_eq!(rest, vec![Arg::from("hello")]);
    }

    #[test]
    fn test_override_without_filename() {
        let callsite = callsite();
        let (namespace, _) = resolve(
            Some(&callsite),
            vec![Arg::from("db"), Arg::from("up")],
            None,
        );
        assert_eq!(namespace.segments(), ["db"]);
    }

    #[test]
    fn test_sentences_and_formats_are_not_overrides() {
        let callsite = callsite();

        let (namespace, rest) = resolve(
            Some(&callsite),
            vec![Arg::from("foo bar"), Arg::from("ping")],
            Some("worker.rs"),
        );
        assert_eq!(namespace.segments(), ["worker.rs", "process", "run"]);
        assert_eq!(rest.len(), 2);

        let (_, rest) = resolve(
            Some(&callsite),
            vec![Arg::from("%s"), Arg::from("ping")],
            Some("worker.rs"),
        );
        assert_eq!(rest.len(), 2);

        let (_, rest) = resolve(Some(&callsite), vec![Arg::from("alone")], Some("worker.rs"));
        assert_eq!(rest.len(), 1);

        let (_, rest) = resolve(
            Some(&callsite),
            vec![Arg::from(42), Arg::from("ping")],
            Some("worker.rs"),
        );
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn test_inferred_path_uses_two_frames() {
        let callsite = callsite();
        let (namespace, _) = resolve(Some(&callsite), vec![Arg::from("hi there")], Some("worker.rs"));

        assert_eq!(namespace.segments(), ["worker.rs", "process", "run"]);
        assert_eq!(namespace.to_string(), "worker.rs/process/run");
    }

    #[test]
    fn test_anonymous_frames_are_skipped() {
        let callsite = Callsite::new("lib.rs", 1)
            .with_frame(Frame::new("lib.rs", 5).with_function("outer"));
        let (namespace, _) = resolve(Some(&callsite), vec![Arg::from("x y")], Some("lib.rs"));

        assert_eq!(namespace.segments(), ["lib.rs", "outer"]);
    }
}
