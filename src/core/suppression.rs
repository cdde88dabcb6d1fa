//! File silencing
//!
//! Glob patterns naming source files whose log calls should be dropped.
//! `*` matches any run of characters; everything else is literal and the
//! whole candidate has to match.

use super::error::{LoggerError, Result};
use regex::Regex;

/// Compile a glob into an anchored regex.
fn compile(glob: &str) -> Result<Regex> {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*?");

    Regex::new(&format!("^{}$", body)).map_err(|e| LoggerError::pattern(glob, e))
}

/// Ordered set of compiled ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct SuppressionSet {
    patterns: Vec<Regex>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a raw list such as `"noisy.rs, vendor/*  gen_*.rs"`.
    pub fn from_list(raw: &str) -> Result<Self> {
        let mut set = Self::new();
        set.seed(raw)?;
        Ok(set)
    }

    /// Ignore every whitespace or comma separated pattern in `raw`.
    pub fn seed(&mut self, raw: &str) -> Result<()> {
        raw.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.ignore(token).map(|_| ()))
    }

    /// Add a pattern. Returns `false` when an identical pattern is present.
    pub fn ignore(&mut self, glob: &str) -> Result<bool> {
        let compiled = compile(glob)?;
        if self.patterns.iter().any(|p| p.as_str() == compiled.as_str()) {
            return Ok(false);
        }

        self.patterns.push(compiled);
        Ok(true)
    }

    /// Remove every pattern that matches `candidate`.
    ///
    /// Removal tests the candidate against the patterns rather than comparing
    /// pattern text, so `unignore("db.rs")` also lifts a `*.rs` pattern.
    /// Returns the number of patterns removed.
    pub fn unignore(&mut self, candidate: &str) -> usize {
        let before = self.patterns.len();
        self.patterns.retain(|p| !p.is_match(candidate));
        before - self.patterns.len()
    }

    /// Whether any candidate matches any pattern.
    pub fn is_ignored<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        candidates
            .iter()
            .any(|c| self.patterns.iter().any(|p| p.is_match(c.as_ref())))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Compiled pattern sources, in insertion order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_glob() {
        assert_eq!(compile("*.rs").unwrap().as_str(), r"^.*?\.rs$");
        assert_eq!(compile("main.rs").unwrap().as_str(), r"^main\.rs$");
    }

    #[test]
    fn test_ignore_and_match() {
        let mut set = SuppressionSet::new();
        assert!(!set.is_ignored(&["adfaslfkjasd;lfjslf"]));

        set.ignore("worker.rs").unwrap();
        assert!(set.is_ignored(&["worker.rs"]));
        assert!(!set.is_ignored(&["worker.rsx"]));
        assert!(!set.is_ignored(&["src/worker.rs"]));
        assert!(set.is_ignored(&["other.rs", "worker.rs"]));
    }

    #[test]
    fn test_wildcards() {
        let mut set = SuppressionSet::new();
        set.ignore("gen_*.rs").unwrap();
        set.ignore("*/vendor/*").unwrap();

        assert!(set.is_ignored(&["gen_proto.rs"]));
        assert!(set.is_ignored(&["/app/vendor/lib.rs"]));
        assert!(!set.is_ignored(&["generated.rs"]));
    }

    #[test]
    fn test_duplicates_are_not_added() {
        let mut set = SuppressionSet::new();
        assert!(set.ignore("a.rs").unwrap());
        assert!(!set.ignore("a.rs").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unignore_removes_matching_patterns() {
        let mut set = SuppressionSet::new();
        set.ignore("db.rs").unwrap();
        set.ignore("*.rs").unwrap();
        set.ignore("*.toml").unwrap();

        assert_eq!(set.unignore("db.rs"), 2);
        assert!(!set.is_ignored(&["db.rs"]));
        assert!(set.is_ignored(&["Cargo.toml"]));
        assert_eq!(set.unignore("nothing"), 0);
    }

    #[test]
    fn test_seed_from_list() {
        let set = SuppressionSet::from_list(" a.rs,b.rs\tc_*.rs ,, ").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.is_ignored(&["c_x.rs"]));

        let empty = SuppressionSet::from_list("").unwrap();
        assert!(empty.is_empty());
    }
}
