//! URL Pattern Matching
//!
//! Patterns are flat globs: `*` matches any run of characters (including the
//! empty run and runs containing `/`), every other character is literal, and
//! the pattern must cover the whole URL.
//!
//! There is no structured scheme/host/path grammar here. `*://*.example.com/*`
//! works only because each `*` happens to line up with a URL component, and
//! `*.example.com` does not match the bare `example.com`.
//!
//! A pattern that cannot be compiled never matches.

use regex::Regex;

use crate::error::{Error, Result};

/// Wildcard token in a pattern string.
pub const WILDCARD: char = '*';

/// A `@match` / `@exclude` pattern compiled into a URL predicate.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    matcher: Option<Regex>,
}

impl CompiledPattern {
    /// Compile a pattern string. Compilation failures are logged and produce a
    /// pattern that never matches.
    pub fn compile(pattern: &str) -> Self {
        Self::from_source(pattern, &glob_to_regex(pattern))
    }

    fn from_source(raw: &str, source: &str) -> Self {
        let matcher = match build_regex(raw, source) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("{e}; pattern will never match");
                None
            }
        };

        Self {
            raw: raw.to_string(),
            matcher,
        }
    }

    /// The pattern exactly as declared.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// False when compilation failed and the pattern is inert.
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    /// Test a URL against the whole pattern.
    #[inline]
    pub fn matches(&self, url: &str) -> bool {
        match &self.matcher {
            Some(re) => re.is_match(url),
            None => false,
        }
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for CompiledPattern {}

/// Translate a glob into an anchored regex source.
///
/// Literal runs between wildcards are escaped first, so regex metacharacters
/// in the pattern (`.`, `?`, `+`, `(`...) stay literal.
pub fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    // `(?s)` lets `.*` cross newlines so a wildcard really means any substring.
    out.push_str("(?s)^");
    for (i, literal) in pattern.split(WILDCARD).enumerate() {
        if i > 0 {
            out.push_str(".*");
        }
        out.push_str(&regex::escape(literal));
    }
    out.push('$');
    out
}

fn build_regex(raw: &str, source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|e| Error::InvalidPattern {
        pattern: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Compile a list of pattern strings, preserving declaration order.
pub fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Vec<CompiledPattern> {
    patterns
        .iter()
        .map(|p| CompiledPattern::compile(p.as_ref()))
        .collect()
}
