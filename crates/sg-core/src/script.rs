//! User script records and eligibility.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::pattern::{compile_all, CompiledPattern};
use crate::types::{ScriptId, ScriptInfo};

// =============================================================================
// Metadata
// =============================================================================

/// Directive keys that accumulate every occurrence instead of keeping the last.
pub const MULTI_VALUED_KEYS: &[&str] = &["match", "include", "exclude"];

/// Directives declared in a script header, keyed by directive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one directive. Multi-valued keys append; all other keys
    /// replace any earlier value.
    pub fn insert(&mut self, key: &str, value: &str) {
        let values = self.entries.entry(key.to_string()).or_default();
        if !is_multi_valued(key) {
            values.clear();
        }
        values.push(value.to_string());
    }

    /// Single-valued lookup. For multi-valued keys this is the last value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All values for a key in declaration order.
    pub fn values(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn matches(&self) -> &[String] {
        self.values("match")
    }

    pub fn excludes(&self) -> &[String] {
        self.values("exclude")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

pub fn is_multi_valued(key: &str) -> bool {
    MULTI_VALUED_KEYS.contains(&key)
}

// =============================================================================
// UserScript
// =============================================================================

/// A loaded script unit. Replaced wholesale on reload, never edited in place
/// apart from the host-controlled `enabled` flag.
#[derive(Debug, Clone)]
pub struct UserScript {
    pub id: ScriptId,
    pub name: String,
    pub source: Arc<str>,
    pub metadata: Metadata,
    pub match_patterns: Vec<CompiledPattern>,
    pub exclude_patterns: Vec<CompiledPattern>,
    pub enabled: bool,
    /// Always true: scripts run in every frame.
    pub runs_on_sub_frames: bool,
}

impl UserScript {
    /// Build a script from its id, full source and parsed header.
    /// The display name falls back to the id when `@name` is absent.
    pub fn new(id: ScriptId, source: impl Into<Arc<str>>, metadata: Metadata) -> Self {
        let name = metadata
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| id.as_str().to_string());
        let match_patterns = compile_all(metadata.matches());
        let exclude_patterns = compile_all(metadata.excludes());

        Self {
            id,
            name,
            source: source.into(),
            metadata,
            match_patterns,
            exclude_patterns,
            enabled: true,
            runs_on_sub_frames: true,
        }
    }

    /// Pattern eligibility, ignoring the enabled flag.
    pub fn is_eligible(&self, url: &str) -> bool {
        is_eligible(&self.match_patterns, &self.exclude_patterns, url)
    }

    /// Enabled and eligible.
    pub fn applies_to(&self, url: &str) -> bool {
        self.enabled && self.is_eligible(url)
    }

    pub fn info(&self) -> ScriptInfo {
        ScriptInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            enabled: self.enabled,
        }
    }
}

/// `(matches empty OR any match) AND no exclude matches`.
pub fn is_eligible(matches: &[CompiledPattern], excludes: &[CompiledPattern], url: &str) -> bool {
    if excludes.iter().any(|p| p.matches(url)) {
        return false;
    }
    matches.is_empty() || matches.iter().any(|p| p.matches(url))
}
