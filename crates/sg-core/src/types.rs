//! Core type definitions for Scriptgate
//!
//! These identifiers cross the boundary between the core and its host:
//! the host assigns page and navigation ids, the registry assigns script ids.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Stable identifier of a document-hosting surface (a tab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Navigation generation: distinct per document load within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NavigationId(pub u64);

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Script identifier, derived from the script's file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScriptId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// =============================================================================
// Injection
// =============================================================================

/// Page-lifecycle stage at which a script is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InjectionPoint {
    /// Before any page-authored script executes.
    #[default]
    DocumentCreation,
}

// =============================================================================
// Host-facing records
// =============================================================================

/// Display row for the host's script manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptInfo {
    pub id: ScriptId,
    pub name: String,
    pub enabled: bool,
}

/// In-page request to load a URL, routed through the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub source_page_id: PageId,
    pub target_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_id_display() {
        let id = ScriptId::new("video.user.js");
        assert_eq!(id.as_str(), "video.user.js");
        assert_eq!(id.to_string(), "video.user.js");
        assert_eq!(ScriptId::from("video.user.js"), id);
    }

    #[test]
    fn test_default_injection_point() {
        assert_eq!(InjectionPoint::default(), InjectionPoint::DocumentCreation);
    }
}
