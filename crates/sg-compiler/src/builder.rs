use sg_core::script::UserScript;
use sg_core::types::ScriptId;

use crate::parser::parse_metadata;

/// Compile one script source into a `UserScript`.
///
/// Header parsing never fails; patterns that do not compile are kept but
/// never match.
pub fn build_script(id: ScriptId, source: &str) -> UserScript {
    let metadata = parse_metadata(source);
    let script = UserScript::new(id, source, metadata);

    let invalid = script
        .match_patterns
        .iter()
        .chain(script.exclude_patterns.iter())
        .filter(|p| !p.is_valid())
        .count();
    if invalid > 0 {
        log::warn!("Script '{}' has {} unusable pattern(s)", script.id, invalid);
    }

    script
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_SCRIPT: &str = "\
// ==UserScript==
// @name         Video Tools
// @match        *://*.example.com/*
// @exclude      *://admin.example.com/*
// ==/UserScript==
(function() { 'use strict'; })();
";

    #[test]
    fn builds_patterns_from_header() {
        let script = build_script(ScriptId::new("video.user.js"), VIDEO_SCRIPT);
        assert_eq!(script.name, "Video Tools");
        assert_eq!(&*script.source, VIDEO_SCRIPT);
        assert_eq!(script.match_patterns.len(), 1);
        assert_eq!(script.exclude_patterns.len(), 1);
        assert!(script.enabled);

        assert!(script.is_eligible("https://www.example.com/watch"));
        assert!(!script.is_eligible("https://admin.example.com/panel"));
        assert!(!script.is_eligible("https://example.org/"));
    }

    #[test]
    fn byte_order_mark_keeps_patterns() {
        let source = format!("\u{feff}{VIDEO_SCRIPT}");
        let script = build_script(ScriptId::new("video.user.js"), &source);
        assert_eq!(script.name, "Video Tools");
        assert_eq!(script.match_patterns.len(), 1);
        assert!(!script.is_eligible("https://example.org/"));
    }

    #[test]
    fn headerless_script_runs_everywhere() {
        let script = build_script(ScriptId::new("plain.user.js"), "alert(1);");
        assert_eq!(script.name, "plain.user.js");
        assert!(script.match_patterns.is_empty());
        assert!(script.is_eligible("https://anything.test/"));
    }
}
