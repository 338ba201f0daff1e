use sg_core::script::Metadata;

/// Line that opens the header block.
pub const HEADER_OPEN: &str = "// ==UserScript==";
/// Line that closes the header block.
pub const HEADER_CLOSE: &str = "// ==/UserScript==";

const COMMENT_MARKER: &str = "//";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse the directives in a script's header block.
///
/// A missing or unterminated header yields empty metadata, which is not an
/// error: the script still loads and runs everywhere.
pub fn parse_metadata(text: &str) -> Metadata {
    let mut metadata = Metadata::new();

    let block = match header_block(text) {
        Some(block) => block,
        None => return metadata,
    };

    for raw_line in block {
        if let Some((key, value)) = parse_directive(raw_line) {
            metadata.insert(key, value);
        }
    }

    metadata
}

/// True when `text` carries a complete header block.
pub fn has_header(text: &str) -> bool {
    header_block(text).is_some()
}

/// Lines strictly between the first open marker and the next close marker.
/// A leading byte-order mark is ignored.
fn header_block(text: &str) -> Option<Vec<&str>> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut lines = text.lines();
    lines.by_ref().find(|line| line.trim() == HEADER_OPEN)?;

    let mut block = Vec::new();
    for line in lines {
        if line.trim() == HEADER_CLOSE {
            return Some(block);
        }
        block.push(line);
    }

    None
}

/// `// @key value` -> `(key, value)`. Lines of any other shape, and
/// directives without a value, are skipped.
fn parse_directive(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix(COMMENT_MARKER)?;
    let rest = rest.trim_start().strip_prefix('@')?;

    let (key, value) = rest.split_once(char::is_whitespace)?;
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_match_and_exclude_in_order() {
        let text = "\
// ==UserScript==
// @name         Foo
// @match        https://a.test/*
// @match        https://b.test/*
// @exclude      https://a.test/private/*
// ==/UserScript==
console.log('foo');
";
        let metadata = parse_metadata(text);
        assert_eq!(metadata.name(), Some("Foo"));
        assert_eq!(
            metadata.matches(),
            ["https://a.test/*".to_string(), "https://b.test/*".to_string()]
        );
        assert_eq!(metadata.excludes(), ["https://a.test/private/*".to_string()]);
    }

    #[test]
    fn missing_header_is_empty() {
        assert!(parse_metadata("console.log('no header');").is_empty());
        assert!(parse_metadata("").is_empty());
    }

    #[test]
    fn unterminated_header_is_empty() {
        let text = "// ==UserScript==\n// @name Foo\nconsole.log(1);\n";
        assert!(parse_metadata(text).is_empty());
    }

    #[test]
    fn ignores_lines_outside_block_and_malformed_lines() {
        let text = "\
// @name Outside
// ==UserScript==
// @name Inside
// @noValue
// plain comment
@match not-a-comment
//   @version   1.0
// ==/UserScript==
// @match after-block
";
        let metadata = parse_metadata(text);
        assert_eq!(metadata.name(), Some("Inside"));
        assert_eq!(metadata.get("noValue"), None);
        assert_eq!(metadata.get("version"), Some("1.0"));
        assert!(metadata.matches().is_empty());
    }

    #[test]
    fn last_single_value_wins_and_whitespace_is_preserved_inside_value() {
        let text = "\
// ==UserScript==
// @name First
// @description   keeps  inner   spacing
// @name\tSecond
// ==/UserScript==
";
        let metadata = parse_metadata(text);
        assert_eq!(metadata.name(), Some("Second"));
        assert_eq!(metadata.get("description"), Some("keeps  inner   spacing"));
    }

    #[test]
    fn keeps_unrecognized_and_include_keys() {
        let text = "\
// ==UserScript==
// @grant none
// @include *://*/*
// @include https://x.test/*
// ==/UserScript==
";
        let metadata = parse_metadata(text);
        assert_eq!(metadata.get("grant"), Some("none"));
        assert_eq!(metadata.values("include").len(), 2);
        assert!(metadata.matches().is_empty());
    }

    #[test]
    fn header_after_byte_order_mark() {
        let text = "\u{feff}// ==UserScript==\n// @name Bank\n// @match https://bank.test/*\n// ==/UserScript==\n";
        let metadata = parse_metadata(text);
        assert_eq!(metadata.name(), Some("Bank"));
        assert_eq!(metadata.matches(), ["https://bank.test/*".to_string()]);
        assert!(has_header(text));
        assert!(!has_header("console.log(1);"));
    }

    #[test]
    fn indented_markers_are_accepted() {
        let text = "  // ==UserScript==\n  // @name Indented\n  // ==/UserScript==\n";
        assert_eq!(parse_metadata(text).name(), Some("Indented"));
    }
}
