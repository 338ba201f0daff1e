//! Address-bar / search-box input resolution.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const DIRECT_SCHEMES: &[&str] = &["http://", "https://", "file://"];

/// Everything except the characters `encodeURIComponent` leaves alone:
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turn user input into a URL to load.
///
/// Input that already carries a scheme is used as-is, a dotted word without
/// spaces becomes an `https://` URL, and anything else becomes a search.
/// Returns `None` for blank input.
pub fn resolve_input(text: &str, search_url: &str) -> Option<String> {
    let query = text.trim();
    if query.is_empty() {
        return None;
    }

    if DIRECT_SCHEMES.iter().any(|scheme| query.starts_with(scheme)) {
        return Some(query.to_string());
    }

    if query.contains('.') && !query.contains(' ') {
        return Some(format!("https://{query}"));
    }

    Some(format!("{search_url}{}", encode_query(query)))
}

/// Percent-encode exactly like JavaScript's `encodeURIComponent`, so the
/// address bar and the start page's search box build the same URL.
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, URI_COMPONENT).to_string()
}
