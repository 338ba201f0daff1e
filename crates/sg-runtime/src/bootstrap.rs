//! Fixed scripts the runtime hands to the rendering engine itself.

use std::sync::Arc;

use sg_core::types::InjectionPoint;

use crate::engine::InjectedScript;

/// Display name of the placeholder bootstrap script.
pub const BOOTSTRAP_NAME: &str = "scriptgate-placeholder-bootstrap";

const SEARCH_URL_SLOT: &str = "__SCRIPTGATE_SEARCH_URL__";

/// Runs on the placeholder page only. Routes link clicks, quick links and
/// search submissions through the host bridge (`window.browser`), falling
/// back to same-window navigation when the bridge is missing.
const BOOTSTRAP_TEMPLATE: &str = r#"(function() {
    'use strict';

    if (window.__scriptgateBootstrap) {
        return;
    }
    window.__scriptgateBootstrap = true;

    const SEARCH_URL = __SCRIPTGATE_SEARCH_URL__;

    function navigate(url) {
        const bridge = window.browser;
        if (bridge && typeof bridge.navigate === 'function') {
            bridge.navigate(url);
        } else {
            window.open(url, '_self');
        }
    }

    function resolveInput(text) {
        const query = text.trim();
        if (!query) {
            return null;
        }
        if (/^(https?|file):\/\//.test(query)) {
            return query;
        }
        if (query.includes('.') && !query.includes(' ')) {
            return 'https://' + query;
        }
        return SEARCH_URL + encodeURIComponent(query);
    }

    function submitSearch(input) {
        const url = resolveInput(input.value);
        if (url) {
            navigate(url);
        }
    }

    document.addEventListener('click', function(e) {
        let target = e.target;
        while (target && !(target.dataset && target.dataset.url) && target.tagName !== 'A') {
            target = target.parentElement;
        }
        if (!target) {
            return;
        }

        const url = (target.dataset && target.dataset.url) || target.href;
        if (url) {
            e.preventDefault();
            e.stopPropagation();
            navigate(url);
        }
    }, true);

    document.addEventListener('DOMContentLoaded', function() {
        const input = document.getElementById('searchInput');
        const button = document.getElementById('searchButton');
        if (!input) {
            return;
        }

        input.addEventListener('keypress', function(e) {
            if (e.key === 'Enter') {
                submitSearch(input);
            }
        });
        if (button) {
            button.addEventListener('click', function() {
                submitSearch(input);
            });
        }
    });
})();
"#;

/// Reports `videoStatus` over the bridge. The completion value carries the
/// same flag for engines that hand evaluation results back to the host.
pub const VIDEO_PROBE_SCRIPT: &str = r#"(function() {
    const hasVideo = document.getElementsByTagName('video').length > 0;
    const bridge = window.browser;
    if (bridge && typeof bridge.videoStatus === 'function') {
        bridge.videoStatus(hasVideo);
    }
    return hasVideo;
})();
"#;

/// The placeholder bootstrap with `search_url` baked in.
pub fn placeholder_bootstrap(search_url: &str) -> InjectedScript {
    // A JSON string literal is also a valid JS string literal.
    let literal = serde_json::Value::String(search_url.to_string()).to_string();
    let source = BOOTSTRAP_TEMPLATE.replace(SEARCH_URL_SLOT, &literal);

    InjectedScript {
        name: BOOTSTRAP_NAME.to_string(),
        source: Arc::from(source),
        injection_point: InjectionPoint::DocumentCreation,
        all_frames: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_is_embedded_as_literal() {
        let script = placeholder_bootstrap("https://www.bing.com/search?q=");
        assert!(script
            .source
            .contains(r#"const SEARCH_URL = "https://www.bing.com/search?q=";"#));
        assert!(!script.source.contains(SEARCH_URL_SLOT));
        assert!(script.all_frames);
        assert_eq!(script.name, BOOTSTRAP_NAME);
    }

    #[test]
    fn test_search_url_quotes_are_escaped() {
        let script = placeholder_bootstrap("https://x.test/?q=\"");
        assert!(script.source.contains(r#""https://x.test/?q=\"""#));
    }
}
