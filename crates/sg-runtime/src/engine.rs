//! Collaborator seams: the rendering engine the runtime drives, and the host
//! shell it notifies.

use std::sync::Arc;

use sg_core::error::Result;
use sg_core::script::UserScript;
use sg_core::types::{InjectionPoint, NavigationId, NavigationIntent, PageId, ScriptId};

/// A script handed to the rendering engine for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedScript {
    pub name: String,
    pub source: Arc<str>,
    pub injection_point: InjectionPoint,
    pub all_frames: bool,
}

impl From<&UserScript> for InjectedScript {
    fn from(script: &UserScript) -> Self {
        Self {
            name: script.name.clone(),
            source: Arc::clone(&script.source),
            injection_point: InjectionPoint::DocumentCreation,
            all_frames: script.runs_on_sub_frames,
        }
    }
}

/// Per-page document engine.
///
/// Implementations return [`sg_core::Error::PageGone`] when the page has
/// already been torn down; the runtime treats that as an expected race.
pub trait RenderingEngine {
    /// Insert a script that runs at `script.injection_point`, before
    /// page-authored scripts, in every frame when `all_frames` is set.
    fn insert_script(&mut self, page: PageId, script: &InjectedScript) -> Result<()>;

    /// Load `url` in the page.
    fn load_url(&mut self, page: PageId, url: &str) -> Result<()>;

    /// Evaluate a script in the page's current document. The engine reports
    /// the completion value back to the runtime when the probe expects one.
    fn run_script(&mut self, page: PageId, source: &str) -> Result<()>;
}

/// Tab/UI shell notified of page state changes.
pub trait HostShell {
    fn on_navigation_intent(&mut self, _intent: &NavigationIntent) {}

    fn on_placeholder_resolved(&mut self, _page: PageId) {}

    fn on_video_status(&mut self, _page: PageId, _has_video: bool) {}

    fn on_injection_applied(&mut self, _page: PageId, _navigation: NavigationId, _scripts: &[ScriptId]) {}
}
