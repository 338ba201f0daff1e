//! Recording collaborators for unit tests.

use std::collections::HashSet;

use sg_core::error::{Error, Result};
use sg_core::types::{NavigationId, NavigationIntent, PageId, ScriptId};

use crate::engine::{HostShell, InjectedScript, RenderingEngine};

#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub inserted: Vec<(PageId, InjectedScript)>,
    pub loaded: Vec<(PageId, String)>,
    pub ran: Vec<(PageId, String)>,
    /// Pages that report `PageGone`.
    pub gone: HashSet<PageId>,
    /// Script names the engine refuses to insert.
    pub rejected: HashSet<String>,
}

impl RecordingEngine {
    pub fn is_untouched(&self) -> bool {
        self.inserted.is_empty() && self.loaded.is_empty() && self.ran.is_empty()
    }

    pub fn inserted_names(&self, page: PageId) -> Vec<String> {
        self.inserted
            .iter()
            .filter(|(p, _)| *p == page)
            .map(|(_, s)| s.name.clone())
            .collect()
    }

    fn check_live(&self, page: PageId) -> Result<()> {
        if self.gone.contains(&page) {
            return Err(Error::PageGone(page));
        }
        Ok(())
    }
}

impl RenderingEngine for RecordingEngine {
    fn insert_script(&mut self, page: PageId, script: &InjectedScript) -> Result<()> {
        self.check_live(page)?;
        if self.rejected.contains(&script.name) {
            return Err(Error::Engine(format!("rejected {}", script.name)));
        }
        self.inserted.push((page, script.clone()));
        Ok(())
    }

    fn load_url(&mut self, page: PageId, url: &str) -> Result<()> {
        self.check_live(page)?;
        self.loaded.push((page, url.to_string()));
        Ok(())
    }

    fn run_script(&mut self, page: PageId, source: &str) -> Result<()> {
        self.check_live(page)?;
        self.ran.push((page, source.to_string()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingShell {
    pub intents: Vec<NavigationIntent>,
    pub resolved: Vec<PageId>,
    pub video: Vec<(PageId, bool)>,
    pub applied: Vec<(PageId, NavigationId, Vec<ScriptId>)>,
}

impl RecordingShell {
    pub fn is_untouched(&self) -> bool {
        self.intents.is_empty() && self.resolved.is_empty() && self.video.is_empty() && self.applied.is_empty()
    }
}

impl HostShell for RecordingShell {
    fn on_navigation_intent(&mut self, intent: &NavigationIntent) {
        self.intents.push(intent.clone());
    }

    fn on_placeholder_resolved(&mut self, page: PageId) {
        self.resolved.push(page);
    }

    fn on_video_status(&mut self, page: PageId, has_video: bool) {
        self.video.push((page, has_video));
    }

    fn on_injection_applied(&mut self, page: PageId, navigation: NavigationId, scripts: &[ScriptId]) {
        self.applied.push((page, navigation, scripts.to_vec()));
    }
}
