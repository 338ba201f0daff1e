//! Host-facing runtime.
//!
//! [`Runtime`] owns the live page table and routes rendering-engine events
//! to the scheduler, the bridge and the placeholder state machine. It is
//! reactive: every method handles one event and returns.

use sg_core::error::Result;
use sg_core::types::{NavigationId, PageId};

use crate::bootstrap::{placeholder_bootstrap, VIDEO_PROBE_SCRIPT};
use crate::bridge::{self, BridgeMessage, BridgeOutcome, DropReason};
use crate::config::RuntimeConfig;
use crate::engine::{HostShell, RenderingEngine};
use crate::omnibox::resolve_input;
use crate::page::{PageContext, PageTable};
use crate::registry::Registry;
use crate::scheduler::{InjectionReport, Scheduler};

pub struct Runtime<E, H> {
    config: RuntimeConfig,
    registry: Registry,
    pages: PageTable,
    scheduler: Scheduler,
    engine: E,
    shell: H,
}

impl<E, H> Runtime<E, H>
where
    E: RenderingEngine,
    H: HostShell,
{
    pub fn new(config: RuntimeConfig, registry: Registry, engine: E, shell: H) -> Self {
        let scheduler = Scheduler::new(placeholder_bootstrap(&config.search_url));
        Self {
            config,
            registry,
            pages: PageTable::new(),
            scheduler,
            engine,
            shell,
        }
    }

    // =========================================================================
    // Page lifecycle
    // =========================================================================

    /// Register a tab. `None` means the host shows its placeholder page.
    pub fn open_page(&mut self, page_id: PageId, initial_url: Option<&str>) {
        if self.pages.contains(page_id) {
            log::debug!("Page {page_id} already open");
            return;
        }
        self.pages.open(page_id, initial_url);
    }

    /// Forget a tab. Late events for it are dropped.
    pub fn close_page(&mut self, page_id: PageId) -> bool {
        self.pages.close(page_id).is_some()
    }

    pub fn page(&self, page_id: PageId) -> Option<&PageContext> {
        self.pages.get(page_id)
    }

    // =========================================================================
    // Rendering-engine events
    // =========================================================================

    /// A new document was created in `page_id`, before any page script ran.
    pub fn on_document_created(
        &mut self,
        page_id: PageId,
        url: &str,
        navigation_id: NavigationId,
    ) -> Option<InjectionReport> {
        let Some(page) = self.pages.get_mut(page_id) else {
            log::debug!("Document created in unknown page {page_id}");
            return None;
        };

        if page.observe_committed_url(url, &self.config.placeholder_url) {
            log::info!("Page {page_id} left the placeholder page");
            self.shell.on_placeholder_resolved(page_id);
        }

        // Pinned for the whole evaluation; a concurrent reload swaps the
        // registry pointer without affecting this set.
        let scripts = self.registry.snapshot();
        let report = self
            .scheduler
            .on_document_creation(page, url, navigation_id, &scripts, &mut self.engine)?;

        self.shell
            .on_injection_applied(page_id, navigation_id, &report.script_ids);
        Some(report)
    }

    /// The engine committed `url` in `page_id` without a new document, e.g.
    /// a same-document navigation.
    pub fn on_url_changed(&mut self, page_id: PageId, url: &str) -> bool {
        let Some(page) = self.pages.get_mut(page_id) else {
            return false;
        };
        let resolved = page.observe_committed_url(url, &self.config.placeholder_url);
        if resolved {
            log::info!("Page {page_id} left the placeholder page");
            self.shell.on_placeholder_resolved(page_id);
        }
        resolved
    }

    /// Probe for video once a real page finished loading.
    pub fn on_load_finished(&mut self, page_id: PageId, success: bool) {
        let Some(page) = self.pages.get(page_id) else {
            return;
        };
        if !success {
            log::debug!("Load failed in page {page_id}; skipping video probe");
            return;
        }
        if page.is_placeholder() || !self.config.probe_video_on_load {
            return;
        }
        self.probe_video(page_id);
    }

    /// Re-evaluate video affordances for the newly focused tab.
    pub fn on_tab_activated(&mut self, page_id: PageId) {
        let Some(page) = self.pages.get(page_id) else {
            return;
        };
        if page.is_placeholder() {
            // The placeholder document never holds video.
            self.shell.on_video_status(page_id, false);
            return;
        }
        self.probe_video(page_id);
    }

    /// Completion value of [`VIDEO_PROBE_SCRIPT`], for engines that return
    /// evaluation results instead of routing them over the bridge.
    pub fn on_video_probe_result(&mut self, page_id: PageId, has_video: bool) -> BridgeOutcome {
        self.on_bridge_message(page_id, BridgeMessage::VideoStatus { has_video })
    }

    fn probe_video(&mut self, page_id: PageId) {
        if let Err(e) = self.engine.run_script(page_id, VIDEO_PROBE_SCRIPT) {
            if e.is_page_gone() {
                log::debug!("Video probe skipped: page {page_id} is gone");
            } else {
                log::warn!("Video probe failed in page {page_id}: {e}");
            }
        }
    }

    // =========================================================================
    // Bridge and host input
    // =========================================================================

    pub fn on_bridge_message(&mut self, page_id: PageId, message: BridgeMessage) -> BridgeOutcome {
        bridge::dispatch(&mut self.pages, &mut self.engine, &mut self.shell, page_id, message)
    }

    pub fn on_bridge_payload(&mut self, page_id: PageId, payload: &str) -> BridgeOutcome {
        bridge::dispatch_payload(&mut self.pages, &mut self.engine, &mut self.shell, page_id, payload)
    }

    /// Address-bar submission. Goes through the same path as an in-page
    /// `navigate` so the placeholder state stays consistent.
    pub fn submit_address_bar(&mut self, page_id: PageId, text: &str) -> BridgeOutcome {
        match resolve_input(text, &self.config.search_url) {
            Some(url) => self.on_bridge_message(page_id, BridgeMessage::Navigate { url }),
            None => BridgeOutcome::Dropped(DropReason::EmptyUrl),
        }
    }

    /// Re-scan the script directory. Documents created afterwards use the
    /// new set; the current set is kept when the scan fails.
    pub fn reload_scripts(&self) -> Result<usize> {
        self.registry.reload()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn shell(&self) -> &H {
        &self.shell
    }
}
