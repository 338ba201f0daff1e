//! Injection Scheduler
//!
//! Decides, once per `(page, navigation)`, which scripts the rendering engine
//! inserts into a new document. Placeholder documents only receive the
//! bootstrap script; every other document receives the enabled scripts
//! eligible for its URL, in registry order.

use sg_core::types::{NavigationId, ScriptId};

use crate::engine::{InjectedScript, RenderingEngine};
use crate::page::PageContext;
use crate::registry::ScriptSet;

/// Scripts actually handed to the engine for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionReport {
    pub navigation_id: NavigationId,
    /// User scripts the engine accepted, in insertion order.
    pub script_ids: Vec<ScriptId>,
    /// True when this was a placeholder document.
    pub bootstrap: bool,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    bootstrap: InjectedScript,
}

impl Scheduler {
    pub fn new(bootstrap: InjectedScript) -> Self {
        Self { bootstrap }
    }

    pub fn bootstrap(&self) -> &InjectedScript {
        &self.bootstrap
    }

    /// Handle document creation for `page`. Returns `None` when this
    /// navigation was already handled.
    ///
    /// The navigation is claimed before any insertion, so a rejected
    /// insertion is not retried by a duplicate lifecycle signal.
    pub fn on_document_creation<E: RenderingEngine>(
        &self,
        page: &mut PageContext,
        url: &str,
        navigation_id: NavigationId,
        scripts: &ScriptSet,
        engine: &mut E,
    ) -> Option<InjectionReport> {
        let page_id = page.page_id();
        if !page.claim_navigation(navigation_id) {
            log::debug!("Page {page_id} navigation {navigation_id} already injected");
            return None;
        }

        if page.is_placeholder() {
            if let Err(e) = engine.insert_script(page_id, &self.bootstrap) {
                log_rejection(&e, &self.bootstrap.name, page_id);
            }
            return Some(InjectionReport {
                navigation_id,
                script_ids: Vec::new(),
                bootstrap: true,
            });
        }

        let mut script_ids = Vec::new();
        for script in scripts.eligible(url) {
            match engine.insert_script(page_id, &InjectedScript::from(script)) {
                Ok(()) => {
                    log::debug!("Injected '{}' into page {page_id} ({url})", script.name);
                    script_ids.push(script.id.clone());
                }
                Err(e) => log_rejection(&e, &script.name, page_id),
            }
        }

        Some(InjectionReport {
            navigation_id,
            script_ids,
            bootstrap: false,
        })
    }
}

fn log_rejection(error: &sg_core::Error, name: &str, page_id: sg_core::PageId) {
    if error.is_page_gone() {
        log::debug!("Skipping '{name}': page {page_id} is gone");
    } else {
        log::warn!("Failed to inject '{name}' into page {page_id}: {error}");
    }
}
