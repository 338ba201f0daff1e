//! Navigation Bridge Protocol
//!
//! In-page code talks to the host with fire-and-forget JSON messages tagged
//! by `type`:
//!
//! ```json
//! {"type": "navigate", "url": "https://example.com/"}
//! {"type": "videoStatus", "hasVideo": true}
//! ```
//!
//! Messages from one page are handled in delivery order. A message for a page
//! that has already closed is dropped without touching any state.

use serde::{Deserialize, Serialize};
use sg_core::error::{Error, Result};
use sg_core::types::{NavigationIntent, PageId};

use crate::engine::{HostShell, RenderingEngine};
use crate::page::PageTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BridgeMessage {
    /// Load `url` in the sending page through the host.
    Navigate { url: String },
    /// Whether the sending page's document contains video.
    #[serde(rename_all = "camelCase")]
    VideoStatus { has_video: bool },
}

impl BridgeMessage {
    pub fn decode(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::Bridge(e.to_string()))
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Bridge(e.to_string()))
    }
}

/// Why a message was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The sending page is no longer live.
    PageClosed,
    /// `Navigate` with an empty URL.
    EmptyUrl,
    /// The payload did not decode.
    Malformed,
}

/// What handling a message did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOutcome {
    Navigated { placeholder_resolved: bool },
    VideoStatusRelayed,
    Dropped(DropReason),
}

/// Apply one message from `page_id`.
pub fn dispatch<E, H>(
    pages: &mut PageTable,
    engine: &mut E,
    shell: &mut H,
    page_id: PageId,
    message: BridgeMessage,
) -> BridgeOutcome
where
    E: RenderingEngine,
    H: HostShell,
{
    let Some(page) = pages.get_mut(page_id) else {
        log::debug!("Dropping bridge message for closed page {page_id}");
        return BridgeOutcome::Dropped(DropReason::PageClosed);
    };

    match message {
        BridgeMessage::Navigate { url } => {
            let url = url.trim();
            if url.is_empty() {
                log::warn!("Ignoring navigate request with empty URL from page {page_id}");
                return BridgeOutcome::Dropped(DropReason::EmptyUrl);
            }

            log::debug!("Page {page_id} requested navigation to {url}");
            shell.on_navigation_intent(&NavigationIntent {
                source_page_id: page_id,
                target_url: url.to_string(),
            });

            let placeholder_resolved = page.resolve();
            if placeholder_resolved {
                log::info!("Page {page_id} left the placeholder page");
                shell.on_placeholder_resolved(page_id);
            }

            if let Err(e) = engine.load_url(page_id, url) {
                if e.is_page_gone() {
                    log::debug!("Navigation target page {page_id} closed mid-flight");
                } else {
                    log::warn!("Failed to load {url} in page {page_id}: {e}");
                }
            }

            BridgeOutcome::Navigated { placeholder_resolved }
        }
        BridgeMessage::VideoStatus { has_video } => {
            shell.on_video_status(page_id, has_video);
            BridgeOutcome::VideoStatusRelayed
        }
    }
}

/// Decode and apply one raw payload from `page_id`.
pub fn dispatch_payload<E, H>(
    pages: &mut PageTable,
    engine: &mut E,
    shell: &mut H,
    page_id: PageId,
    payload: &str,
) -> BridgeOutcome
where
    E: RenderingEngine,
    H: HostShell,
{
    match BridgeMessage::decode(payload) {
        Ok(message) => dispatch(pages, engine, shell, page_id, message),
        Err(e) => {
            log::warn!("Dropping bridge payload from page {page_id}: {e}");
            BridgeOutcome::Dropped(DropReason::Malformed)
        }
    }
}
