//! Scriptgate Runtime
//!
//! Everything a host needs between its rendering engine and its tab UI:
//! the atomically swapped script registry, per-document injection, the
//! placeholder page state machine and the in-page navigation bridge.
//!
//! # Modules
//!
//! - `registry`: Shared script set with snapshot publication
//! - `scheduler`: Once-per-navigation script injection
//! - `page`: Page table and placeholder state
//! - `bridge`: In-page message protocol
//! - `engine`: Rendering-engine and host-shell traits
//! - `runtime`: Event router tying the above together
//! - `config`: Runtime configuration
//! - `omnibox`: Address-bar input resolution
//! - `bootstrap`: Fixed scripts the runtime injects itself

pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod omnibox;
pub mod page;
pub mod registry;
pub mod runtime;
pub mod scheduler;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeMessage, BridgeOutcome, DropReason};
pub use config::{RuntimeConfig, SCRIPTS_DIR_ENV};
pub use engine::{HostShell, InjectedScript, RenderingEngine};
pub use omnibox::resolve_input;
pub use page::{PageContext, PageTable, PlaceholderState};
pub use registry::{Registry, ScriptSet};
pub use runtime::Runtime;
pub use scheduler::{InjectionReport, Scheduler};
