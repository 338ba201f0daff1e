//! Script Registry
//!
//! The registry publishes immutable [`ScriptSet`] snapshots through an
//! `ArcSwap`. Readers pin a snapshot for the duration of one evaluation and
//! always see either the whole old set or the whole new one. Writers (reload,
//! enable/disable) build a replacement set and publish it with `rcu`, so
//! concurrent writers never lose each other's updates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use sg_compiler::{load_directory, scan_directory, LoadOptions};
use sg_core::error::Result;
use sg_core::script::UserScript;
use sg_core::types::{ScriptId, ScriptInfo};

/// One published generation of loaded scripts, in registry order.
#[derive(Debug, Clone, Default)]
pub struct ScriptSet {
    scripts: Vec<UserScript>,
    generation: u64,
}

impl ScriptSet {
    pub fn new(scripts: Vec<UserScript>, generation: u64) -> Self {
        Self { scripts, generation }
    }

    pub fn scripts(&self) -> &[UserScript] {
        &self.scripts
    }

    /// Incremented by every successful reload.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &ScriptId) -> Option<&UserScript> {
        self.scripts.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Enabled scripts eligible for `url`, in registry order.
    pub fn eligible<'a>(&'a self, url: &'a str) -> impl Iterator<Item = &'a UserScript> + 'a {
        self.scripts.iter().filter(move |s| s.applies_to(url))
    }
}

/// Shared handle to the current script set. Cloning shares the same set.
#[derive(Debug, Clone)]
pub struct Registry {
    dir: PathBuf,
    options: LoadOptions,
    current: Arc<ArcSwap<ScriptSet>>,
}

impl Registry {
    /// Load the script directory. Fails only when the directory itself
    /// cannot be created or read.
    pub fn load(dir: impl Into<PathBuf>, options: LoadOptions) -> Result<Self> {
        let dir = dir.into();
        let scripts = load_directory(&dir, &options)?;
        log::info!("Loaded {} script(s) from '{}'", scripts.len(), dir.display());
        Ok(Self::from_scripts(dir, options, scripts))
    }

    /// Registry over an already-built script list.
    pub fn from_scripts(dir: impl Into<PathBuf>, options: LoadOptions, scripts: Vec<UserScript>) -> Self {
        Self {
            dir: dir.into(),
            options,
            current: Arc::new(ArcSwap::from_pointee(ScriptSet::new(scripts, 0))),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Re-scan the directory and atomically replace the current set.
    ///
    /// Enabled flags carry over for ids present in both scans. Unlike
    /// [`Registry::load`], a reload never creates the directory or seeds
    /// it. When the scan fails the current set is kept unchanged and the
    /// error is returned.
    pub fn reload(&self) -> Result<usize> {
        let scanned = match scan_directory(&self.dir, &self.options.suffix) {
            Ok(scripts) => scripts,
            Err(e) => {
                log::warn!("Reload failed, keeping current scripts: {e}");
                return Err(e);
            }
        };

        let count = scanned.len();
        let previous = self.current.rcu(|old| {
            let mut scripts = scanned.clone();
            for script in &mut scripts {
                if let Some(prior) = old.get(&script.id) {
                    script.enabled = prior.enabled;
                }
            }
            ScriptSet::new(scripts, old.generation + 1)
        });

        log::info!(
            "Reloaded {} script(s) from '{}' (generation {})",
            count,
            self.dir.display(),
            previous.generation + 1
        );
        Ok(count)
    }

    /// Pin the current set.
    pub fn snapshot(&self) -> Arc<ScriptSet> {
        self.current.load_full()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }

    pub fn list(&self) -> Vec<ScriptInfo> {
        self.current.load().scripts.iter().map(UserScript::info).collect()
    }

    pub fn get(&self, id: &ScriptId) -> Option<UserScript> {
        self.current.load().get(id).cloned()
    }

    /// Enable or disable a script. Returns false for an unknown id.
    pub fn set_enabled(&self, id: &ScriptId, enabled: bool) -> bool {
        if self.current.load().get(id).is_none() {
            return false;
        }

        let mut found = false;
        self.current.rcu(|old| {
            let mut scripts = old.scripts.clone();
            found = false;
            for script in scripts.iter_mut().filter(|s| &s.id == id) {
                script.enabled = enabled;
                found = true;
            }
            ScriptSet::new(scripts, old.generation)
        });

        if found {
            log::info!("Script '{}' {}", id, if enabled { "enabled" } else { "disabled" });
        }
        found
    }
}
