//! Runtime configuration.
//!
//! Built-in defaults, then an optional JSON file, then the
//! `SCRIPTGATE_SCRIPTS_DIR` environment variable.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sg_compiler::LoadOptions;
use sg_core::error::{Error, Result};

/// Environment variable overriding `scripts_dir`.
pub const SCRIPTS_DIR_ENV: &str = "SCRIPTGATE_SCRIPTS_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory scanned for user scripts.
    pub scripts_dir: PathBuf,
    /// File suffix identifying user scripts.
    pub script_suffix: String,
    /// Write an example script when the directory is empty.
    pub seed_example: bool,
    /// Base URL the host loads the placeholder page under.
    pub placeholder_url: String,
    /// Search endpoint; the encoded query is appended.
    pub search_url: String,
    /// Probe for `<video>` elements after each successful load.
    pub probe_video_on_load: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from("scripts"),
            script_suffix: ".user.js".to_string(),
            seed_example: true,
            placeholder_url: "data:text/html;charset=utf-8,".to_string(),
            search_url: "https://www.bing.com/search?q=".to_string(),
            probe_video_on_load: true,
        }
    }
}

impl RuntimeConfig {
    /// Resolve the effective configuration from an optional JSON file and
    /// the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        config.apply_scripts_dir_override(std::env::var_os(SCRIPTS_DIR_ENV));
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config(format!("'{}': {}", path.display(), e)))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn apply_scripts_dir_override(&mut self, value: Option<OsString>) {
        if let Some(dir) = value.filter(|dir| !dir.is_empty()) {
            self.scripts_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.script_suffix.is_empty() {
            return Err(Error::Config("script_suffix must not be empty".to_string()));
        }
        if self.search_url.is_empty() {
            return Err(Error::Config("search_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            suffix: self.script_suffix.clone(),
            seed_example: self.seed_example,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RuntimeConfig::from_json_str(r#"{"scripts_dir": "/opt/scripts", "seed_example": false}"#)
            .expect("config should parse");
        assert_eq!(config.scripts_dir, PathBuf::from("/opt/scripts"));
        assert!(!config.seed_example);
        assert_eq!(config.script_suffix, ".user.js");
        assert!(config.probe_video_on_load);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = RuntimeConfig::from_json_str("{not json").expect_err("should fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate_rejects_empty_suffix() {
        let config = RuntimeConfig {
            script_suffix: String::new(),
            ..RuntimeConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(RuntimeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_scripts_dir_override() {
        let mut config = RuntimeConfig::default();
        config.apply_scripts_dir_override(Some(OsString::new()));
        assert_eq!(config.scripts_dir, PathBuf::from("scripts"));
        config.apply_scripts_dir_override(Some(OsString::from("/tmp/us")));
        assert_eq!(config.scripts_dir, PathBuf::from("/tmp/us"));
        config.apply_scripts_dir_override(None);
        assert_eq!(config.scripts_dir, PathBuf::from("/tmp/us"));
    }

    #[test]
    fn test_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scriptgate.json");
        fs::write(&path, r#"{"search_url": "https://duckduckgo.com/?q="}"#).expect("write");
        let config = RuntimeConfig::from_json_file(&path).expect("load");
        assert_eq!(config.search_url, "https://duckduckgo.com/?q=");
        assert_eq!(config.load_options().suffix, ".user.js");
    }
}
