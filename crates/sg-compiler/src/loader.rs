//! Script directory scanning.
//!
//! A scan is non-recursive and only looks at files carrying the script
//! suffix. Each file is read and compiled on its own: an unreadable file is
//! logged and skipped, only an unreadable directory fails the scan.

use std::fs;
use std::path::{Path, PathBuf};

use sg_core::error::{Error, Result};
use sg_core::script::UserScript;
use sg_core::types::ScriptId;

use crate::builder::build_script;

/// Default file suffix for user scripts.
pub const DEFAULT_SUFFIX: &str = ".user.js";

/// File name of the seeded example script.
pub const EXAMPLE_FILE_NAME: &str = "example.user.js";

const EXAMPLE_SCRIPT: &str = r#"// ==UserScript==
// @name         HTML5 Video Enhancements
// @namespace    http://example.com
// @version      1.0
// @description  Picture-in-picture and fullscreen shortcuts for HTML5 video
// @author       Scriptgate
// @match        *://*/*
// @grant        none
// ==/UserScript==

(function() {
    'use strict';

    console.log('User script loaded: HTML5 Video Enhancements');

    document.addEventListener('keydown', function(e) {
        const video = document.querySelector('video');
        if (!video) {
            return;
        }

        // F11: fullscreen
        if (e.key === 'F11' && video.requestFullscreen) {
            video.requestFullscreen();
        }

        // Ctrl+Shift+P: picture-in-picture
        if (e.ctrlKey && e.shiftKey && e.key === 'P' && document.pictureInPictureEnabled) {
            if (video !== document.pictureInPictureElement) {
                video.requestPictureInPicture();
            } else {
                document.exitPictureInPicture();
            }
        }
    });

    function enhanceVideos() {
        document.querySelectorAll('video:not([data-enhanced])').forEach(function(video) {
            video.setAttribute('playsinline', '');
            video.setAttribute('data-enhanced', 'true');
        });
    }

    enhanceVideos();
    new MutationObserver(enhanceVideos).observe(document.documentElement, {
        childList: true,
        subtree: true
    });
})();
"#;

/// How a script directory is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub suffix: String,
    /// Write an example script when the directory holds none.
    pub seed_example: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            seed_example: true,
        }
    }
}

/// Create the directory if needed, scan it, and seed an example script when
/// the scan comes back empty. The directory is re-scanned at most once.
pub fn load_directory(dir: &Path, opts: &LoadOptions) -> Result<Vec<UserScript>> {
    fs::create_dir_all(dir).map_err(|source| Error::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let scripts = scan_directory(dir, &opts.suffix)?;
    if !scripts.is_empty() || !opts.seed_example {
        return Ok(scripts);
    }

    match seed_example(dir) {
        Ok(path) => {
            log::info!("Seeded example script '{}'", path.display());
            scan_directory(dir, &opts.suffix)
        }
        Err(e) => {
            log::warn!("{e}");
            Ok(scripts)
        }
    }
}

/// Scan one directory level for script files, sorted by file name.
pub fn scan_directory(dir: &Path, suffix: &str) -> Result<Vec<UserScript>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in '{}': {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("Skipping script with non UTF-8 file name {:?}", raw);
                continue;
            }
        };

        if file_name.ends_with(suffix) {
            files.push((file_name, path));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut scripts = Vec::with_capacity(files.len());
    for (file_name, path) in files {
        match read_script(&path) {
            Ok(source) => {
                let script = build_script(ScriptId::new(file_name), &source);
                log::info!("Loaded script '{}' ({})", script.name, script.id);
                scripts.push(script);
            }
            Err(e) => log::warn!("Skipping script: {e}"),
        }
    }

    Ok(scripts)
}

/// Write the example script into `dir`, returning its path.
pub fn seed_example(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(EXAMPLE_FILE_NAME);
    fs::write(&path, EXAMPLE_SCRIPT).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).expect("write script");
    }

    #[test]
    fn scans_matching_suffix_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "b.user.js", "// ==UserScript==\n// @name B\n// ==/UserScript==\n");
        write(dir.path(), "a.user.js", "alert('a');");
        write(dir.path(), "notes.txt", "not a script");
        write(dir.path(), "c.js", "not a user script");
        fs::create_dir(dir.path().join("nested.user.js")).expect("mkdir");

        let scripts = scan_directory(dir.path(), DEFAULT_SUFFIX).expect("scan");
        let ids: Vec<&str> = scripts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a.user.js", "b.user.js"]);
        assert_eq!(scripts[0].name, "a.user.js");
        assert_eq!(scripts[1].name, "B");
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "good.user.js", "alert(1);");
        // Invalid UTF-8 fails read_to_string.
        fs::write(dir.path().join("bad.user.js"), [0xff, 0xfe, 0x00]).expect("write");

        let scripts = scan_directory(dir.path(), DEFAULT_SUFFIX).expect("scan");
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].id.as_str(), "good.user.js");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing");
        let err = scan_directory(&missing, DEFAULT_SUFFIX).expect_err("should fail");
        assert!(matches!(err, Error::DirectoryUnreadable { .. }));
    }

    #[test]
    fn empty_directory_is_seeded_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let scripts_dir = dir.path().join("scripts");

        let scripts = load_directory(&scripts_dir, &LoadOptions::default()).expect("load");
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].id.as_str(), EXAMPLE_FILE_NAME);
        assert_eq!(scripts[0].name, "HTML5 Video Enhancements");
        assert_eq!(scripts[0].metadata.get("version"), Some("1.0"));
        assert!(scripts[0].is_eligible("https://example.com/watch"));
    }

    #[test]
    fn seeding_can_be_disabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let opts = LoadOptions {
            seed_example: false,
            ..LoadOptions::default()
        };
        let scripts = load_directory(dir.path(), &opts).expect("load");
        assert!(scripts.is_empty());
        assert!(!dir.path().join(EXAMPLE_FILE_NAME).exists());
    }

    #[test]
    fn existing_scripts_are_not_seeded() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(dir.path(), "mine.user.js", "alert(1);");
        let scripts = load_directory(dir.path(), &LoadOptions::default()).expect("load");
        assert_eq!(scripts.len(), 1);
        assert!(!dir.path().join(EXAMPLE_FILE_NAME).exists());
    }
}
