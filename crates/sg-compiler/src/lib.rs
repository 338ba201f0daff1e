//! Scriptgate Script Compiler
//!
//! This crate turns user script files into [`sg_core::UserScript`] records:
//! header parsing, pattern compilation and directory scanning.

pub mod builder;
pub mod loader;
pub mod parser;

pub use builder::build_script;
pub use loader::{load_directory, scan_directory, seed_example, LoadOptions, EXAMPLE_FILE_NAME};
pub use parser::{has_header, parse_metadata};
