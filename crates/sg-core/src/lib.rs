//! Scriptgate Core Library
//!
//! This crate provides the data model and URL matching engine shared by the
//! Scriptgate script compiler and host runtime.
//!
//! # Architecture
//!
//! A user script declares where it runs through `@match` and `@exclude`
//! directives in its header. Each directive is compiled once into a
//! [`CompiledPattern`] when the script is loaded; the injection hot path only
//! evaluates already-compiled predicates and never touches the filesystem.
//!
//! # Modules
//!
//! - `error`: Shared error type
//! - `pattern`: Glob-style URL pattern compilation and matching
//! - `script`: `UserScript` records, header metadata, and eligibility
//! - `types`: Identifiers and small value types exchanged with the host

pub mod error;
pub mod pattern;
pub mod script;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pattern::CompiledPattern;
pub use script::{is_eligible, Metadata, UserScript};
pub use types::{InjectionPoint, NavigationId, NavigationIntent, PageId, ScriptId, ScriptInfo};
