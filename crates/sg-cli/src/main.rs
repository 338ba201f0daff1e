//! Scriptgate CLI
//!
//! Inspect a user script directory and dry-run URL eligibility without a
//! rendering engine.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use sg_compiler::{has_header, scan_directory, LoadOptions};
use sg_core::script::UserScript;
use sg_runtime::{resolve_input, Registry, RuntimeConfig};

#[derive(Parser)]
#[command(name = "scriptgate")]
#[command(about = "User script directory tools")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List loaded scripts
    List {
        /// Script directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the ids of scripts that would run on a URL
    Match {
        /// URL to evaluate
        #[arg(short, long)]
        url: String,

        /// Script directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Resolve address-bar input to the URL that would load
    Resolve {
        /// Address-bar text
        text: String,
    },

    /// Parse every script and report headers and patterns
    Check {
        /// Script directory
        #[arg(short, long)]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let result = RuntimeConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Invalid configuration: {e}"))
        .and_then(|config| match cli.command {
            Commands::List { dir, json } => cmd_list(&config, dir, json),
            Commands::Match { url, dir } => cmd_match(&config, dir, &url),
            Commands::Resolve { text } => cmd_resolve(&config, &text),
            Commands::Check { dir } => cmd_check(&config, &dir),
        });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Read-only view of a script directory: nothing is created or seeded.
fn open_registry(config: &RuntimeConfig, dir: Option<PathBuf>) -> Result<Registry, String> {
    let dir = dir.unwrap_or_else(|| config.scripts_dir.clone());
    log::debug!("Scanning scripts in '{}'", dir.display());
    let scripts = scan_directory(&dir, &config.script_suffix)
        .map_err(|e| format!("Failed to load scripts from '{}': {}", dir.display(), e))?;

    let options = LoadOptions {
        seed_example: false,
        ..config.load_options()
    };
    Ok(Registry::from_scripts(dir, options, scripts))
}

fn cmd_list(config: &RuntimeConfig, dir: Option<PathBuf>, json: bool) -> Result<(), String> {
    let registry = open_registry(config, dir)?;
    let snapshot = registry.snapshot();
    let rows: Vec<ScriptRow> = snapshot.scripts().iter().map(ScriptRow::from).collect();

    if json {
        let text = serde_json::to_string_pretty(&rows)
            .map_err(|e| format!("Failed to serialize script list: {e}"))?;
        println!("{text}");
        return Ok(());
    }

    println!("Scripts in '{}':", registry.dir().display());
    if rows.is_empty() {
        println!("  (none)");
    }
    for row in &rows {
        println!("{}", row.table_line());
    }

    Ok(())
}

fn cmd_match(config: &RuntimeConfig, dir: Option<PathBuf>, url: &str) -> Result<(), String> {
    let registry = open_registry(config, dir)?;
    for id in eligible_ids(&registry, url) {
        println!("{id}");
    }
    Ok(())
}

fn cmd_resolve(config: &RuntimeConfig, text: &str) -> Result<(), String> {
    let url = resolve_input(text, &config.search_url).ok_or_else(|| "Input is empty".to_string())?;
    println!("{url}");
    Ok(())
}

fn cmd_check(config: &RuntimeConfig, dir: &Path) -> Result<(), String> {
    let scripts = scan_directory(dir, &config.script_suffix)
        .map_err(|e| format!("Failed to scan '{}': {}", dir.display(), e))?;

    println!("Checked {} script(s) in '{}'", scripts.len(), dir.display());
    for script in &scripts {
        let report = CheckReport::from(script);
        println!("  {}", report.line());
    }

    Ok(())
}

// =============================================================================
// Output
// =============================================================================

#[derive(Debug, Serialize)]
struct ScriptRow {
    id: String,
    name: String,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    matches: usize,
    excludes: usize,
}

impl From<&UserScript> for ScriptRow {
    fn from(script: &UserScript) -> Self {
        let field = |key: &str| script.metadata.get(key).map(str::to_string);
        Self {
            id: script.id.to_string(),
            name: script.name.clone(),
            enabled: script.enabled,
            namespace: field("namespace"),
            version: field("version"),
            description: field("description"),
            author: field("author"),
            matches: script.match_patterns.len(),
            excludes: script.exclude_patterns.len(),
        }
    }
}

impl ScriptRow {
    fn table_line(&self) -> String {
        format!(
            "  [{}] {:<32} {:<32} match: {:<3} exclude: {}",
            if self.enabled { "x" } else { " " },
            self.id,
            self.name,
            self.matches,
            self.excludes
        )
    }
}

struct CheckReport<'a> {
    id: &'a str,
    has_header: bool,
    matches: usize,
    excludes: usize,
    invalid: usize,
}

impl<'a> From<&'a UserScript> for CheckReport<'a> {
    fn from(script: &'a UserScript) -> Self {
        let invalid = script
            .match_patterns
            .iter()
            .chain(&script.exclude_patterns)
            .filter(|p| !p.is_valid())
            .count();
        Self {
            id: script.id.as_str(),
            has_header: has_header(&script.source),
            matches: script.match_patterns.len(),
            excludes: script.exclude_patterns.len(),
            invalid,
        }
    }
}

impl CheckReport<'_> {
    fn line(&self) -> String {
        let header = if self.has_header { "header" } else { "no header (runs everywhere)" };
        let mut line = format!(
            "{}: {}, {} match, {} exclude",
            self.id, header, self.matches, self.excludes
        );
        if self.invalid > 0 {
            line.push_str(&format!(", {} unusable", self.invalid));
        }
        line
    }
}

fn eligible_ids(registry: &Registry, url: &str) -> Vec<String> {
    registry
        .snapshot()
        .eligible(url)
        .map(|script| script.id.to_string())
        .collect()
}
