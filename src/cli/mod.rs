//! Command-line interface for idcat.
//!
//! Provides commands for listing a directory's catalog, looking up a file
//! by identifier, and the interactive prompt and terminal UI front ends.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::catalog::{Catalog, FsSource};
use crate::config::{self, ResolvedConfig};
use crate::session::Session;

pub mod prompt;
pub mod tui;

/// idcat - catalog files by the identifier in their names
#[derive(Parser, Debug)]
#[command(name = "idcat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a directory's files sorted by identifier
    List {
        /// Directory to catalog (defaults to IDCAT_DIR or the config file)
        dir: Option<PathBuf>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the file carrying an identifier
    Find {
        /// Identifier to look up (e.g. "ABC-123", "abc123")
        query: String,

        /// Directory to catalog (defaults to IDCAT_DIR or the config file)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Show every file sharing the identifier, not just the first
        #[arg(short, long)]
        all: bool,
    },

    /// Interactive prompt: show the catalog, then look up identifiers
    Prompt {
        /// Directory to catalog (asked for if not given or configured)
        dir: Option<PathBuf>,
    },

    /// Two-screen terminal UI
    Tui {
        /// Directory prefilled on the first screen
        dir: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Log filter directives, given the value of RUST_LOG
    pub fn log_directives(&self, rust_log: Option<String>) -> String {
        match self.command {
            // The terminal UI owns the screen; stderr would draw over it
            Commands::Tui { .. } => "off".to_string(),
            _ => rust_log
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let cfg = config::config()?;

        match self.command {
            Commands::List { dir, json } => {
                list_catalog(cfg, dir, json).await
            }
            Commands::Find { query, dir, all } => {
                find_file(cfg, &query, dir, all).await
            }
            Commands::Prompt { dir } => {
                let source = FsSource::new(cfg.listing.clone());
                let stdin = io::stdin();
                prompt::run(
                    &source,
                    cfg.directory_or(dir),
                    stdin.lock(),
                    io::stdout(),
                )
                .await
            }
            Commands::Tui { dir } => {
                let source = Arc::new(FsSource::new(cfg.listing.clone()));
                tui::run(source, cfg.directory_or(dir)).await
            }
            Commands::Config => {
                show_config(cfg)
            }
        }
    }
}

/// Resolve the directory to work on or explain how to provide one
fn require_directory(cfg: &ResolvedConfig, dir: Option<PathBuf>) -> Result<PathBuf> {
    cfg.directory_or(dir).with_context(|| {
        format!(
            "No directory given. Pass one as an argument, set {}, or add `directory:` to .idcat/config.yaml",
            config::ENV_DIR
        )
    })
}

/// Open a session on the filesystem using the configured listing filter
async fn open_session(cfg: &ResolvedConfig, dir: Option<PathBuf>) -> Result<Session> {
    let directory = require_directory(cfg, dir)?;
    let source = FsSource::new(cfg.listing.clone());

    Session::open(&source, &directory)
        .await
        .with_context(|| format!("Failed to catalog {}", directory.display()))
}

/// Write catalog rows as `IDENTIFIER - FILENAME`
pub fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    writeln!(out, "IDENTIFIER - FILENAME")?;
    for entry in catalog {
        writeln!(out, "{} - {}", entry.id, entry.filename)?;
    }
    Ok(())
}

/// List a directory's catalog
async fn list_catalog(cfg: &ResolvedConfig, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let session = open_session(cfg, dir).await?;
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, session.catalog())
            .context("Failed to write catalog JSON")?;
        writeln!(stdout)?;
        return Ok(());
    }

    if session.is_empty() {
        writeln!(
            stdout,
            "No files with an identifier in {}",
            session.directory().display()
        )?;
        return Ok(());
    }

    write_catalog(&mut stdout, session.catalog())?;
    writeln!(stdout, "\nTotal: {} files", session.catalog().len())?;

    Ok(())
}

/// Look up a file by identifier
async fn find_file(
    cfg: &ResolvedConfig,
    query: &str,
    dir: Option<PathBuf>,
    all: bool,
) -> Result<()> {
    let session = open_session(cfg, dir).await?;

    if all {
        let hits = session.lookup_all(query);
        if hits.is_empty() {
            eprintln!("No file matches identifier: {}", query);
            std::process::exit(1);
        }
        for entry in hits {
            println!("{}", entry.filename);
        }
        return Ok(());
    }

    match session.lookup(query) {
        Some(filename) => {
            println!("{}", filename);
            Ok(())
        }
        None => {
            eprintln!("No file matches identifier: {}", query);
            std::process::exit(1);
        }
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("idcat configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!(
        "Directory:   {}",
        cfg.directory
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!();
    println!("Listing:");
    println!("  Include:     {}", pattern_list(&cfg.listing.include));
    println!("  Exclude:     {}", pattern_list(&cfg.listing.exclude));
    println!("  Skip hidden: {}", cfg.listing.skip_hidden);
    println!("  Files only:  {}", cfg.listing.files_only);

    Ok(())
}

fn pattern_list(patterns: &[String]) -> String {
    if patterns.is_empty() {
        "(any)".to_string()
    } else {
        patterns.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_catalog_rows() {
        let catalog = Catalog::build(["XYZ 789.doc", "readme.md", "ABC-123.pdf"]);
        let mut out = Vec::new();
        write_catalog(&mut out, &catalog).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "IDENTIFIER - FILENAME\nABC 123 - ABC-123.pdf\nXYZ 789 - XYZ 789.doc\n"
        );
    }

    #[test]
    fn test_require_directory_message() {
        let err = require_directory(&ResolvedConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains(config::ENV_DIR));

        let dir = require_directory(&ResolvedConfig::default(), Some(PathBuf::from("/x"))).unwrap();
        assert_eq!(dir, PathBuf::from("/x"));
    }

    #[test]
    fn test_cli_parses_find() {
        let cli = Cli::try_parse_from(["idcat", "find", "abc-123", "--dir", "/scans", "--all"]).unwrap();
        match cli.command {
            Commands::Find { query, dir, all } => {
                assert_eq!(query, "abc-123");
                assert_eq!(dir, Some(PathBuf::from("/scans")));
                assert!(all);
            }
            other => panic!("Expected Find, got {:?}", other),
        }
    }

    #[test]
    fn test_tui_disables_logging_even_with_rust_log() {
        let cli = Cli::try_parse_from(["idcat", "tui"]).unwrap();
        assert_eq!(cli.log_directives(None), "off");
        assert_eq!(cli.log_directives(Some("debug".to_string())), "off");
    }

    #[test]
    fn test_log_directives_follow_rust_log() {
        let cli = Cli::try_parse_from(["idcat", "list", "/scans"]).unwrap();
        assert_eq!(cli.log_directives(None), "info");
        assert_eq!(cli.log_directives(Some("  ".to_string())), "info");
        assert_eq!(cli.log_directives(Some("idcat=debug".to_string())), "idcat=debug");
    }
}
