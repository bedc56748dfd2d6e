//! Configuration for idcat.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (IDCAT_DIR, IDCAT_CONFIG)
//! 2. Config file (.idcat/config.yaml)
//! 3. Defaults (no directory, unfiltered listing)
//!
//! Config file discovery:
//! - IDCAT_CONFIG, if set, names the file directly
//! - Otherwise searches current directory and parents for .idcat/config.yaml
//! - Falls back to ~/.idcat/config.yaml
//! - A relative `directory` is resolved against the project root (parent of .idcat/),
//!   or against the file's own directory for an IDCAT_CONFIG file elsewhere

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::ListingFilter;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_DIR: &str = "IDCAT_DIR";
pub const ENV_CONFIG: &str = "IDCAT_CONFIG";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Default directory to catalog
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub listing: ListingFilter,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Directory used when none is given on the command line
    pub directory: Option<PathBuf>,
    /// Listing filter applied to every directory
    pub listing: ListingFilter,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Pick the directory to open: explicit argument first, then configuration
    pub fn directory_or(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| self.directory.clone())
    }
}

/// Find config file by searching `start` and its parents, then `home`
fn find_config_file(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".idcat").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = home?.join(".idcat").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Directory a relative `directory:` is resolved against.
///
/// The project root (parent of `.idcat/`) for discovered files, the file's
/// own directory for a file named through IDCAT_CONFIG elsewhere.
fn config_base_dir(config_path: &Path) -> &Path {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    if parent.file_name().is_some_and(|name| name == ".idcat") {
        parent.parent().unwrap_or(Path::new("."))
    } else {
        parent
    }
}

/// Resolve configuration from an optional config file and env overrides
fn resolve(
    config_file: Option<PathBuf>,
    env_dir: Option<String>,
) -> Result<ResolvedConfig> {
    let (mut directory, listing) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        let base_dir = config_base_dir(config_path);

        let directory = config
            .directory
            .as_deref()
            .map(|d| resolve_path(base_dir, d));

        (directory, config.listing)
    } else {
        (None, ListingFilter::default())
    };

    if let Some(env_dir) = env_dir.filter(|d| !d.trim().is_empty()) {
        directory = Some(PathBuf::from(env_dir));
    }

    Ok(ResolvedConfig {
        directory,
        listing,
        config_file,
    })
}

/// Raw values the configuration is resolved from
#[derive(Debug, Clone, Default)]
struct ConfigInputs {
    /// Directory discovery starts from
    cwd: PathBuf,
    /// Home directory for the ~/.idcat fallback
    home: Option<PathBuf>,
    /// IDCAT_CONFIG
    env_config: Option<String>,
    /// IDCAT_DIR
    env_dir: Option<String>,
}

impl ConfigInputs {
    fn from_env() -> Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir().context("Failed to determine current directory")?,
            home: dirs::home_dir(),
            env_config: std::env::var(ENV_CONFIG).ok(),
            env_dir: std::env::var(ENV_DIR).ok(),
        })
    }
}

/// Load configuration from the given inputs
fn load_config(inputs: ConfigInputs) -> Result<ResolvedConfig> {
    let config_file = match inputs.env_config {
        Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => find_config_file(&inputs.cwd, inputs.home.as_deref()),
    };

    if let Some(ref path) = config_file {
        tracing::debug!("Using config file {}", path.display());
    }

    resolve(config_file, inputs.env_dir)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| {
        ConfigInputs::from_env()
            .and_then(load_config)
            .map_err(|e| format!("{:#}", e))
    });

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
