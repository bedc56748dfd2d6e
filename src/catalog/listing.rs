//! Directory listing feeding the catalog.
//!
//! The catalog itself never touches the filesystem; it consumes whatever
//! filenames a [`FilenameSource`] hands it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// Errors that can occur while listing a directory
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Directory does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which directory entries are handed to the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Glob patterns a name must match (empty = everything)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns that reject a name
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Skip names starting with '.'
    #[serde(default)]
    pub skip_hidden: bool,

    /// Skip subdirectories and other non-file entries
    #[serde(default)]
    pub files_only: bool,
}

impl ListingFilter {
    /// Compile the glob patterns, rejecting invalid ones
    pub fn compile(&self) -> Result<CompiledFilter, ListingError> {
        Ok(CompiledFilter {
            include: compile_patterns(&self.include)?,
            exclude: compile_patterns(&self.exclude)?,
            skip_hidden: self.skip_hidden,
            files_only: self.files_only,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>, ListingError> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| ListingError::InvalidPattern {
                pattern: p.clone(),
                reason: e.msg.to_string(),
            })
        })
        .collect()
}

/// A [`ListingFilter`] with its patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
    skip_hidden: bool,
    files_only: bool,
}

impl CompiledFilter {
    /// Check whether a name passes the filter
    pub fn accepts(&self, name: &str) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return false;
        }
        if !self.include.is_empty() && !self.include.iter().any(|p| p.matches(name)) {
            return false;
        }
        !self.exclude.iter().any(|p| p.matches(name))
    }

    /// Whether non-file entries are dropped
    pub fn files_only(&self) -> bool {
        self.files_only
    }
}

/// Supplies the filenames contained in a directory
#[async_trait]
pub trait FilenameSource: Send + Sync {
    /// List names in `dir`, in the order the source reports them
    async fn filenames(&self, dir: &Path) -> Result<Vec<String>, ListingError>;
}

/// Filesystem-backed source
#[derive(Debug, Clone)]
pub struct FsSource {
    filter: ListingFilter,
}

impl FsSource {
    /// Create a source applying `filter`
    pub fn new(filter: ListingFilter) -> Self {
        Self { filter }
    }
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new(ListingFilter::default())
    }
}

#[async_trait]
impl FilenameSource for FsSource {
    async fn filenames(&self, dir: &Path) -> Result<Vec<String>, ListingError> {
        list_filenames(dir, &self.filter).await
    }
}

/// List entry names in `dir`, filtered.
///
/// Fails if `dir` is missing or is not a directory. Non-UTF-8 names are
/// converted lossily.
pub async fn list_filenames(
    dir: &Path,
    filter: &ListingFilter,
) -> Result<Vec<String>, ListingError> {
    let compiled = filter.compile()?;

    let metadata = match fs::metadata(dir).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ListingError::NotFound(dir.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Err(ListingError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        if compiled.files_only() && !entry.file_type().await?.is_file() {
            continue;
        }

        let raw = entry.file_name();
        let name = match raw.to_str() {
            Some(s) => s.to_string(),
            None => {
                let lossy = raw.to_string_lossy().into_owned();
                tracing::debug!("Non UTF-8 filename, using lossy form: {}", lossy);
                lossy
            }
        };

        if compiled.accepts(&name) {
            names.push(name);
        }
    }

    tracing::debug!(dir = %dir.display(), count = names.len(), "Listed directory");

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str], skip_hidden: bool) -> CompiledFilter {
        ListingFilter {
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            skip_hidden,
            files_only: false,
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn test_default_filter_accepts_everything() {
        let f = filter(&[], &[], false);
        assert!(f.accepts("ABC-123.pdf"));
        assert!(f.accepts(".hidden AB1"));
        assert!(f.accepts("readme"));
    }

    #[test]
    fn test_include_and_exclude() {
        let f = filter(&["*.pdf", "*.doc"], &["*draft*"], false);
        assert!(f.accepts("ABC-123.pdf"));
        assert!(f.accepts("XYZ 789.doc"));
        assert!(!f.accepts("abc456.txt"));
        assert!(!f.accepts("AB1 draft.pdf"));
    }

    #[test]
    fn test_skip_hidden() {
        let f = filter(&[], &[], true);
        assert!(!f.accepts(".AB1.swp"));
        assert!(f.accepts("AB1.txt"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let result = ListingFilter {
            include: vec!["[".to_string()],
            ..Default::default()
        }
        .compile();

        match result {
            Err(ListingError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "["),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }
}
