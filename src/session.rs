//! A browsing session over one directory.
//!
//! The session owns the directory and the catalog built from it. Both are
//! fixed for the life of the session; picking another directory means
//! opening a new session.

use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogEntry, FilenameSource, ListingError};

/// Directory plus the catalog built from its contents
#[derive(Debug, Clone)]
pub struct Session {
    directory: PathBuf,
    catalog: Catalog,
}

impl Session {
    /// List `directory` through `source` and build its catalog
    pub async fn open(
        source: &dyn FilenameSource,
        directory: impl Into<PathBuf>,
    ) -> Result<Self, ListingError> {
        let directory = directory.into();
        let filenames = source.filenames(&directory).await?;
        let catalog = Catalog::build(filenames);

        tracing::info!(
            directory = %directory.display(),
            entries = catalog.len(),
            "Opened session"
        );

        Ok(Self { directory, catalog })
    }

    /// Wrap an already built catalog
    pub fn from_catalog(directory: impl Into<PathBuf>, catalog: Catalog) -> Self {
        Self {
            directory: directory.into(),
            catalog,
        }
    }

    /// The directory this session was opened on
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The session's catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// No file in the directory carried an identifier
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Look up a filename by identifier
    pub fn lookup(&self, query: &str) -> Option<&str> {
        self.catalog.lookup(query)
    }

    /// Every entry sharing the queried identifier
    pub fn lookup_all(&self, query: &str) -> Vec<&CatalogEntry> {
        self.catalog.lookup_all(query)
    }
}
