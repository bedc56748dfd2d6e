//! Sorted catalog of identified files.
//!
//! Built once from a directory listing and read-only afterwards.

use serde::Serialize;
use tracing::debug;

use super::identifier::{extract, CanonicalId};

/// Catalog of files sorted by canonical identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Entries in ascending identifier order
    entries: Vec<CatalogEntry>,
}

/// A single file in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Canonical identifier extracted from the filename
    pub id: CanonicalId,

    /// Filename as it appeared in the listing
    pub filename: String,
}

impl CatalogEntry {
    /// Build an entry for `filename`, or `None` if it carries no identifier
    pub fn from_filename(filename: impl Into<String>) -> Option<Self> {
        let filename = filename.into();
        let id = extract(&filename).and_then(CanonicalId::parse)?;
        Some(Self { id, filename })
    }
}

impl Catalog {
    /// Build a catalog from a collection of filenames.
    ///
    /// Filenames without an identifier are dropped. The sort is stable, so
    /// entries sharing an identifier keep their listing order.
    pub fn build<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut skipped = 0usize;

        for filename in filenames {
            let filename = filename.into();
            match CatalogEntry::from_filename(filename) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        entries.sort_by(|a, b| a.id.cmp(&b.id));

        for pair in entries.windows(2) {
            if pair[0].id == pair[1].id {
                debug!(id = %pair[1].id, filename = %pair[1].filename, "Duplicate identifier");
            }
        }

        debug!(entries = entries.len(), skipped, "Catalog built");

        Self { entries }
    }

    /// Find the first file whose identifier equals the normalized query.
    ///
    /// Only exact matches count. With duplicate identifiers, the first entry
    /// in catalog order wins.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        let id = CanonicalId::parse(query)?;
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.filename.as_str())
    }

    /// Every entry sharing the queried identifier, in catalog order
    pub fn lookup_all(&self, query: &str) -> Vec<&CatalogEntry> {
        let Some(id) = CanonicalId::parse(query) else {
            return Vec::new();
        };
        self.entries.iter().filter(|entry| entry.id == id).collect()
    }

    /// All entries in ascending identifier order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
