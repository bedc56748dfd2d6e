//! Identifier catalog for the files of a directory.
//!
//! # Pipeline
//!
//! ```text
//! directory ─▶ listing ─▶ extract ─▶ normalize ─▶ sort ─▶ Catalog
//!                                                          │
//!                                    query ─▶ normalize ─▶ lookup
//! ```
//!
//! Everything after the listing step is pure and in-memory.

pub mod identifier;
pub mod index;
pub mod listing;

pub use identifier::{extract, normalize, CanonicalId};
pub use index::{Catalog, CatalogEntry};
pub use listing::{list_filenames, FilenameSource, FsSource, ListingError, ListingFilter};
