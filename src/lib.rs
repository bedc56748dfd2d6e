//! idcat - catalog files by the identifier embedded in their names
//!
//! Filenames such as `ABC-123.pdf`, `abc456.txt` or `XYZ 789.doc` carry an
//! identifier: a run of letters, an optional space or hyphen, and a run of
//! digits. idcat extracts that identifier, normalizes it (`ABC 123`),
//! sorts a directory's files by it, and looks files up by it.
//!
//! # Modules
//!
//! - `catalog`: Extraction, normalization, catalog building and lookup
//! - `session`: A directory together with its catalog
//! - `config`: Layered configuration (env, config file, defaults)
//! - `cli`: Command-line interface, prompt loop and terminal UI
//!
//! # Usage
//!
//! ```bash
//! # Print the catalog
//! idcat list ~/scans
//!
//! # Find the file for an identifier
//! idcat find abc-123 --dir ~/scans
//!
//! # Interactive prompt / terminal UI
//! idcat prompt ~/scans
//! idcat tui
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod session;

// Re-export main types at crate root for convenience
pub use catalog::{extract, normalize, CanonicalId, Catalog, CatalogEntry};
pub use catalog::{FilenameSource, FsSource, ListingError, ListingFilter};
pub use session::Session;
