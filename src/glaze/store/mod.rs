//! # Catalog Layer
//!
//! The [`Catalog`] trait supplies piece records to the rest of the library.
//! Pieces arrive already shaped by the content collection; a catalog only
//! reads, writes and lists them.
//!
//! ## Implementations
//!
//! - [`fs::FileCatalog`]: one `<slug>.json` file per piece in a directory
//! - [`memory::InMemoryCatalog`]: in-memory catalog for testing
//!
//! ## Storage Format
//!
//! ```text
//! content/pieces/
//! ├── earth-vessel.json
//! ├── spiral-bowl.json
//! └── ...
//! ```
//!
//! The file stem is the slug. Keys follow the content collection's camelCase
//! (`mainImage`, `detailImages`, `aiDescription`).

use crate::error::Result;
use crate::model::{CatalogEntry, Piece};

pub mod fs;
pub mod memory;

/// Abstract interface for piece storage.
pub trait Catalog {
    /// Save a piece under `slug` (create or replace)
    fn save_piece(&mut self, slug: &str, piece: &Piece) -> Result<()>;

    /// Get a piece by slug
    fn get_piece(&self, slug: &str) -> Result<Piece>;

    /// Every piece, ordered by slug
    fn list_pieces(&self) -> Result<Vec<CatalogEntry>>;
}
