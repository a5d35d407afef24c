use super::Catalog;
use crate::error::{GlazeError, Result};
use crate::model::{CatalogEntry, Piece};
use std::collections::BTreeMap;

/// In-memory catalog for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryCatalog {
    pieces: BTreeMap<String, Piece>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Catalog for InMemoryCatalog {
    fn save_piece(&mut self, slug: &str, piece: &Piece) -> Result<()> {
        self.pieces.insert(slug.to_string(), piece.clone());
        Ok(())
    }

    fn get_piece(&self, slug: &str) -> Result<Piece> {
        self.pieces
            .get(slug)
            .cloned()
            .ok_or_else(|| GlazeError::PieceNotFound(slug.to_string()))
    }

    fn list_pieces(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self
            .pieces
            .iter()
            .map(|(slug, piece)| CatalogEntry::new(slug.clone(), piece.clone()))
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::parse_timestamp;

    pub struct CatalogFixture {
        pub catalog: InMemoryCatalog,
    }

    impl Default for CatalogFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CatalogFixture {
        pub fn new() -> Self {
            Self {
                catalog: InMemoryCatalog::new(),
            }
        }

        pub fn with_piece(
            mut self,
            slug: &str,
            title: &str,
            date: &str,
            techniques: &[&str],
            colors: &[&str],
            featured: bool,
        ) -> Self {
            let date = parse_timestamp(date).expect("fixture date");
            let mut piece = Piece::new(title, date, format!("/images/{}.jpg", slug));
            piece.techniques = techniques.iter().map(|s| s.to_string()).collect();
            piece.colors = colors.iter().map(|s| s.to_string()).collect();
            piece.featured = featured;
            piece.description = format!("{} description", title);
            self.catalog.save_piece(slug, &piece).unwrap();
            self
        }

        /// The four-piece gallery used across the command tests.
        pub fn with_sample_gallery(self) -> Self {
            self.with_piece(
                "earth-vessel",
                "Earth Vessel",
                "2025-03-15",
                &["hand-building", "slip decoration", "reduction firing"],
                &["terracotta", "cream", "rust"],
                true,
            )
            .with_piece(
                "spiral-bowl",
                "Spiral Bowl",
                "2025-02-10",
                &["wheel-throwing", "carving"],
                &["celadon", "cream"],
                false,
            )
            .with_piece(
                "textured-vase",
                "Textured Vase",
                "2025-04-01",
                &["hand-building", "texture stamping"],
                &["terracotta", "black"],
                true,
            )
            .with_piece(
                "azure-plate",
                "Azure Plate",
                "2025-01-20",
                &["wheel-throwing", "glazing"],
                &["blue", "white"],
                false,
            )
        }
    }
}
