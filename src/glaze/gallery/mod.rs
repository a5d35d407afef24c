//! # Gallery Engine
//!
//! Pure functions over in-memory piece lists. Nothing in here reads or writes
//! a document, so everything is unit tested directly.
//!
//! - [`filter`]: [`FilterState`], the conjunctive filter and tag vocabulary
//! - [`sort`]: the five orderings and the title collation they use
//! - [`query`]: query-string encoding of a [`FilterState`]
//! - [`view`]: the presenter that combines the above into a [`GalleryPlan`]
//!
//! Data flows one way: card records → `filter_pieces` → `sort_pieces` →
//! `GalleryPlan`. The state itself round-trips through [`query::encode`] and
//! [`query::decode`].

pub mod filter;
pub mod query;
pub mod sort;
pub mod view;

pub use filter::{filter_pieces, unique_values, FilterState, SortKey, SortOption, TagField};
pub use sort::sort_pieces;
pub use view::{plan, CardPlacement, GalleryPlan, DEFAULT_STAGGER_MS};

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{parse_timestamp, PieceData};

    fn piece(slug: &str, title: &str, date: &str, techniques: &[&str], colors: &[&str], featured: bool) -> PieceData {
        PieceData {
            slug: slug.to_string(),
            title: title.to_string(),
            date: parse_timestamp(date),
            techniques: techniques.iter().map(|s| s.to_string()).collect(),
            colors: colors.iter().map(|s| s.to_string()).collect(),
            featured,
        }
    }

    /// Four pieces with distinct dates, titles and a 2/2 featured split.
    pub fn mock_pieces() -> Vec<PieceData> {
        vec![
            piece(
                "earth-vessel",
                "Earth Vessel",
                "2025-03-15",
                &["hand-building", "slip decoration", "reduction firing"],
                &["terracotta", "cream", "rust"],
                true,
            ),
            piece(
                "spiral-bowl",
                "Spiral Bowl",
                "2025-02-10",
                &["wheel-throwing", "carving"],
                &["celadon", "cream"],
                false,
            ),
            piece(
                "textured-vase",
                "Textured Vase",
                "2025-04-01",
                &["hand-building", "texture stamping"],
                &["terracotta", "black"],
                true,
            ),
            piece(
                "azure-plate",
                "Azure Plate",
                "2025-01-20",
                &["wheel-throwing", "glazing"],
                &["blue", "white"],
                false,
            ),
        ]
    }
}
