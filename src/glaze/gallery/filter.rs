use crate::model::PieceData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// The closed set of gallery orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    Featured,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::Featured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::Featured => "featured",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}

/// The sort a state asks for.
///
/// Decoding a query string never fails, so a `sort` value outside the known
/// vocabulary is carried as `Unrecognized` and sorts as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortOption {
    Key(SortKey),
    Unrecognized(String),
}

impl SortOption {
    /// Maps a raw control or query value. Empty means "not chosen".
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return SortOption::default();
        }
        match raw.parse() {
            Ok(key) => SortOption::Key(key),
            Err(_) => SortOption::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortOption::Key(key) => key.as_str(),
            SortOption::Unrecognized(raw) => raw,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == SortOption::default()
    }
}

impl Default for SortOption {
    fn default() -> Self {
        SortOption::Key(SortKey::default())
    }
}

impl From<SortKey> for SortOption {
    fn from(key: SortKey) -> Self {
        SortOption::Key(key)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active gallery constraints plus the chosen ordering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub techniques: Vec<String>,
    pub colors: Vec<String>,
    /// Only `true` constrains; there is no "non-featured only" state.
    pub featured_only: bool,
    pub sort: SortOption,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_technique(mut self, tag: impl Into<String>) -> Self {
        self.techniques.push(tag.into());
        self
    }

    pub fn with_color(mut self, tag: impl Into<String>) -> Self {
        self.colors.push(tag.into());
        self
    }

    pub fn with_featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    pub fn with_sort(mut self, sort: impl Into<SortOption>) -> Self {
        self.sort = sort.into();
        self
    }

    /// Number of constraints shown on the filter badge. Sort is not counted.
    pub fn active_count(&self) -> usize {
        self.techniques.len() + self.colors.len() + usize::from(self.featured_only)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_count() == 0
    }

    /// Whether `piece` satisfies every selected constraint.
    pub fn matches(&self, piece: &PieceData) -> bool {
        self.techniques.iter().all(|t| piece.has_technique(t))
            && self.colors.iter().all(|c| piece.has_color(c))
            && (!self.featured_only || piece.featured)
    }
}

/// Which tag axis to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Techniques,
    Colors,
}

/// Keeps the pieces that satisfy `state`, in their original order.
pub fn filter_pieces(pieces: &[PieceData], state: &FilterState) -> Vec<PieceData> {
    pieces
        .iter()
        .filter(|piece| state.matches(piece))
        .cloned()
        .collect()
}

/// Every distinct tag on `field`, sorted.
pub fn unique_values(pieces: &[PieceData], field: TagField) -> Vec<String> {
    let values: BTreeSet<&str> = pieces
        .iter()
        .flat_map(|piece| match field {
            TagField::Techniques => piece.techniques.iter(),
            TagField::Colors => piece.colors.iter(),
        })
        .map(String::as_str)
        .collect();
    values.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::fixtures::mock_pieces;

    fn slugs(pieces: &[PieceData]) -> Vec<&str> {
        pieces.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn empty_state_returns_everything_in_order() {
        let pieces = mock_pieces();
        let filtered = filter_pieces(&pieces, &FilterState::new());
        assert_eq!(filtered, pieces);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let state = FilterState::new().with_technique("carving");
        assert!(filter_pieces(&[], &state).is_empty());
    }

    #[test]
    fn single_technique() {
        let state = FilterState::new().with_technique("hand-building");
        let filtered = filter_pieces(&mock_pieces(), &state);
        assert_eq!(slugs(&filtered), vec!["earth-vessel", "textured-vase"]);
    }

    #[test]
    fn multiple_techniques_are_conjunctive() {
        let state = FilterState::new()
            .with_technique("hand-building")
            .with_technique("slip decoration");
        let filtered = filter_pieces(&mock_pieces(), &state);
        assert_eq!(slugs(&filtered), vec!["earth-vessel"]);
    }

    #[test]
    fn multiple_colors_are_conjunctive() {
        let state = FilterState::new().with_color("terracotta").with_color("cream");
        let filtered = filter_pieces(&mock_pieces(), &state);
        assert_eq!(slugs(&filtered), vec!["earth-vessel"]);
    }

    #[test]
    fn technique_and_color_combine() {
        let state = FilterState::new()
            .with_technique("hand-building")
            .with_color("terracotta");
        let filtered = filter_pieces(&mock_pieces(), &state);
        assert_eq!(slugs(&filtered), vec!["earth-vessel", "textured-vase"]);
    }

    #[test]
    fn featured_only() {
        let state = FilterState::new().with_featured_only(true);
        let filtered = filter_pieces(&mock_pieces(), &state);
        assert!(filtered.iter().all(|p| p.featured));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn no_match_returns_empty() {
        let state = FilterState::new()
            .with_technique("wheel-throwing")
            .with_color("terracotta");
        assert!(filter_pieces(&mock_pieces(), &state).is_empty());
    }

    #[test]
    fn excluded_pieces_violate_some_clause() {
        let pieces = mock_pieces();
        let state = FilterState::new()
            .with_color("cream")
            .with_featured_only(true);
        let filtered = filter_pieces(&pieces, &state);
        for piece in &pieces {
            let kept = filtered.iter().any(|p| p.slug == piece.slug);
            let satisfies = piece.has_color("cream") && piece.featured;
            assert_eq!(kept, satisfies, "{}", piece.slug);
        }
    }

    #[test]
    fn active_count_ignores_sort() {
        let state = FilterState::new()
            .with_technique("carving")
            .with_color("blue")
            .with_color("white")
            .with_featured_only(true)
            .with_sort(SortKey::TitleAsc);
        assert_eq!(state.active_count(), 4);
        assert!(FilterState::new().with_sort(SortKey::Featured).is_unconstrained());
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let colors = unique_values(&mock_pieces(), TagField::Colors);
        assert_eq!(
            colors,
            vec!["black", "blue", "celadon", "cream", "rust", "terracotta", "white"]
        );
    }

    #[test]
    fn sort_option_parsing() {
        assert_eq!(SortOption::parse(""), SortOption::default());
        assert_eq!(SortOption::parse("title-desc"), SortKey::TitleDesc.into());
        assert_eq!(
            SortOption::parse("price"),
            SortOption::Unrecognized("price".into())
        );
    }
}
