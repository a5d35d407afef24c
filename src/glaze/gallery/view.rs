//! Presenter: turns a card list and a [`FilterState`] into a [`GalleryPlan`].
//!
//! The plan says everything the page has to change (which cards show, in
//! what order, with what reveal delay, whether the empty message shows, what
//! the badge reads) without touching a document. Binders apply it.

use super::filter::{filter_pieces, FilterState};
use super::sort::sort_pieces;
use crate::model::PieceData;
use std::collections::HashMap;

pub const DEFAULT_STAGGER_MS: u64 = 50;

/// Where one card lands after filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPlacement {
    pub slug: String,
    /// Position in the sorted, filtered view. `None` means hidden.
    pub order: Option<usize>,
    pub delay_ms: u64,
}

impl CardPlacement {
    pub fn is_visible(&self) -> bool {
        self.order.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPlan {
    /// One entry per input card, in input order.
    pub placements: Vec<CardPlacement>,
    /// The visible pieces in display order.
    pub ordered: Vec<PieceData>,
    pub active_count: usize,
}

impl GalleryPlan {
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.ordered.len()
    }

    pub fn filter_label(&self) -> Option<String> {
        filter_label(self.active_count)
    }
}

/// Computes the plan for `cards` (in document order) under `state`.
pub fn plan(cards: &[PieceData], state: &FilterState, stagger_ms: u64) -> GalleryPlan {
    let filtered = filter_pieces(cards, state);
    let ordered = sort_pieces(&filtered, &state.sort);

    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(ordered.len());
    for (index, piece) in ordered.iter().enumerate() {
        positions.entry(piece.slug.as_str()).or_insert(index);
    }

    let placements = cards
        .iter()
        .map(|card| {
            let order = if card.slug.is_empty() {
                None
            } else {
                positions.get(card.slug.as_str()).copied()
            };
            CardPlacement {
                slug: card.slug.clone(),
                order,
                delay_ms: order.map_or(0, |i| i as u64 * stagger_ms),
            }
        })
        .collect();

    GalleryPlan {
        placements,
        ordered,
        active_count: state.active_count(),
    }
}

/// Badge text for `count` active constraints; `None` hides the badge.
pub fn filter_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 filter active".to_string()),
        n => Some(format!("{} filters active", n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::filter::SortKey;
    use crate::gallery::fixtures::mock_pieces;

    #[test]
    fn unconstrained_plan_shows_everything_sorted_newest_first() {
        let plan = plan(&mock_pieces(), &FilterState::default(), DEFAULT_STAGGER_MS);

        let orders: Vec<_> = plan.placements.iter().map(|p| p.order).collect();
        // earth-vessel, spiral-bowl, textured-vase, azure-plate in input order
        assert_eq!(orders, vec![Some(1), Some(2), Some(0), Some(3)]);
        assert_eq!(plan.placements[1].delay_ms, 100);
        assert!(!plan.is_empty());
        assert_eq!(plan.filter_label(), None);
    }

    #[test]
    fn hidden_cards_have_no_order() {
        let state = FilterState::new()
            .with_featured_only(true)
            .with_sort(SortKey::TitleAsc);
        let plan = plan(&mock_pieces(), &state, 50);

        let visible: Vec<_> = plan
            .placements
            .iter()
            .filter(|p| p.is_visible())
            .map(|p| (p.slug.as_str(), p.order.unwrap()))
            .collect();
        assert_eq!(visible, vec![("earth-vessel", 0), ("textured-vase", 1)]);
        assert_eq!(plan.placements[1].delay_ms, 0);
        assert_eq!(plan.filter_label().as_deref(), Some("1 filter active"));
    }

    #[test]
    fn empty_result_is_flagged() {
        let state = FilterState::new().with_color("chartreuse").with_color("blue");
        let plan = plan(&mock_pieces(), &state, 50);
        assert!(plan.is_empty());
        assert!(plan.placements.iter().all(|p| !p.is_visible()));
        assert_eq!(plan.filter_label().as_deref(), Some("2 filters active"));
    }

    #[test]
    fn cards_without_slug_stay_hidden() {
        let mut cards = mock_pieces();
        cards[0].slug.clear();
        let plan = plan(&cards, &FilterState::default(), 50);
        assert!(!plan.placements[0].is_visible());
    }
}
