//! Gallery filter binder.
//!
//! Reads the server-rendered cards and controls, drives them from the pure
//! engine in [`crate::gallery`], and keeps the URL and the badge in sync.
//!
//! Card contract (one `.pottery-card` per piece):
//!
//! ```text
//! data-piece-id="earth-vessel"
//! data-date="2025-03-15"
//! data-techniques='["hand-building","carving"]'
//! data-colors='["terracotta"]'
//! data-featured="true"
//! <h2>Earth Vessel</h2>
//! ```
//!
//! Controls: `[data-technique]` and `[data-color]` pills, `#featured-only`
//! checkbox, `#sort-select`, `.clear-filters`. The binder only activates when
//! a `.gallery-filters` container exists.
//!
//! Each pill is a two-state toggle (inactive ↔ active). Every transition
//! recomputes the state from the controls, re-applies the plan, pushes the
//! URL and refreshes the badge, in that order.

use super::{Document, DomEvent, EventKind, ListenerId, NodeId, Selector};
use crate::gallery::query::{decode, encode};
use crate::gallery::view::{filter_label, plan, GalleryPlan, DEFAULT_STAGGER_MS};
use crate::gallery::{FilterState, SortOption};
use crate::model::{parse_timestamp, PieceData};

pub const CONTAINER_CLASS: &str = "gallery-filters";
pub const CARD_CLASS: &str = "pottery-card";
pub const NO_RESULTS_CLASS: &str = "no-results";
pub const FILTER_COUNT_CLASS: &str = "filter-count";
pub const CLEAR_CLASS: &str = "clear-filters";
pub const FEATURED_ID: &str = "featured-only";
pub const SORT_ID: &str = "sort-select";
pub const TECHNIQUE_ATTR: &str = "data-technique";
pub const COLOR_ATTR: &str = "data-color";
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryOptions {
    /// Reveal delay between consecutive visible cards.
    pub stagger_ms: u64,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            stagger_ms: DEFAULT_STAGGER_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Pill,
    Featured,
    Sort,
    Clear,
}

#[derive(Debug, Clone)]
struct Binding {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    control: Control,
}

/// Live binding between a gallery page and the filter engine.
#[derive(Debug)]
pub struct GalleryBinder {
    bindings: Vec<Binding>,
    options: GalleryOptions,
}

impl GalleryBinder {
    /// Initializes the page from its URL and wires every control.
    ///
    /// Returns `None`, touching nothing, when the page has no
    /// `.gallery-filters` container.
    pub fn attach<D: Document + ?Sized>(doc: &mut D, options: GalleryOptions) -> Option<Self> {
        if doc.query(Selector::Class(CONTAINER_CLASS)).is_none() {
            tracing::debug!("no .{} container, gallery filters disabled", CONTAINER_CLASS);
            return None;
        }

        let state = decode(&doc.location_search());
        initialize_controls(doc, &state);
        apply_filters(doc, &state, options.stagger_ms);
        update_filter_count(doc, &state);

        let mut binder = Self {
            bindings: Vec::new(),
            options,
        };
        for attr in [TECHNIQUE_ATTR, COLOR_ATTR] {
            for pill in doc.query_all(Selector::Attr(attr)) {
                binder.bind(doc, pill, EventKind::Click, Control::Pill);
            }
        }
        if let Some(checkbox) = doc.query(Selector::Id(FEATURED_ID)) {
            binder.bind(doc, checkbox, EventKind::Change, Control::Featured);
        }
        if let Some(select) = doc.query(Selector::Id(SORT_ID)) {
            binder.bind(doc, select, EventKind::Change, Control::Sort);
        }
        if let Some(clear) = doc.query(Selector::Class(CLEAR_CLASS)) {
            binder.bind(doc, clear, EventKind::Click, Control::Clear);
        }

        tracing::debug!(
            listeners = binder.bindings.len(),
            active = state.active_count(),
            "gallery filters attached"
        );
        Some(binder)
    }

    /// Runs `event` to completion. Returns whether a bound control handled it.
    pub fn handle<D: Document + ?Sized>(&self, doc: &mut D, event: &DomEvent) -> bool {
        let Some(binding) = self
            .bindings
            .iter()
            .find(|b| b.kind == event.kind && doc.is_within(event.target, b.node))
        else {
            return false;
        };

        match binding.control {
            Control::Pill => {
                let active = doc.toggle_class(binding.node, ACTIVE_CLASS);
                doc.set_attribute(binding.node, "aria-pressed", &active.to_string());
                self.refresh(doc);
            }
            Control::Featured | Control::Sort => self.refresh(doc),
            Control::Clear => {
                clear_filters(doc, self.options.stagger_ms);
            }
        }
        true
    }

    /// Removes every listener this binder registered.
    pub fn detach<D: Document + ?Sized>(self, doc: &mut D) {
        for binding in self.bindings {
            doc.unlisten(binding.id);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.bindings.len()
    }

    fn bind<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        node: NodeId,
        kind: EventKind,
        control: Control,
    ) {
        let id = doc.listen(node, kind);
        self.bindings.push(Binding {
            id,
            node,
            kind,
            control,
        });
    }

    fn refresh<D: Document + ?Sized>(&self, doc: &mut D) {
        let state = current_state(doc);
        apply_filters(doc, &state, self.options.stagger_ms);
        update_url(doc, &state);
        update_filter_count(doc, &state);
    }
}

/// Reads every card into a record, paired with its node.
pub fn read_pieces<D: Document + ?Sized>(doc: &D) -> Vec<(NodeId, PieceData)> {
    doc.query_all(Selector::Class(CARD_CLASS))
        .into_iter()
        .map(|card| (card, read_piece(doc, card)))
        .collect()
}

fn read_piece<D: Document + ?Sized>(doc: &D, card: NodeId) -> PieceData {
    PieceData {
        slug: doc.attribute(card, "data-piece-id").unwrap_or_default(),
        title: doc
            .query_within(card, Selector::Tag("h2"))
            .map(|h2| doc.text(h2))
            .unwrap_or_default(),
        date: doc
            .attribute(card, "data-date")
            .and_then(|raw| parse_timestamp(&raw)),
        techniques: parse_tags(doc.attribute(card, "data-techniques").as_deref()),
        colors: parse_tags(doc.attribute(card, "data-colors").as_deref()),
        featured: doc.attribute(card, "data-featured").as_deref() == Some("true"),
    }
}

/// Decodes a JSON string-array attribute. Missing or malformed is empty.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(attribute = raw, error = %e, "unreadable tag list, treating as empty");
            Vec::new()
        }
    }
}

/// The state the controls currently express.
pub fn current_state<D: Document + ?Sized>(doc: &D) -> FilterState {
    let active = |attr: &str| -> Vec<String> {
        doc.query_all(Selector::Attr(attr))
            .into_iter()
            .filter(|&pill| doc.has_class(pill, ACTIVE_CLASS))
            .filter_map(|pill| doc.attribute(pill, attr))
            .filter(|tag| !tag.is_empty())
            .collect()
    };

    FilterState {
        techniques: active(TECHNIQUE_ATTR),
        colors: active(COLOR_ATTR),
        featured_only: doc
            .query(Selector::Id(FEATURED_ID))
            .is_some_and(|checkbox| doc.is_checked(checkbox)),
        sort: doc
            .query(Selector::Id(SORT_ID))
            .map(|select| SortOption::parse(&doc.value(select)))
            .unwrap_or_default(),
    }
}

/// Shows, hides and orders the cards for `state`.
pub fn apply_filters<D: Document + ?Sized>(
    doc: &mut D,
    state: &FilterState,
    stagger_ms: u64,
) -> GalleryPlan {
    let cards = read_pieces(doc);
    let records: Vec<PieceData> = cards.iter().map(|(_, piece)| piece.clone()).collect();
    let plan = plan(&records, state, stagger_ms);

    for ((card, _), placement) in cards.iter().zip(&plan.placements) {
        let card = *card;
        match placement.order {
            Some(order) => {
                doc.remove_class(card, HIDDEN_CLASS);
                doc.set_style(card, "display", "");
                doc.set_style(card, "order", &order.to_string());
                doc.set_style(card, "animation-delay", &format!("{}ms", placement.delay_ms));
            }
            None => {
                doc.add_class(card, HIDDEN_CLASS);
                doc.set_style(card, "display", "none");
            }
        }
    }

    if let Some(no_results) = doc.query(Selector::Class(NO_RESULTS_CLASS)) {
        let display = if plan.is_empty() { "block" } else { "none" };
        doc.set_style(no_results, "display", display);
    }

    tracing::debug!(
        cards = cards.len(),
        visible = plan.visible_count(),
        sort = %state.sort,
        "applied gallery filters"
    );
    plan
}

pub fn update_filter_count<D: Document + ?Sized>(doc: &mut D, state: &FilterState) {
    let Some(badge) = doc.query(Selector::Class(FILTER_COUNT_CLASS)) else {
        return;
    };
    match filter_label(state.active_count()) {
        Some(label) => {
            doc.set_style(badge, "display", "inline");
            doc.set_text(badge, &label);
        }
        None => doc.set_style(badge, "display", "none"),
    }
}

pub fn update_url<D: Document + ?Sized>(doc: &mut D, state: &FilterState) {
    let url = state.to_url(&doc.location_path());
    tracing::trace!(url = %url, query = %encode(state), "pushing gallery state");
    doc.push_history(&url);
}

/// Resets every control and applies the default state in one update.
pub fn clear_filters<D: Document + ?Sized>(doc: &mut D, stagger_ms: u64) {
    for attr in [TECHNIQUE_ATTR, COLOR_ATTR] {
        for pill in doc.query_all(Selector::Attr(attr)) {
            if doc.has_class(pill, ACTIVE_CLASS) {
                doc.remove_class(pill, ACTIVE_CLASS);
                doc.set_attribute(pill, "aria-pressed", "false");
            }
        }
    }
    if let Some(checkbox) = doc.query(Selector::Id(FEATURED_ID)) {
        doc.set_checked(checkbox, false);
    }
    let state = FilterState::default();
    if let Some(select) = doc.query(Selector::Id(SORT_ID)) {
        doc.set_value(select, state.sort.as_str());
    }

    apply_filters(doc, &state, stagger_ms);
    update_url(doc, &state);
    update_filter_count(doc, &state);
}

fn initialize_controls<D: Document + ?Sized>(doc: &mut D, state: &FilterState) {
    let selections = state
        .techniques
        .iter()
        .map(|t| (TECHNIQUE_ATTR, t))
        .chain(state.colors.iter().map(|c| (COLOR_ATTR, c)));
    for (attr, tag) in selections {
        if let Some(pill) = doc.query(Selector::AttrEq(attr, tag)) {
            doc.add_class(pill, ACTIVE_CLASS);
            doc.set_attribute(pill, "aria-pressed", "true");
        }
    }

    if state.featured_only {
        if let Some(checkbox) = doc.query(Selector::Id(FEATURED_ID)) {
            doc.set_checked(checkbox, true);
        }
    }
    if let Some(select) = doc.query(Selector::Id(SORT_ID)) {
        doc.set_value(select, state.sort.as_str());
    }
}
