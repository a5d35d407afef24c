//! Server-rendered markup for the gallery and the lightbox.
//!
//! Produces exactly the structure the binders expect, so tests and the CLI's
//! `render` command start from the same page a visitor would receive.

use super::gallery::{
    CARD_CLASS, CLEAR_CLASS, COLOR_ATTR, CONTAINER_CLASS, FEATURED_ID, FILTER_COUNT_CLASS,
    NO_RESULTS_CLASS, SORT_ID, TECHNIQUE_ATTR,
};
use super::memory::{Element, MemoryDocument};
use super::{Document, NodeId, Selector};
use crate::gallery::{unique_values, SortKey, TagField};
use crate::lightbox::LightboxImage;
use crate::model::PieceData;
use chrono::SecondsFormat;

/// Node handles for a freshly built gallery page.
#[derive(Debug, Clone)]
pub struct GalleryMarkup {
    pub container: NodeId,
    pub grid: NodeId,
    pub cards: Vec<NodeId>,
}

/// Appends filter controls, the card grid and the empty-state message to
/// `<body>`. Cards appear in `pieces` order.
pub fn build_gallery(doc: &mut MemoryDocument, pieces: &[PieceData]) -> GalleryMarkup {
    let body = doc.body();
    let container = doc.append(body, Element::new("section").class(CONTAINER_CLASS));

    for (attr, field, label) in [
        (TECHNIQUE_ATTR, TagField::Techniques, "Technique"),
        (COLOR_ATTR, TagField::Colors, "Color"),
    ] {
        let group = doc.append(
            container,
            Element::new("div").class("filter-group").attr("aria-label", label),
        );
        for tag in unique_values(pieces, field) {
            doc.append(
                group,
                Element::new("button")
                    .class("filter-pill")
                    .attr(attr, tag.as_str())
                    .attr("aria-pressed", "false")
                    .text(tag),
            );
        }
    }

    let label = doc.append(container, Element::new("label").text("Featured only"));
    doc.append(
        label,
        Element::new("input")
            .id(FEATURED_ID)
            .attr("type", "checkbox"),
    );

    let select = doc.append(
        container,
        Element::new("select")
            .id(SORT_ID)
            .value(SortKey::default().as_str()),
    );
    for key in SortKey::ALL {
        doc.append(
            select,
            Element::new("option")
                .attr("value", key.as_str())
                .text(sort_label(key)),
        );
    }

    doc.append(
        container,
        Element::new("span")
            .class(FILTER_COUNT_CLASS)
            .attr("aria-live", "polite"),
    );
    doc.append(
        container,
        Element::new("button").class(CLEAR_CLASS).text("Clear filters"),
    );

    let grid = doc.append(body, Element::new("div").class("gallery-grid"));
    let cards = pieces
        .iter()
        .map(|piece| append_card(doc, grid, piece))
        .collect();

    doc.append(
        body,
        Element::new("p")
            .class(NO_RESULTS_CLASS)
            .text("No pieces match the selected filters."),
    );

    GalleryMarkup {
        container,
        grid,
        cards,
    }
}

fn append_card(doc: &mut MemoryDocument, grid: NodeId, piece: &PieceData) -> NodeId {
    let date = piece
        .date
        .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default();
    let card = doc.append(
        grid,
        Element::new("article")
            .class(CARD_CLASS)
            .attr("data-piece-id", piece.slug.as_str())
            .attr("data-date", date)
            .attr("data-techniques", json_tags(&piece.techniques))
            .attr("data-colors", json_tags(&piece.colors))
            .attr("data-featured", piece.featured.to_string()),
    );
    let link = doc.append(
        card,
        Element::new("a").attr("href", format!("/pieces/{}", piece.slug)),
    );
    doc.append(link, Element::new("h2").text(piece.title.as_str()));
    card
}

fn json_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::DateDesc => "Newest first",
        SortKey::DateAsc => "Oldest first",
        SortKey::TitleAsc => "Title A-Z",
        SortKey::TitleDesc => "Title Z-A",
        SortKey::Featured => "Featured first",
    }
}

/// The pill for `tag` on the `attr` axis, if rendered.
pub fn pill_for<D: Document + ?Sized>(doc: &D, attr: &str, tag: &str) -> Option<NodeId> {
    doc.query(Selector::AttrEq(attr, tag))
}

/// Node handles for a lightbox dialog.
#[derive(Debug, Clone)]
pub struct LightboxMarkup {
    pub container: NodeId,
    pub lightbox: NodeId,
    pub backdrop: NodeId,
    pub close: NodeId,
    pub prev: NodeId,
    pub next: NodeId,
    pub image: NodeId,
    pub caption: NodeId,
    pub thumbnails: Vec<NodeId>,
}

/// Appends a thumbnail strip plus a hidden lightbox dialog inside a container
/// with id `container_id`.
pub fn build_lightbox(
    doc: &mut MemoryDocument,
    container_id: &str,
    images: &[LightboxImage],
) -> LightboxMarkup {
    let body = doc.body();
    let container = doc.append(body, Element::new("div").id(container_id));

    let strip = doc.append(container, Element::new("div").class("detail-images"));
    let thumbnails = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            doc.append(
                strip,
                Element::new("img")
                    .class("lightbox-trigger")
                    .attr("src", image.src.as_str())
                    .attr("alt", image.alt.as_str())
                    .attr("data-index", i.to_string()),
            )
        })
        .collect();

    let lightbox = doc.append(
        container,
        Element::new("div")
            .class("lightbox")
            .attr("role", "dialog")
            .attr("aria-hidden", "true"),
    );
    let backdrop = doc.append(lightbox, Element::new("div").class("lightbox-backdrop"));
    let close = doc.append(
        lightbox,
        Element::new("button")
            .class("lightbox-close")
            .attr("aria-label", "Close"),
    );
    let prev = doc.append(
        lightbox,
        Element::new("button")
            .class("lightbox-prev")
            .attr("aria-label", "Previous image"),
    );
    let next = doc.append(
        lightbox,
        Element::new("button")
            .class("lightbox-next")
            .attr("aria-label", "Next image"),
    );
    let figure = doc.append(lightbox, Element::new("figure"));
    let image = doc.append(figure, Element::new("img").class("lightbox-image"));
    let caption = doc.append(figure, Element::new("figcaption").class("lightbox-caption"));

    LightboxMarkup {
        container,
        lightbox,
        backdrop,
        close,
        prev,
        next,
        image,
        caption,
        thumbnails,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::fixtures::mock_pieces;

    #[test]
    fn renders_one_pill_per_tag() {
        let mut doc = MemoryDocument::new();
        build_gallery(&mut doc, &mock_pieces());
        assert_eq!(doc.query_all(Selector::Attr(COLOR_ATTR)).len(), 7);
        assert!(pill_for(&doc, TECHNIQUE_ATTR, "slip decoration").is_some());
    }

    #[test]
    fn cards_carry_attribute_contract() {
        let mut doc = MemoryDocument::new();
        let markup = build_gallery(&mut doc, &mock_pieces());
        let first = markup.cards[0];
        assert_eq!(doc.attribute(first, "data-piece-id").as_deref(), Some("earth-vessel"));
        assert_eq!(doc.attribute(first, "data-date").as_deref(), Some("2025-03-15T00:00:00Z"));
        assert_eq!(
            doc.attribute(first, "data-colors").as_deref(),
            Some(r#"["terracotta","cream","rust"]"#)
        );
        assert_eq!(doc.attribute(first, "data-featured").as_deref(), Some("true"));
    }
}
