//! Static page previews.
//!
//! Builds the page a visitor would receive into a [`MemoryDocument`], runs
//! the same binders the browser would, and serializes the result.

use crate::commands::CmdResult;
use crate::dom::gallery::{GalleryBinder, GalleryOptions};
use crate::dom::lightbox::LightboxBinder;
use crate::dom::markup::{build_gallery, build_lightbox};
use crate::dom::memory::MemoryDocument;
use crate::error::Result;
use crate::lightbox::position_index;
use crate::store::Catalog;
use crate::theme::{Preferences, ThemeStore};

use super::helpers::catalog_records;

pub const GALLERY_PATH: &str = "/gallery";
pub const LIGHTBOX_CONTAINER_ID: &str = "piece-gallery";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// The gallery page loaded with `query`.
    Gallery { query: String },
    /// A piece page, optionally with the lightbox opened at `open`.
    Piece { slug: String, open: Option<usize> },
}

pub fn run<C, P>(
    catalog: &C,
    prefs: &mut P,
    target: RenderTarget,
    stagger_ms: u64,
) -> Result<CmdResult>
where
    C: Catalog + ?Sized,
    P: Preferences + ?Sized,
{
    let mut result = CmdResult::default();
    let mut doc = match target {
        RenderTarget::Gallery { query } => {
            let query = query.trim_start_matches('?');
            let url = if query.is_empty() {
                GALLERY_PATH.to_string()
            } else {
                format!("{}?{}", GALLERY_PATH, query)
            };
            let mut doc = MemoryDocument::new().with_location(&url);
            let (_, records) = catalog_records(catalog)?;
            build_gallery(&mut doc, &records);

            if let Some(binder) = GalleryBinder::attach(&mut doc, GalleryOptions { stagger_ms }) {
                binder.detach(&mut doc);
            }
            result = result.with_state(crate::gallery::query::decode(query));
            doc
        }
        RenderTarget::Piece { slug, open } => {
            let piece = catalog.get_piece(&slug)?;
            let images = piece.images();
            let mut doc = MemoryDocument::new().with_location(&format!("/pieces/{}", slug));
            build_lightbox(&mut doc, LIGHTBOX_CONTAINER_ID, &images);

            let mut binder = LightboxBinder::attach(&mut doc, LIGHTBOX_CONTAINER_ID, images.clone());
            if let Some(index) = open {
                binder.open_at(&mut doc, position_index(index));
            }
            result = result.with_images(images);
            doc
        }
    };

    ThemeStore::new(prefs).apply(&mut doc)?;
    Ok(result.with_html(doc.to_html()))
}
