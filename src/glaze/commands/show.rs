use crate::commands::{CmdResult, ListedPiece};
use crate::error::Result;
use crate::model::CatalogEntry;
use crate::store::Catalog;

pub fn run<C: Catalog + ?Sized>(catalog: &C, slug: &str) -> Result<CmdResult> {
    let piece = catalog.get_piece(slug)?;
    let images = piece.images();
    let listed = ListedPiece {
        position: 1,
        entry: CatalogEntry::new(slug, piece),
    };
    Ok(CmdResult::default()
        .with_listed_pieces(vec![listed])
        .with_images(images))
}
