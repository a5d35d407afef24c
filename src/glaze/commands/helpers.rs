use crate::commands::ListedPiece;
use crate::error::Result;
use crate::model::{CatalogEntry, PieceData};
use crate::store::Catalog;
use std::collections::HashMap;

/// Every catalog entry alongside the record the engine filters on.
pub fn catalog_records<C: Catalog + ?Sized>(
    catalog: &C,
) -> Result<(Vec<CatalogEntry>, Vec<PieceData>)> {
    let entries = catalog.list_pieces()?;
    let records = entries.iter().map(CatalogEntry::to_data).collect();
    Ok((entries, records))
}

/// Maps engine output back onto catalog entries, numbering from 1.
pub fn listed_in_order(entries: &[CatalogEntry], ordered: &[PieceData]) -> Vec<ListedPiece> {
    let by_slug: HashMap<&str, &CatalogEntry> =
        entries.iter().map(|e| (e.slug.as_str(), e)).collect();

    ordered
        .iter()
        .filter_map(|record| by_slug.get(record.slug.as_str()))
        .enumerate()
        .map(|(i, entry)| ListedPiece {
            position: i + 1,
            entry: (*entry).clone(),
        })
        .collect()
}
