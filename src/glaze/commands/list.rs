use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::gallery::view::filter_label;
use crate::gallery::{filter_pieces, sort_pieces, FilterState};
use crate::store::Catalog;

use super::helpers::{catalog_records, listed_in_order};

pub fn run<C: Catalog + ?Sized>(catalog: &C, state: FilterState) -> Result<CmdResult> {
    let (entries, records) = catalog_records(catalog)?;
    let filtered = filter_pieces(&records, &state);
    let ordered = sort_pieces(&filtered, &state.sort);
    let listed = listed_in_order(&entries, &ordered);

    let mut result = CmdResult::default().with_listed_pieces(listed);
    if let Some(label) = filter_label(state.active_count()) {
        result.add_message(CmdMessage::info(format!(
            "{} ({} of {} pieces)",
            label,
            ordered.len(),
            records.len()
        )));
    }
    if records.is_empty() {
        result.add_message(CmdMessage::warning("The catalog has no pieces."));
    } else if ordered.is_empty() {
        result.add_message(CmdMessage::info("No pieces match the selected filters."));
    }
    Ok(result.with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::SortKey;
    use crate::store::memory::fixtures::CatalogFixture;
    use crate::store::memory::InMemoryCatalog;

    fn slugs(result: &CmdResult) -> Vec<&str> {
        result
            .listed_pieces
            .iter()
            .map(|p| p.entry.slug.as_str())
            .collect()
    }

    #[test]
    fn lists_everything_newest_first() {
        let catalog = CatalogFixture::new().with_sample_gallery().catalog;
        let result = run(&catalog, FilterState::default()).unwrap();

        assert_eq!(
            slugs(&result),
            vec!["textured-vase", "earth-vessel", "spiral-bowl", "azure-plate"]
        );
        assert_eq!(result.listed_pieces[0].position, 1);
        assert_eq!(result.query.as_deref(), Some(""));
        assert!(result.messages.is_empty());
    }

    #[test]
    fn filters_and_sorts() {
        let catalog = CatalogFixture::new().with_sample_gallery().catalog;
        let state = FilterState::new()
            .with_color("cream")
            .with_sort(SortKey::TitleDesc);
        let result = run(&catalog, state).unwrap();

        assert_eq!(slugs(&result), vec!["spiral-bowl", "earth-vessel"]);
        assert_eq!(result.query.as_deref(), Some("?color=cream&sort=title-desc"));
        assert_eq!(result.messages[0].content, "1 filter active (2 of 4 pieces)");
    }

    #[test]
    fn reports_no_matches() {
        let catalog = CatalogFixture::new().with_sample_gallery().catalog;
        let state = FilterState::new().with_technique("raku");
        let result = run(&catalog, state).unwrap();
        assert!(result.listed_pieces.is_empty());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "No pieces match the selected filters."));
    }

    #[test]
    fn empty_catalog_warns() {
        let result = run(&InMemoryCatalog::new(), FilterState::default()).unwrap();
        assert!(result.listed_pieces.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
