use crate::commands::{CmdResult, TagSummary};
use crate::error::Result;
use crate::gallery::{unique_values, TagField};
use crate::store::Catalog;

use super::helpers::catalog_records;

pub fn run<C: Catalog + ?Sized>(catalog: &C) -> Result<CmdResult> {
    let (_, records) = catalog_records(catalog)?;
    let summary = TagSummary {
        techniques: unique_values(&records, TagField::Techniques),
        colors: unique_values(&records, TagField::Colors),
    };
    Ok(CmdResult::default().with_tags(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::CatalogFixture;

    #[test]
    fn collects_sorted_vocabulary() {
        let catalog = CatalogFixture::new().with_sample_gallery().catalog;
        let tags = run(&catalog).unwrap().tags.unwrap();
        assert_eq!(tags.techniques.first().map(String::as_str), Some("carving"));
        assert_eq!(tags.techniques.len(), 7);
        assert_eq!(tags.colors.len(), 7);
    }
}
