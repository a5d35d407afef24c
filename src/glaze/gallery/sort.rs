use super::filter::{SortKey, SortOption};
use crate::model::PieceData;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Returns a new, ordered copy of `pieces`. The input is never touched.
///
/// The underlying sort is stable, so equal keys keep their incoming order.
pub fn sort_pieces(pieces: &[PieceData], sort: &SortOption) -> Vec<PieceData> {
    let mut sorted = pieces.to_vec();
    let SortOption::Key(key) = sort else {
        return sorted;
    };

    match key {
        SortKey::DateDesc => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::DateAsc => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::TitleAsc => sorted.sort_by(|a, b| collate(&a.title, &b.title)),
        SortKey::TitleDesc => sorted.sort_by(|a, b| collate(&b.title, &a.title)),
        SortKey::Featured => sorted.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| b.date.cmp(&a.date))
        }),
    }
    sorted
}

/// Human-oriented string comparison.
///
/// Letters compare case- and accent-insensitively first; only when two titles
/// are otherwise equal does accent, then case (lowercase first), decide.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| {
            // lowercase sorts before uppercase at the same position
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn primary_key(s: &str) -> Vec<char> {
    s.nfd()
        .filter(|&c| !is_combining_mark(c))
        .flat_map(char::to_lowercase)
        .map(base_letter)
        .collect()
}

/// Lowercased but with accents kept, so `e` orders before `é`.
fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Letters whose stroke or slash is part of the code point and so has no
/// canonical decomposition.
fn base_letter(c: char) -> char {
    match c {
        'ł' => 'l',
        'ø' => 'o',
        'đ' | 'ð' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ŧ' => 't',
        other => other,
    }
}
