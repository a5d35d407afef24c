//! Query-string codec for gallery state.
//!
//! The vocabulary is small and fixed:
//!
//! ```text
//! ?technique=<tag>&technique=<tag>&color=<tag>&featured=true&sort=<key>
//! ```
//!
//! `technique` and `color` repeat once per selected tag. `featured` is only
//! written when set and `sort` only when it is not the default, so the
//! unconstrained state encodes to the empty string. Values use
//! `application/x-www-form-urlencoded` escaping, matching what browsers
//! produce for `URLSearchParams`.

use super::filter::{FilterState, SortOption};
use std::borrow::Cow;

pub const TECHNIQUE_PARAM: &str = "technique";
pub const COLOR_PARAM: &str = "color";
pub const FEATURED_PARAM: &str = "featured";
pub const SORT_PARAM: &str = "sort";

/// Encodes `state` as `?key=value&...`, or `""` when nothing needs writing.
pub fn encode(state: &FilterState) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    pairs.extend(state.techniques.iter().map(|t| (TECHNIQUE_PARAM, t.as_str())));
    pairs.extend(state.colors.iter().map(|c| (COLOR_PARAM, c.as_str())));
    if state.featured_only {
        pairs.push((FEATURED_PARAM, "true"));
    }
    if !state.sort.is_default() {
        pairs.push((SORT_PARAM, state.sort.as_str()));
    }

    if pairs.is_empty() {
        return String::new();
    }

    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{}", query)
}

/// Decodes a query string, with or without its leading `?`.
///
/// Never fails: unknown parameters are ignored, `featured` is only honored as
/// the literal `true`, and an unknown `sort` comes back as
/// [`SortOption::Unrecognized`].
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    // Single-valued params take their first occurrence, like `URLSearchParams::get`.
    let mut featured: Option<String> = None;
    let mut sort: Option<String> = None;

    for (key, value) in parse_pairs(query) {
        match key.as_str() {
            TECHNIQUE_PARAM => state.techniques.push(value),
            COLOR_PARAM => state.colors.push(value),
            FEATURED_PARAM => {
                featured.get_or_insert(value);
            }
            SORT_PARAM => {
                sort.get_or_insert(value);
            }
            _ => {}
        }
    }

    state.featured_only = featured.as_deref() == Some("true");
    state.sort = sort.map(|raw| SortOption::parse(&raw)).unwrap_or_default();
    state
}

/// Whether `query` carries `key` at all, whatever its value.
pub fn has_param(query: &str, key: &str) -> bool {
    parse_pairs(query).iter().any(|(k, _)| k == key)
}

impl FilterState {
    /// `path` with this state's query appended, or bare `path` when the
    /// state encodes to nothing.
    pub fn to_url(&self, path: &str) -> String {
        format!("{}{}", path, encode(self))
    }
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (form_decode(key), form_decode(value)),
            None => (form_decode(segment), String::new()),
        })
        .collect()
}

fn form_encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

fn form_decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::filter::SortKey;

    #[test]
    fn decodes_every_parameter() {
        let state =
            decode("?technique=hand-building&color=terracotta&featured=true&sort=date-desc");
        assert_eq!(state.techniques, vec!["hand-building"]);
        assert_eq!(state.colors, vec!["terracotta"]);
        assert!(state.featured_only);
        assert_eq!(state.sort, SortKey::DateDesc.into());
    }

    #[test]
    fn decodes_repeated_parameters_in_order() {
        let state = decode("technique=hand-building&technique=wheel-throwing&color=terracotta&color=celadon");
        assert_eq!(state.techniques, vec!["hand-building", "wheel-throwing"]);
        assert_eq!(state.colors, vec!["terracotta", "celadon"]);
    }

    #[test]
    fn detects_parameters_by_key() {
        assert!(has_param("?color=blue&sort=date-desc", SORT_PARAM));
        assert!(has_param("sort", SORT_PARAM));
        assert!(!has_param("?color=sort", SORT_PARAM));
    }

    #[test]
    fn empty_query_is_unconstrained() {
        assert_eq!(decode(""), FilterState::default());
        assert_eq!(decode("?"), FilterState::default());
    }

    #[test]
    fn featured_false_means_unconstrained() {
        assert!(!decode("?featured=false").featured_only);
        assert!(!decode("?featured=yes").featured_only);
        assert!(!decode("?featured").featured_only);
    }

    #[test]
    fn first_featured_value_wins() {
        assert!(decode("?featured=true&featured=false").featured_only);
        assert!(!decode("?featured=false&featured=true").featured_only);
    }

    #[test]
    fn unknown_sort_passes_through() {
        let state = decode("?sort=price-asc");
        assert_eq!(state.sort, SortOption::Unrecognized("price-asc".into()));
        assert_eq!(encode(&state), "?sort=price-asc");
    }

    #[test]
    fn empty_sort_is_default() {
        assert_eq!(decode("?sort=").sort, SortOption::default());
    }

    #[test]
    fn encodes_full_state() {
        let state = FilterState::new()
            .with_technique("hand-building")
            .with_color("terracotta")
            .with_featured_only(true)
            .with_sort(SortKey::TitleAsc);
        assert_eq!(
            encode(&state),
            "?technique=hand-building&color=terracotta&featured=true&sort=title-asc"
        );
    }

    #[test]
    fn default_state_encodes_to_empty() {
        assert_eq!(encode(&FilterState::default()), "");
        assert_eq!(
            encode(&FilterState::new().with_sort(SortKey::DateDesc)),
            ""
        );
    }

    #[test]
    fn spaces_use_plus() {
        let state = FilterState::new().with_technique("slip decoration");
        assert_eq!(encode(&state), "?technique=slip+decoration");
        assert_eq!(decode("?technique=slip+decoration").techniques, vec!["slip decoration"]);
        assert_eq!(decode("?technique=slip%20decoration").techniques, vec!["slip decoration"]);
    }

    #[test]
    fn reserved_characters_round_trip() {
        let state = FilterState::new().with_color("rust & ash").with_color("50%=grey");
        assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn reachable_states_round_trip() {
        for key in SortKey::ALL {
            for featured_only in [false, true] {
                let state = FilterState::new()
                    .with_technique("carving")
                    .with_technique("glazing")
                    .with_color("celadon")
                    .with_featured_only(featured_only)
                    .with_sort(key);
                assert_eq!(decode(&encode(&state)), state, "{:?}", state);
            }
        }
    }

    #[test]
    fn to_url_drops_empty_query() {
        assert_eq!(FilterState::default().to_url("/gallery"), "/gallery");
        assert_eq!(
            FilterState::new().with_color("blue").to_url("/gallery"),
            "/gallery?color=blue"
        );
    }
}
