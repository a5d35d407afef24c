//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for the
//! CLI. It dispatches to `commands/*.rs`, normalizes raw inputs (query
//! strings, tag flags, sort names) into a [`FilterState`], and returns
//! `Result<CmdResult>`. It never prints.
//!
//! `GlazeApi<C, P>` is generic over the catalog and the preference backend:
//! the binary uses `FileCatalog` + `FilePreferences`, tests use
//! `InMemoryCatalog` + `MemoryPreferences`.

use crate::commands;
use crate::commands::render::RenderTarget;
use crate::config::GlazeConfig;
use crate::error::{GlazeError, Result};
use crate::gallery::query::{decode, has_param, SORT_PARAM};
use crate::gallery::{FilterState, SortKey, SortOption};
use crate::store::Catalog;
use crate::theme::Preferences;

/// Gallery state as a UI collects it: an optional query string plus
/// explicit selections layered on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateRequest {
    pub query: Option<String>,
    pub techniques: Vec<String>,
    pub colors: Vec<String>,
    pub featured: bool,
    pub sort: Option<String>,
}

pub struct GlazeApi<C: Catalog, P: Preferences> {
    catalog: C,
    prefs: P,
    paths: commands::GlazePaths,
    config: GlazeConfig,
}

impl<C: Catalog, P: Preferences> GlazeApi<C, P> {
    pub fn new(catalog: C, prefs: P, paths: commands::GlazePaths, config: GlazeConfig) -> Self {
        Self {
            catalog,
            prefs,
            paths,
            config,
        }
    }

    pub fn list(&self, request: &StateRequest) -> Result<commands::CmdResult> {
        let state = self.resolve_state(request)?;
        commands::list::run(&self.catalog, state)
    }

    pub fn tags(&self) -> Result<commands::CmdResult> {
        commands::tags::run(&self.catalog)
    }

    pub fn show(&self, slug: &str) -> Result<commands::CmdResult> {
        commands::show::run(&self.catalog, slug)
    }

    pub fn encode_query(&self, request: &StateRequest) -> Result<commands::CmdResult> {
        Ok(commands::query::encode(resolve_explicit(request)?))
    }

    pub fn decode_query(&self, raw: &str) -> Result<commands::CmdResult> {
        Ok(commands::query::decode(raw))
    }

    pub fn theme(&mut self, action: ThemeAction) -> Result<commands::CmdResult> {
        commands::theme::run(&mut self.prefs, action)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn render(&mut self, target: RenderTarget) -> Result<commands::CmdResult> {
        commands::render::run(&self.catalog, &mut self.prefs, target, self.config.stagger_ms)
    }

    /// Like [`resolve_explicit`], but a request that names no sort anywhere
    /// takes the configured default.
    fn resolve_state(&self, request: &StateRequest) -> Result<FilterState> {
        let mut state = resolve_explicit(request)?;
        let query_sorts = request
            .query
            .as_deref()
            .is_some_and(|q| has_param(q, SORT_PARAM));
        if request.sort.is_none() && !query_sorts {
            state.sort = self.config.default_sort.into();
        }
        Ok(state)
    }
}

/// Decodes the query, then appends flag selections. A sort flag overrides
/// the query's sort and must name a known key.
fn resolve_explicit(request: &StateRequest) -> Result<FilterState> {
    let mut state = request.query.as_deref().map(decode).unwrap_or_default();

    for tag in &request.techniques {
        if !state.techniques.contains(tag) {
            state.techniques.push(tag.clone());
        }
    }
    for tag in &request.colors {
        if !state.colors.contains(tag) {
            state.colors.push(tag.clone());
        }
    }
    state.featured_only |= request.featured;

    if let Some(raw) = &request.sort {
        let key: SortKey = raw.parse().map_err(GlazeError::Api)?;
        state.sort = SortOption::Key(key);
    }
    Ok(state)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::theme::ThemeAction;
pub use commands::{CmdMessage, CmdResult, GlazePaths, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::CatalogFixture;
    use crate::store::memory::InMemoryCatalog;
    use crate::theme::{MemoryPreferences, Theme};

    fn api_with(config: GlazeConfig) -> GlazeApi<InMemoryCatalog, MemoryPreferences> {
        GlazeApi::new(
            CatalogFixture::new().with_sample_gallery().catalog,
            MemoryPreferences::new(),
            GlazePaths::new("/nonexistent/glaze"),
            config,
        )
    }

    fn api() -> GlazeApi<InMemoryCatalog, MemoryPreferences> {
        api_with(GlazeConfig::default())
    }

    #[test]
    fn flags_layer_on_top_of_query() {
        let request = StateRequest {
            query: Some("?color=cream".into()),
            techniques: vec!["carving".into()],
            colors: vec!["cream".into()],
            ..Default::default()
        };
        let state = resolve_explicit(&request).unwrap();
        assert_eq!(state.colors, vec!["cream"]);
        assert_eq!(state.techniques, vec!["carving"]);
    }

    #[test]
    fn unknown_sort_flag_is_rejected() {
        let request = StateRequest {
            sort: Some("price".into()),
            ..Default::default()
        };
        assert!(matches!(
            api().list(&request),
            Err(GlazeError::Api(_))
        ));
    }

    #[test]
    fn configured_default_sort_applies_when_unspecified() {
        let config = GlazeConfig {
            default_sort: SortKey::TitleAsc,
            ..Default::default()
        };
        let api = api_with(config);

        let result = api.list(&StateRequest::default()).unwrap();
        assert_eq!(result.listed_pieces[0].entry.slug, "azure-plate");

        let request = StateRequest {
            query: Some("sort=date-desc".into()),
            ..Default::default()
        };
        let result = api.list(&request).unwrap();
        assert_eq!(result.listed_pieces[0].entry.slug, "textured-vase");
    }

    #[test]
    fn encode_ignores_configured_default() {
        let config = GlazeConfig {
            default_sort: SortKey::Featured,
            ..Default::default()
        };
        let request = StateRequest {
            featured: true,
            ..Default::default()
        };
        let result = api_with(config).encode_query(&request).unwrap();
        assert_eq!(result.query.as_deref(), Some("?featured=true"));
    }

    #[test]
    fn dispatches_theme_and_show() {
        let mut api = api();
        let result = api.theme(ThemeAction::Toggle).unwrap();
        assert_eq!(result.theme, Some(Theme::Dark));

        let result = api.show("earth-vessel").unwrap();
        assert_eq!(result.listed_pieces.len(), 1);
    }

    #[test]
    fn render_uses_stored_theme() {
        let mut api = api();
        api.theme(ThemeAction::Set(Theme::Dark)).unwrap();
        let result = api
            .render(RenderTarget::Gallery {
                query: String::new(),
            })
            .unwrap();
        assert!(result.html.unwrap().contains("data-theme=\"dark\""));
    }
}
