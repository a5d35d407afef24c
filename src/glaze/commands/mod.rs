use crate::config::GlazeConfig;
use crate::gallery::FilterState;
use crate::lightbox::LightboxImage;
use crate::model::CatalogEntry;
use crate::theme::Theme;
use std::path::PathBuf;

pub mod config;
pub mod helpers;
pub mod list;
pub mod query;
pub mod render;
pub mod show;
pub mod tags;
pub mod theme;

#[derive(Debug, Clone)]
pub struct GlazePaths {
    /// Holds `config.json` and `preferences.json`
    pub data_dir: PathBuf,
}

impl GlazePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A catalog entry with its 1-based position in a listing.
#[derive(Debug, Clone)]
pub struct ListedPiece {
    pub position: usize,
    pub entry: CatalogEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSummary {
    pub techniques: Vec<String>,
    pub colors: Vec<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_pieces: Vec<ListedPiece>,
    pub tags: Option<TagSummary>,
    pub state: Option<FilterState>,
    pub query: Option<String>,
    pub images: Vec<LightboxImage>,
    pub theme: Option<Theme>,
    pub config: Option<GlazeConfig>,
    pub html: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_pieces(mut self, pieces: Vec<ListedPiece>) -> Self {
        self.listed_pieces = pieces;
        self
    }

    pub fn with_tags(mut self, tags: TagSummary) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Records `state` together with its encoded query string.
    pub fn with_state(mut self, state: FilterState) -> Self {
        self.query = Some(crate::gallery::query::encode(&state));
        self.state = Some(state);
        self
    }

    pub fn with_images(mut self, images: Vec<LightboxImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_config(mut self, config: GlazeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }
}
