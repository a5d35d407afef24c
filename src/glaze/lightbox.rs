//! Image viewer state.
//!
//! [`LightboxState`] only changes through [`open`](LightboxState::open),
//! [`close`](LightboxState::close), [`next`](LightboxState::next),
//! [`previous`](LightboxState::previous) and
//! [`go_to`](LightboxState::go_to). Key presses, backdrop clicks, buttons and
//! programmatic calls in `dom::lightbox` all go through these, so there is one
//! transition table.
//!
//! Navigation loops: `next` from the last image lands on the first and
//! `previous` from the first lands on the last. Explicit indexes clamp.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightboxImage {
    pub src: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl LightboxImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            caption: None,
        }
    }

    /// Empty captions are dropped.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        self.caption = if caption.is_empty() { None } else { Some(caption) };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxState {
    pub is_open: bool,
    pub current_index: usize,
    images: Vec<LightboxImage>,
}

impl LightboxState {
    /// Closed, positioned on the first image.
    pub fn new(images: Vec<LightboxImage>) -> Self {
        Self {
            is_open: false,
            current_index: 0,
            images,
        }
    }

    pub fn images(&self) -> &[LightboxImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn open(&self, index: isize) -> Self {
        Self {
            is_open: true,
            current_index: clamp_index(index, self.len()),
            ..self.clone()
        }
    }

    /// Keeps the current index so reopening resumes where the viewer was.
    pub fn close(&self) -> Self {
        Self {
            is_open: false,
            ..self.clone()
        }
    }

    pub fn next(&self) -> Self {
        if self.len() <= 1 {
            return self.clone();
        }
        Self {
            current_index: (self.current_index + 1) % self.len(),
            ..self.clone()
        }
    }

    pub fn previous(&self) -> Self {
        if self.len() <= 1 {
            return self.clone();
        }
        let current_index = if self.current_index == 0 {
            self.len() - 1
        } else {
            self.current_index - 1
        };
        Self {
            current_index,
            ..self.clone()
        }
    }

    pub fn go_to(&self, index: isize) -> Self {
        Self {
            current_index: clamp_index(index, self.len()),
            ..self.clone()
        }
    }

    pub fn current_image(&self) -> Option<&LightboxImage> {
        self.images.get(self.current_index)
    }

    pub fn can_navigate_next(&self) -> bool {
        !self.is_empty()
    }

    pub fn can_navigate_previous(&self) -> bool {
        !self.is_empty()
    }
}

/// A zero-based position as a transition index. Positions past `isize::MAX`
/// saturate, which clamps to the last image like any other overshoot.
pub fn position_index(position: usize) -> isize {
    isize::try_from(position).unwrap_or(isize::MAX)
}

fn clamp_index(index: isize, len: usize) -> usize {
    if len == 0 || index < 0 {
        return 0;
    }
    (index as usize).min(len - 1)
}
