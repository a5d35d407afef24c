//! # Document Surface
//!
//! The gallery page is server-rendered; this layer progressively enhances it.
//! Binders never talk to a browser directly. They go through the [`Document`]
//! trait, which covers exactly the DOM operations they need:
//!
//! - typed [`Selector`] queries (no selector-string parsing)
//! - attributes, classes, inline styles and text
//! - form control state (checkbox `checked`, select `value`)
//! - location and `history.pushState`
//! - focus
//! - a listener registry, so teardown can be verified
//!
//! Events are not closures. A host registers interest through
//! [`Document::listen`] and later hands each [`DomEvent`] to the binder's
//! `handle` method, which runs it to completion before the next one.
//!
//! ## Implementations
//!
//! - [`memory::MemoryDocument`]: arena-backed element tree used by tests and
//!   by the CLI's `render` command
//!
//! ## Binders
//!
//! - [`gallery::GalleryBinder`]: filter pills, featured checkbox, sort select
//! - [`lightbox::LightboxBinder`]: image viewer
//! - [`markup`]: builds the server-rendered gallery markup from a catalog

pub mod gallery;
pub mod lightbox;
pub mod markup;
pub mod memory;

/// Handle to an element within one document.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Tag(&'a str),
    Id(&'a str),
    Class(&'a str),
    /// Element carries the attribute, whatever its value.
    Attr(&'a str),
    AttrEq(&'a str, &'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    pub key: Option<Key>,
}

impl DomEvent {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
        }
    }

    pub fn change(target: NodeId) -> Self {
        Self {
            kind: EventKind::Change,
            target,
            key: None,
        }
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
        }
    }
}

/// The DOM operations binders rely on.
pub trait Document {
    /// The `<html>` element.
    fn root(&self) -> NodeId;

    fn body(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Descendants of `scope` matching `selector`, in document order.
    fn query_all_within(&self, scope: NodeId, selector: Selector<'_>) -> Vec<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// An empty `value` clears the property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// `textContent`: the node's text and all descendant text.
    fn text(&self, node: NodeId) -> String;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn is_checked(&self, node: NodeId) -> bool;

    fn set_checked(&mut self, node: NodeId, checked: bool);

    fn value(&self, node: NodeId) -> String;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn location_path(&self) -> String;

    fn location_search(&self) -> String;

    /// `history.pushState` with a path-plus-query URL.
    fn push_history(&mut self, url: &str);

    fn focus(&mut self, node: NodeId);

    fn listen(&mut self, node: NodeId, kind: EventKind) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);

    fn query_within(&self, scope: NodeId, selector: Selector<'_>) -> Option<NodeId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    fn query(&self, selector: Selector<'_>) -> Option<NodeId> {
        self.query_within(self.root(), selector)
    }

    fn query_all(&self, selector: Selector<'_>) -> Vec<NodeId> {
        self.query_all_within(self.root(), selector)
    }

    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Whether `node` is `ancestor` or sits below it.
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}
