//! Lightbox binder.
//!
//! Expected markup inside the container element:
//! `.lightbox` (dialog) holding `.lightbox-backdrop`, `.lightbox-close`,
//! `.lightbox-prev`, `.lightbox-next`, `.lightbox-image` and optionally
//! `.lightbox-caption`. Thumbnails marked `.lightbox-trigger` with a
//! `data-index` open the viewer at that image.

use super::{Document, DomEvent, EventKind, Key, ListenerId, NodeId, Selector};
use crate::lightbox::{LightboxImage, LightboxState};

#[derive(Debug, Clone, Copy)]
struct Parts {
    lightbox: NodeId,
    backdrop: NodeId,
    close: NodeId,
    prev: NodeId,
    next: NodeId,
    image: NodeId,
    caption: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Close,
    Previous,
    Next,
    Keyboard,
    Backdrop,
    Trigger,
}

#[derive(Debug, Clone)]
struct Binding {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    action: Action,
}

#[derive(Debug)]
pub struct LightboxBinder {
    state: LightboxState,
    parts: Option<Parts>,
    bindings: Vec<Binding>,
}

impl LightboxBinder {
    /// Wires the viewer inside `#container_id`.
    ///
    /// A missing container or missing required element logs a warning and
    /// yields an inert binder: every later call is a no-op.
    pub fn attach<D: Document + ?Sized>(
        doc: &mut D,
        container_id: &str,
        images: Vec<LightboxImage>,
    ) -> Self {
        let mut binder = Self {
            state: LightboxState::new(images),
            parts: None,
            bindings: Vec::new(),
        };

        let Some(container) = doc.query(Selector::Id(container_id)) else {
            tracing::warn!(container = container_id, "lightbox container not found");
            return binder;
        };
        let Some(parts) = find_parts(doc, container) else {
            tracing::warn!(container = container_id, "required lightbox elements not found");
            return binder;
        };

        binder.bind(doc, parts.close, EventKind::Click, Action::Close);
        binder.bind(doc, parts.prev, EventKind::Click, Action::Previous);
        binder.bind(doc, parts.next, EventKind::Click, Action::Next);
        let root = doc.root();
        binder.bind(doc, root, EventKind::KeyDown, Action::Keyboard);
        binder.bind(doc, parts.backdrop, EventKind::Click, Action::Backdrop);
        for trigger in doc.query_all_within(container, Selector::Class("lightbox-trigger")) {
            binder.bind(doc, trigger, EventKind::Click, Action::Trigger);
        }

        binder.parts = Some(parts);
        tracing::debug!(
            container = container_id,
            images = binder.state.len(),
            "lightbox attached"
        );
        binder
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.bindings.len()
    }

    /// Opens the viewer programmatically, same path as a thumbnail click.
    pub fn open_at<D: Document + ?Sized>(&mut self, doc: &mut D, index: isize) {
        self.transition(doc, |s| s.open(index));
    }

    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.transition(doc, LightboxState::close);
    }

    pub fn next<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.transition(doc, LightboxState::next);
    }

    pub fn previous<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.transition(doc, LightboxState::previous);
    }

    pub fn go_to<D: Document + ?Sized>(&mut self, doc: &mut D, index: isize) {
        self.transition(doc, |s| s.go_to(index));
    }

    /// Runs `event` to completion. Returns `true` when the event was consumed
    /// (the browser default should be prevented).
    pub fn handle<D: Document + ?Sized>(&mut self, doc: &mut D, event: &DomEvent) -> bool {
        let Some(parts) = self.parts else {
            return false;
        };
        let Some(binding) = self
            .bindings
            .iter()
            .find(|b| b.kind == event.kind && doc.is_within(event.target, b.node))
        else {
            return false;
        };
        let (action, node) = (binding.action, binding.node);

        match action {
            Action::Close => self.close(doc),
            Action::Previous => self.previous(doc),
            Action::Next => self.next(doc),
            Action::Backdrop => {
                if event.target != parts.backdrop && event.target != parts.lightbox {
                    return false;
                }
                self.close(doc);
            }
            Action::Trigger => {
                let raw = doc.attribute(node, "data-index");
                let index = match raw.as_deref().map(str::parse::<isize>) {
                    Some(Ok(index)) => index,
                    Some(Err(e)) => {
                        tracing::warn!(
                            attribute = raw.as_deref().unwrap_or_default(),
                            error = %e,
                            "unreadable data-index, opening first image"
                        );
                        0
                    }
                    None => {
                        tracing::warn!("trigger has no data-index, opening first image");
                        0
                    }
                };
                self.open_at(doc, index);
            }
            Action::Keyboard => {
                if !self.state.is_open {
                    return false;
                }
                match event.key {
                    Some(Key::Escape) => self.close(doc),
                    Some(Key::ArrowRight) => self.next(doc),
                    Some(Key::ArrowLeft) => self.previous(doc),
                    _ => return false,
                }
            }
        }
        true
    }

    /// Removes every listener and releases the scroll lock.
    pub fn detach<D: Document + ?Sized>(self, doc: &mut D) {
        for binding in self.bindings {
            doc.unlisten(binding.id);
        }
        if self.parts.is_some() {
            let body = doc.body();
            doc.set_style(body, "overflow", "");
        }
    }

    fn bind<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        node: NodeId,
        kind: EventKind,
        action: Action,
    ) {
        let id = doc.listen(node, kind);
        self.bindings.push(Binding {
            id,
            node,
            kind,
            action,
        });
    }

    fn transition<D, F>(&mut self, doc: &mut D, step: F)
    where
        D: Document + ?Sized,
        F: FnOnce(&LightboxState) -> LightboxState,
    {
        let Some(parts) = self.parts else {
            return;
        };
        self.state = step(&self.state);
        render(doc, &parts, &self.state);
    }
}

fn find_parts<D: Document + ?Sized>(doc: &D, container: NodeId) -> Option<Parts> {
    let find = |class: &str| doc.query_within(container, Selector::Class(class));
    Some(Parts {
        lightbox: find("lightbox")?,
        backdrop: find("lightbox-backdrop")?,
        close: find("lightbox-close")?,
        prev: find("lightbox-prev")?,
        next: find("lightbox-next")?,
        image: find("lightbox-image")?,
        caption: find("lightbox-caption"),
    })
}

fn render<D: Document + ?Sized>(doc: &mut D, parts: &Parts, state: &LightboxState) {
    let body = doc.body();
    if !state.is_open {
        doc.remove_class(parts.lightbox, "active");
        doc.set_attribute(parts.lightbox, "aria-hidden", "true");
        doc.set_style(body, "overflow", "");
        return;
    }

    doc.add_class(parts.lightbox, "active");
    doc.set_attribute(parts.lightbox, "aria-hidden", "false");
    doc.set_style(body, "overflow", "hidden");

    if let Some(image) = state.current_image() {
        doc.set_attribute(parts.image, "src", &image.src);
        doc.set_attribute(parts.image, "alt", &image.alt);
        if let Some(caption) = parts.caption {
            let text = image.caption.as_deref().unwrap_or_default();
            doc.set_text(caption, text);
            doc.set_style(caption, "display", if text.is_empty() { "none" } else { "block" });
        }
    }
    doc.focus(parts.close);
}
