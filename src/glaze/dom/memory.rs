use super::{Document, EventKind, ListenerId, NodeId, Selector};
use std::collections::BTreeMap;

const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

/// Builder and storage for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: String,
    pub checked: bool,
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn matches(&self, selector: Selector<'_>) -> bool {
        match selector {
            Selector::Tag(tag) => self.tag == tag,
            Selector::Id(id) => self.id.as_deref() == Some(id),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Attr(name) => self.attributes.contains_key(name),
            Selector::AttrEq(name, value) => {
                self.attributes.get(name).map(String::as_str) == Some(value)
            }
        }
    }
}

/// In-memory document tree.
///
/// Node `0` is `<html>`, node `1` is `<body>`. Everything appended lives in
/// an arena and is never removed, so a [`NodeId`] stays valid for the life of
/// the document.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Element>,
    listeners: BTreeMap<ListenerId, (NodeId, EventKind)>,
    next_listener: u64,
    path: String,
    search: String,
    history: Vec<String>,
    focused: Option<NodeId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            listeners: BTreeMap::new(),
            next_listener: 1,
            path: "/".to_string(),
            search: String::new(),
            history: Vec::new(),
            focused: None,
        };
        doc.append(0, Element::new("body"));
        doc
    }

    /// Sets the location as if the page had been loaded from `url`.
    pub fn with_location(mut self, url: &str) -> Self {
        self.set_location(url);
        self
    }

    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = self.nodes.len();
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_on(&self, node: NodeId) -> Vec<EventKind> {
        self.listeners
            .values()
            .filter(|(n, _)| *n == node)
            .map(|(_, kind)| *kind)
            .collect()
    }

    /// Serializes the tree below `<html>` as markup.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.write_node(0, 0, &mut out);
        out
    }

    fn set_location(&mut self, url: &str) {
        match url.split_once('?') {
            Some((path, query)) => {
                self.path = path.to_string();
                self.search = format!("?{}", query);
            }
            None => {
                self.path = url.to_string();
                self.search = String::new();
            }
        }
    }

    fn collect(&self, node: NodeId, selector: Selector<'_>, out: &mut Vec<NodeId>) {
        for &child in &self.nodes[node].children {
            if self.nodes[child].matches(selector) {
                out.push(child);
            }
            self.collect(child, selector, out);
        }
    }

    /// A `<select>`'s value is carried by its matching `<option>` in markup.
    fn is_selected_option(&self, node: NodeId) -> bool {
        let el = &self.nodes[node];
        if el.tag != "option" {
            return false;
        }
        let Some(select) = el.parent.map(|p| &self.nodes[p]) else {
            return false;
        };
        select.tag == "select"
            && !select.value.is_empty()
            && el.attributes.get("value") == Some(&select.value)
    }

    fn write_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let el = &self.nodes[node];
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&el.tag);
        if let Some(id) = &el.id {
            push_attr(out, "id", id);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        for (name, value) in &el.attributes {
            push_attr(out, name, value);
        }
        if !el.styles.is_empty() {
            let style = el
                .styles
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            push_attr(out, "style", &style);
        }
        if el.checked {
            out.push_str(" checked");
        }
        if !el.value.is_empty() && el.tag != "select" {
            push_attr(out, "value", &el.value);
        }
        if self.is_selected_option(node) {
            out.push_str(" selected");
        }
        out.push('>');

        if VOID_TAGS.contains(&el.tag.as_str()) {
            out.push('\n');
            return;
        }

        if el.children.is_empty() {
            out.push_str(&escape(&el.text));
        } else {
            out.push('\n');
            if !el.text.is_empty() {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str(&escape(&el.text));
                out.push('\n');
            }
            for &child in &el.children {
                self.write_node(child, depth + 1, out);
            }
            out.push_str(&indent);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push_str(">\n");
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Document for MemoryDocument {
    fn root(&self) -> NodeId {
        0
    }

    fn body(&self) -> NodeId {
        1
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|el| el.parent)
    }

    fn query_all_within(&self, scope: NodeId, selector: Selector<'_>) -> Vec<NodeId> {
        let mut out = Vec::new();
        if scope < self.nodes.len() {
            self.collect(scope, selector, &mut out);
        }
        out
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let el = &self.nodes[node];
        match name {
            "id" => el.id.clone(),
            "class" if !el.classes.is_empty() => Some(el.classes.join(" ")),
            _ => el.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let el = &mut self.nodes[node];
        match name {
            "id" => el.id = Some(value.to_string()),
            "class" => el.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {
                el.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node].classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.nodes[node].classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node].classes.retain(|c| c != class);
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes[node].styles.get(property).cloned()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        let el = &self.nodes[node];
        let mut text = el.text.clone();
        for &child in &el.children {
            text.push_str(&self.text(child));
        }
        text
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node].text = text.to_string();
    }

    fn is_checked(&self, node: NodeId) -> bool {
        self.nodes[node].checked
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) {
        self.nodes[node].checked = checked;
    }

    fn value(&self, node: NodeId) -> String {
        self.nodes[node].value.clone()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        self.nodes[node].value = value.to_string();
    }

    fn location_path(&self) -> String {
        self.path.clone()
    }

    fn location_search(&self) -> String {
        self.search.clone()
    }

    fn push_history(&mut self, url: &str) {
        self.set_location(url);
        self.history.push(url.to_string());
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn listen(&mut self, node: NodeId, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, (node, kind));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_descendants_in_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let list = doc.append(body, Element::new("ul").class("items"));
        let a = doc.append(list, Element::new("li").attr("data-x", "1"));
        let b = doc.append(list, Element::new("li").attr("data-x", "2"));

        assert_eq!(doc.query_all(Selector::Tag("li")), vec![a, b]);
        assert_eq!(doc.query(Selector::AttrEq("data-x", "2")), Some(b));
        assert_eq!(doc.query_within(list, Selector::Class("items")), None);
        assert!(doc.is_within(b, body));
    }

    #[test]
    fn text_content_includes_descendants() {
        let mut doc = MemoryDocument::new();
        let card = doc.append(1, Element::new("article"));
        doc.append(card, Element::new("h2").text("Spiral "));
        doc.append(card, Element::new("p").text("Bowl"));
        assert_eq!(doc.text(card), "Spiral Bowl");
    }

    #[test]
    fn empty_style_value_removes_property() {
        let mut doc = MemoryDocument::new();
        let node = doc.append(1, Element::new("div"));
        doc.set_style(node, "display", "none");
        assert_eq!(doc.style(node, "display").as_deref(), Some("none"));
        doc.set_style(node, "display", "");
        assert_eq!(doc.style(node, "display"), None);
    }

    #[test]
    fn push_history_moves_location() {
        let mut doc = MemoryDocument::new().with_location("/gallery?color=blue");
        assert_eq!(doc.location_search(), "?color=blue");

        doc.push_history("/gallery");
        assert_eq!(doc.location_path(), "/gallery");
        assert_eq!(doc.location_search(), "");
        assert_eq!(doc.history(), ["/gallery".to_string()]);
    }

    #[test]
    fn listeners_are_tracked() {
        let mut doc = MemoryDocument::new();
        let node = doc.append(1, Element::new("button"));
        let id = doc.listen(node, EventKind::Click);
        assert_eq!(doc.listeners_on(node), vec![EventKind::Click]);
        doc.unlisten(id);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn renders_markup() {
        let mut doc = MemoryDocument::new();
        doc.append(1, Element::new("p").class("note").text("a < b"));
        let html = doc.to_html();
        assert!(html.contains(r#"<p class="note">a &lt; b</p>"#));
    }

    #[test]
    fn select_value_marks_matching_option() {
        let mut doc = MemoryDocument::new();
        let select = doc.append(1, Element::new("select").value("b"));
        doc.append(select, Element::new("option").attr("value", "a").text("A"));
        doc.append(select, Element::new("option").attr("value", "b").text("B"));

        let html = doc.to_html();
        assert!(html.contains(r#"<option value="a">A</option>"#));
        assert!(html.contains(r#"<option value="b" selected>B</option>"#));

        doc.set_value(select, "a");
        let html = doc.to_html();
        assert!(html.contains(r#"<option value="a" selected>A</option>"#));
        assert!(html.contains(r#"<option value="b">B</option>"#));
    }
}
